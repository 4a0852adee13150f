//! Deadlock recovery on a resource-allocation graph
//!
//! Two strategies:
//! - Process termination: abort a deadlocked process, dropping everything it
//!   holds and everything it waits for.
//! - Resource preemption: take a resource away from its holders. The resource
//!   becomes free; pending requests for it stay in place.
//!
//! [`recover`] applies one strategy repeatedly to a copy of the graph until
//! the detector no longer finds a cycle.

use crate::core::detector::detect_deadlock;
use crate::core::error::{Error, Result};
use crate::core::graph::ResourceAllocationGraph;
use crate::core::types::{Edge, EdgeKind, NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// How to break a deadlock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryStrategy {
    ProcessTermination,
    ResourcePreemption,
}

impl RecoveryStrategy {
    fn victim_kind(self) -> NodeKind {
        match self {
            RecoveryStrategy::ProcessTermination => NodeKind::Process,
            RecoveryStrategy::ResourcePreemption => NodeKind::Resource,
        }
    }
}

/// Result of a recovery run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub strategy: RecoveryStrategy,
    /// Terminated processes or preempted resources, in the order chosen
    pub victims: Vec<NodeId>,
    /// The graph after every victim was handled
    pub graph: ResourceAllocationGraph,
    /// `false` if a cycle remained that the strategy could not act on
    pub resolved: bool,
}

impl ResourceAllocationGraph {
    /// Abort `process`: remove it with all of its request and allocation edges
    ///
    /// # Returns
    /// The removed edges, in declaration order
    pub fn terminate_process(&mut self, process: &str) -> Result<Vec<Edge>> {
        if self.kind_of(process)? != NodeKind::Process {
            return Err(Error::WrongNodeKind {
                id: process.to_string(),
                expected: NodeKind::Process,
            });
        }
        self.remove_node(process)
    }

    /// Preempt `resource`: remove every allocation edge leaving it
    ///
    /// # Returns
    /// The removed allocation edges, in declaration order
    pub fn preempt_resource(&mut self, resource: &str) -> Result<Vec<Edge>> {
        if self.kind_of(resource)? != NodeKind::Resource {
            return Err(Error::WrongNodeKind {
                id: resource.to_string(),
                expected: NodeKind::Resource,
            });
        }
        Ok(self.take_edges(|e| e.kind == EdgeKind::Allocation && e.from == resource))
    }
}

/// Break every deadlock in `graph` with `strategy`
///
/// Each round picks the first node of the required kind in the current cycle
/// witness. The input graph is left untouched.
pub fn recover(graph: &ResourceAllocationGraph, strategy: RecoveryStrategy) -> RecoveryPlan {
    let mut graph = graph.clone();
    let mut victims = Vec::new();

    let resolved = loop {
        let result = detect_deadlock(&graph);
        if !result.deadlocked {
            break true;
        }

        let victim = result
            .cycle
            .iter()
            .find(|id| graph.kind_of(id).ok() == Some(strategy.victim_kind()))
            .cloned();
        let Some(victim) = victim else {
            break false;
        };

        let removed = match strategy {
            RecoveryStrategy::ProcessTermination => graph.terminate_process(&victim),
            RecoveryStrategy::ResourcePreemption => graph.preempt_resource(&victim),
        };
        victims.push(victim);

        // A victim that frees nothing would loop forever
        if !matches!(removed, Ok(ref edges) if !edges.is_empty()) {
            break false;
        }
    };

    RecoveryPlan {
        strategy,
        victims,
        graph,
        resolved,
    }
}
