//! Two-phase deadlock detector over a resource-allocation graph
//!
//! # How it works
//!
//! 1. Phase A reduces the graph to its wait-for graph and runs a DFS with a
//!    recursion stack from every unvisited process in declaration order. A
//!    cycle of processes is re-expanded into an alternating process/resource
//!    walk for display.
//! 2. Phase B runs only if phase A finds nothing. It repeats the same DFS over
//!    the raw graph, processes first and then resources, following edges in
//!    declaration order.
//!
//! Both phases assume a single instance per resource. With several units per
//! resource type a cycle is necessary but not sufficient for deadlock; use
//! [`detect_matrix_deadlock`](crate::detect_matrix_deadlock) for that case.

use crate::core::graph::ResourceAllocationGraph;
use crate::core::graph::cycle::find_cycle;
use crate::core::types::{DeadlockSource, NodeId};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Which phase produced a cycle witness
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPhase {
    WaitFor,
    ResourceAllocation,
}

impl From<DetectionPhase> for DeadlockSource {
    fn from(phase: DetectionPhase) -> Self {
        match phase {
            DetectionPhase::WaitFor => DeadlockSource::WaitForGraph,
            DetectionPhase::ResourceAllocation => DeadlockSource::ResourceAllocationGraph,
        }
    }
}

/// Outcome of graph deadlock detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub deadlocked: bool,
    /// Closed walk of node ids; the closing edge `last → first` is implied.
    /// Empty when not deadlocked.
    pub cycle: Vec<NodeId>,
    /// Phase that found the cycle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<DetectionPhase>,
}

impl DetectionResult {
    fn none() -> Self {
        DetectionResult {
            deadlocked: false,
            cycle: Vec::new(),
            phase: None,
        }
    }

    fn found(cycle: Vec<NodeId>, phase: DetectionPhase) -> Self {
        DetectionResult {
            deadlocked: true,
            cycle,
            phase: Some(phase),
        }
    }
}

/// Detect a deadlock cycle in `graph`
///
/// Pure function of its input: calling it twice on the same graph yields the
/// same result.
pub fn detect_deadlock(graph: &ResourceAllocationGraph) -> DetectionResult {
    if let Some(processes) = graph.wait_for_graph().find_cycle() {
        return DetectionResult::found(
            expand_wait_for_cycle(graph, &processes),
            DetectionPhase::WaitFor,
        );
    }
    if let Some(cycle) = find_rag_cycle(graph) {
        return DetectionResult::found(cycle, DetectionPhase::ResourceAllocation);
    }
    DetectionResult::none()
}

/// Phase B: cycle search over the raw graph, processes first then resources
pub(crate) fn find_rag_cycle(graph: &ResourceAllocationGraph) -> Option<Vec<NodeId>> {
    let nodes: Vec<&NodeId> = graph
        .processes()
        .iter()
        .chain(graph.resources().iter())
        .collect();
    let index: FxHashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut adjacency = vec![Vec::new(); nodes.len()];
    for edge in graph.edges() {
        if let (Some(&from), Some(&to)) =
            (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
        {
            adjacency[from].push(to);
        }
    }

    find_cycle(&adjacency).map(|cycle| cycle.into_iter().map(|i| nodes[i].clone()).collect())
}

/// Re-insert, between each consecutive pair `(P_i, P_i+1)`, the first
/// resource that `P_i` requests and that is allocated to `P_i+1`
pub(crate) fn expand_wait_for_cycle(
    graph: &ResourceAllocationGraph,
    processes: &[NodeId],
) -> Vec<NodeId> {
    let mut walk = Vec::with_capacity(processes.len() * 2);
    for (i, current) in processes.iter().enumerate() {
        let next = &processes[(i + 1) % processes.len()];
        walk.push(current.clone());
        if let Some(resource) = graph
            .requests_of(current)
            .find(|r| graph.is_allocated_to(r, next))
        {
            walk.push(resource.clone());
        }
    }
    walk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EdgeKind;

    fn graph(
        processes: &[&str],
        resources: &[&str],
        edges: &[(&str, &str, EdgeKind)],
    ) -> ResourceAllocationGraph {
        let mut graph = ResourceAllocationGraph::new();
        for p in processes {
            graph.add_process(p).unwrap();
        }
        for r in resources {
            graph.add_resource(r).unwrap();
        }
        for &(from, to, kind) in edges {
            graph.add_edge(from, to, kind).unwrap();
        }
        graph
    }

    fn ids(items: &[&str]) -> Vec<NodeId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_process_deadlock() {
        let g = graph(
            &["P1", "P2"],
            &["R1", "R2"],
            &[
                ("R1", "P1", EdgeKind::Allocation),
                ("R2", "P2", EdgeKind::Allocation),
                ("P1", "R2", EdgeKind::Request),
                ("P2", "R1", EdgeKind::Request),
            ],
        );
        let result = detect_deadlock(&g);
        assert!(result.deadlocked);
        assert_eq!(result.cycle, ids(&["P1", "R2", "P2", "R1"]));
        assert_eq!(result.phase, Some(DetectionPhase::WaitFor));
    }

    #[test]
    fn test_no_deadlock_without_reciprocal_allocation() {
        let g = graph(
            &["P1", "P2"],
            &["R1", "R2"],
            &[
                ("R1", "P1", EdgeKind::Allocation),
                ("P1", "R2", EdgeKind::Request),
            ],
        );
        let result = detect_deadlock(&g);
        assert!(!result.deadlocked);
        assert!(result.cycle.is_empty());
        assert_eq!(result.phase, None);
    }

    #[test]
    fn test_expansion_uses_first_matching_request() {
        // P1 requests R3 (free) before R2 (held by P2)
        let g = graph(
            &["P1", "P2"],
            &["R1", "R2", "R3"],
            &[
                ("P1", "R3", EdgeKind::Request),
                ("R2", "P2", EdgeKind::Allocation),
                ("R1", "P1", EdgeKind::Allocation),
                ("P1", "R2", EdgeKind::Request),
                ("P2", "R1", EdgeKind::Request),
            ],
        );
        assert_eq!(
            expand_wait_for_cycle(&g, &ids(&["P1", "P2"])),
            ids(&["P1", "R2", "P2", "R1"])
        );
    }

    #[test]
    fn test_rag_cycle_matches_wait_for_cycle() {
        let g = graph(
            &["P1", "P2"],
            &["R1", "R2"],
            &[
                ("R1", "P1", EdgeKind::Allocation),
                ("R2", "P2", EdgeKind::Allocation),
                ("P1", "R2", EdgeKind::Request),
                ("P2", "R1", EdgeKind::Request),
            ],
        );
        // Phase B on its own walks P1 -> R2 -> P2 -> R1 -> P1
        assert_eq!(find_rag_cycle(&g), Some(ids(&["P1", "R2", "P2", "R1"])));
    }

    #[test]
    fn test_process_requesting_its_own_resource() {
        let g = graph(
            &["P1"],
            &["R1"],
            &[
                ("R1", "P1", EdgeKind::Allocation),
                ("P1", "R1", EdgeKind::Request),
            ],
        );
        let result = detect_deadlock(&g);
        assert!(result.deadlocked);
        assert_eq!(result.cycle, ids(&["P1", "R1"]));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let g = graph(
            &["P1", "P2", "P3"],
            &["R1", "R2", "R3"],
            &[
                ("R1", "P1", EdgeKind::Allocation),
                ("R2", "P2", EdgeKind::Allocation),
                ("R3", "P3", EdgeKind::Allocation),
                ("P1", "R2", EdgeKind::Request),
                ("P2", "R3", EdgeKind::Request),
                ("P3", "R1", EdgeKind::Request),
            ],
        );
        let first = detect_deadlock(&g);
        let second = detect_deadlock(&g);
        assert_eq!(first, second);
        assert_eq!(first.cycle, ids(&["P1", "R2", "P2", "R3", "P3", "R1"]));
    }
}
