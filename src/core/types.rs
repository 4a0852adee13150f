use serde::{Deserialize, Serialize};
use std::fmt;

/// Process identifier type for the matrix-based analyses
///
/// A process is identified by its row index in the allocation matrix.
pub type ProcessId = usize;

/// Node identifier type for the resource-allocation graph
///
/// Unique across both processes and resources.
pub type NodeId = String;

/// Units of one resource type
pub type Quantity = u32;

/// Display label of a matrix process, `P{index}`
pub fn process_label(process: ProcessId) -> String {
    format!("P{process}")
}

/// The two disjoint node kinds of a resource-allocation graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Process,
    Resource,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Process => f.write_str("process"),
            NodeKind::Resource => f.write_str("resource"),
        }
    }
}

/// Kind of a resource-allocation graph edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Process → Resource: the process is waiting for the resource
    Request,
    /// Resource → Process: the resource is held by the process
    Allocation,
}

impl EdgeKind {
    /// Node kinds an edge of this kind must connect, as (origin, destination)
    pub fn endpoints(self) -> (NodeKind, NodeKind) {
        match self {
            EdgeKind::Request => (NodeKind::Process, NodeKind::Resource),
            EdgeKind::Allocation => (NodeKind::Resource, NodeKind::Process),
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Request => f.write_str("request"),
            EdgeKind::Allocation => f.write_str("allocation"),
        }
    }
}

/// A directed, typed edge of a resource-allocation graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    /// Edge id, `"{from}-{to}"`
    pub id: String,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Where a reported deadlock was found
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeadlockSource {
    /// Cycle in the process-only wait-for reduction
    WaitForGraph,
    /// Cycle in the raw resource-allocation graph
    ResourceAllocationGraph,
    /// Processes left unfinished by the matrix detection algorithm
    DetectionMatrix,
}

/// Represents a deadlock found by a configured [`Engine`](crate::Engine)
///
/// This is what the deadlock callback receives. For graph detection the
/// `cycle` is the closed walk of node ids; for matrix detection it lists the
/// deadlocked processes as `P{index}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlockReport {
    /// Which analysis found the deadlock
    pub source: DeadlockSource,

    /// Nodes or processes involved in the deadlock
    pub cycle: Vec<String>,

    /// Each waiting process in the cycle with the resource it waits for
    ///
    /// Empty for matrix detection, where requests are counts rather than
    /// named resources.
    pub waiting_for: Vec<(String, String)>,

    /// ISO-8601 timestamp of the detection
    pub timestamp: String,
}

/// Kind of analysis recorded in the analysis log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnalysisKind {
    Safety,
    GraphDetection,
    MatrixDetection,
    ResourceRequest,
    Recovery,
}
