//! Error types for deadlock-lab
//!
//! Every variant is a local, recoverable input-validation failure. The
//! analyses themselves never fail once their inputs have been constructed.

use crate::core::types::{EdgeKind, NodeKind, ProcessId};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Validation error types
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix rows/columns or the available vector disagree on their shape
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A quantity is negative, fractional or too large
    #[error("invalid resource quantity: {0}")]
    InvalidQuantity(String),

    /// `max_demand[p][r] < allocation[p][r]`
    #[error("allocation exceeds declared maximum: process P{process}, resource {resource}")]
    AllocationExceedsMaximum { process: ProcessId, resource: usize },

    /// A resource request asks for more than the process still needs
    #[error("request exceeds declared need: process P{process}, resource {resource}")]
    RequestExceedsNeed { process: ProcessId, resource: usize },

    /// Process index outside the state
    #[error("unknown process: P{0}")]
    UnknownProcess(ProcessId),

    /// Edge or operation names a node id that is not in the graph
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Operation expected a node of another kind
    #[error("expected a {expected} node: {id}")]
    WrongNodeKind { id: String, expected: NodeKind },

    /// Request edge not Process→Resource, or allocation edge not Resource→Process
    #[error("invalid edge direction for type: {kind} edge from {from} to {to}")]
    InvalidEdgeDirection {
        kind: EdgeKind,
        from: String,
        to: String,
    },

    /// An edge with the same (from, to) pair is already present
    #[error("edge already exists: {0}")]
    DuplicateEdge(String),

    /// No edge with this id
    #[error("unknown edge: {0}")]
    UnknownEdge(String),

    /// Source and destination are the same node
    #[error("source and destination must differ: {0}")]
    SelfLoop(String),

    /// Node ids may not be empty
    #[error("node id must not be empty")]
    EmptyId,

    /// Ids are unique across processes and resources
    #[error("id already in use: {0}")]
    IdInUse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
