//! Graph module for deadlock detection
//!
//! This module contains the graph structures used by the cycle detector:
//! - Resource-allocation graph: processes and resources joined by typed edges
//! - Wait-for graph: the process-only reduction of a resource-allocation graph
//! - Cycle search: DFS with a recursion stack over either graph

pub(crate) mod cycle;
pub mod rag;
pub mod wait_for_graph;

pub use rag::{EdgeSpec, GraphSpec, ResourceAllocationGraph};
pub use wait_for_graph::WaitForGraph;
