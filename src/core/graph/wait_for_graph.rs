//! Wait-for graph derived from a resource-allocation graph
//!
//! A process-only reduction: an edge `P -> Q` exists iff `P` requests some
//! resource that is currently allocated to `Q`. It is built on demand from
//! the RAG and never edited on its own.
//!
//! # Ordering
//!
//! Nodes keep the RAG's process declaration order. Successors of `P` are
//! listed in the order they are discovered: request edges of `P` in edge
//! order, then for each requested resource its allocation edges in edge
//! order. Repeated successors are kept once.

use crate::core::graph::ResourceAllocationGraph;
use crate::core::graph::cycle::find_cycle;
use crate::core::types::NodeId;
use fxhash::FxHashMap;

/// Represents a directed graph of process wait relationships
#[derive(Debug, Clone, Default)]
pub struct WaitForGraph {
    /// Process ids in declaration order
    nodes: Vec<NodeId>,
    /// `edges[i]` lists the indices of the processes `nodes[i]` waits for
    edges: Vec<Vec<usize>>,
}

impl WaitForGraph {
    /// Reduce `rag` to its wait-for graph
    pub fn from_rag(rag: &ResourceAllocationGraph) -> Self {
        let nodes: Vec<NodeId> = rag.processes().to_vec();
        let index: FxHashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let edges = nodes
            .iter()
            .map(|process| {
                let mut successors = Vec::new();
                for resource in rag.requests_of(process) {
                    for holder in rag.holders_of(resource) {
                        if let Some(&q) = index.get(holder.as_str())
                            && !successors.contains(&q)
                        {
                            successors.push(q);
                        }
                    }
                }
                successors
            })
            .collect();

        WaitForGraph { nodes, edges }
    }

    /// Process ids in declaration order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Processes that `process` waits for, in discovery order
    pub fn waits_for(&self, process: &str) -> Vec<&NodeId> {
        self.position(process)
            .map(|i| self.edges[i].iter().map(|&q| &self.nodes[q]).collect())
            .unwrap_or_default()
    }

    /// `true` if `from` waits for `to`
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.position(from), self.position(to)) {
            (Some(f), Some(t)) => self.edges[f].contains(&t),
            _ => false,
        }
    }

    /// Total number of wait-for edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Search for a cycle of processes
    ///
    /// # Returns
    /// * `Some(Vec<NodeId>)` - The processes of the first cycle found; the
    ///   last one waits for the first
    /// * `None` - If the graph is acyclic
    pub fn find_cycle(&self) -> Option<Vec<NodeId>> {
        find_cycle(&self.edges)
            .map(|cycle| cycle.into_iter().map(|i| self.nodes[i].clone()).collect())
    }

    fn position(&self, process: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == process)
    }
}
