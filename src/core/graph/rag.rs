//! Resource-allocation graph
//!
//! Owns the process and resource node sets and the typed edge list, and
//! enforces the structural invariants at edit time:
//! - ids are non-empty and unique across both node kinds
//! - `request` edges go Process → Resource, `allocation` edges Resource → Process
//! - no self-loops, no duplicate `(from, to)` pair, no dangling endpoints
//!
//! Declaration order of nodes and edges is preserved; the cycle detector
//! relies on it for deterministic witnesses.

use crate::core::error::{Error, Result};
use crate::core::graph::WaitForGraph;
use crate::core::types::{Edge, EdgeKind, NodeId, NodeKind};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Edge as supplied by a collaborator, before validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Unvalidated graph description, e.g. loaded from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphSpec {
    #[serde(default)]
    pub processes: Vec<NodeId>,
    #[serde(default)]
    pub resources: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// A validated resource-allocation graph
///
/// Serialized as its [`GraphSpec`]; deserializing replays the spec through
/// [`ResourceAllocationGraph::from_spec`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphSpec", into = "GraphSpec")]
pub struct ResourceAllocationGraph {
    /// Process ids in declaration order
    processes: Vec<NodeId>,
    /// Resource ids in declaration order
    resources: Vec<NodeId>,
    /// Edges in declaration order
    edges: Vec<Edge>,
    /// Kind of every node, for O(1) endpoint checks
    kinds: FxHashMap<NodeId, NodeKind>,
}

impl ResourceAllocationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph by replaying every node and edge of `spec` through the
    /// validating editors
    pub fn from_spec(spec: &GraphSpec) -> Result<Self> {
        let mut graph = Self::new();
        for id in &spec.processes {
            graph.add_process(id)?;
        }
        for id in &spec.resources {
            graph.add_resource(id)?;
        }
        for edge in &spec.edges {
            graph.add_edge(&edge.from, &edge.to, edge.kind)?;
        }
        Ok(graph)
    }

    /// Export the graph as an unvalidated description
    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            processes: self.processes.clone(),
            resources: self.resources.clone(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeSpec {
                    from: e.from.clone(),
                    to: e.to.clone(),
                    kind: e.kind,
                })
                .collect(),
        }
    }

    /// Add a process node
    ///
    /// # Errors
    /// [`Error::EmptyId`] or [`Error::IdInUse`]
    pub fn add_process(&mut self, id: &str) -> Result<()> {
        self.add_node(id, NodeKind::Process)
    }

    /// Add a resource node
    ///
    /// # Errors
    /// [`Error::EmptyId`] or [`Error::IdInUse`]
    pub fn add_resource(&mut self, id: &str) -> Result<()> {
        self.add_node(id, NodeKind::Resource)
    }

    fn add_node(&mut self, id: &str, kind: NodeKind) -> Result<()> {
        if id.is_empty() {
            return Err(Error::EmptyId);
        }
        if self.kinds.contains_key(id) {
            return Err(Error::IdInUse(id.to_string()));
        }
        self.kinds.insert(id.to_string(), kind);
        match kind {
            NodeKind::Process => self.processes.push(id.to_string()),
            NodeKind::Resource => self.resources.push(id.to_string()),
        }
        Ok(())
    }

    /// Add a typed edge and return its id, `"{from}-{to}"`
    ///
    /// # Errors
    /// - [`Error::SelfLoop`] if `from == to`
    /// - [`Error::UnknownNode`] if either endpoint is missing
    /// - [`Error::InvalidEdgeDirection`] if the endpoint kinds do not match `kind`
    /// - [`Error::DuplicateEdge`] if an edge `from → to` already exists
    pub fn add_edge(&mut self, from: &str, to: &str, kind: EdgeKind) -> Result<String> {
        if from == to {
            return Err(Error::SelfLoop(from.to_string()));
        }
        let from_kind = self.kind_of(from)?;
        let to_kind = self.kind_of(to)?;
        if (from_kind, to_kind) != kind.endpoints() {
            return Err(Error::InvalidEdgeDirection {
                kind,
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if self.edges.iter().any(|e| e.from == from && e.to == to) {
            return Err(Error::DuplicateEdge(format!("{from}-{to}")));
        }

        let id = format!("{from}-{to}");
        self.edges.push(Edge {
            id: id.clone(),
            from: from.to_string(),
            to: to.to_string(),
            kind,
        });
        Ok(id)
    }

    /// Remove a node together with every edge touching it
    ///
    /// # Returns
    /// The removed edges, in declaration order
    pub fn remove_node(&mut self, id: &str) -> Result<Vec<Edge>> {
        let kind = self
            .kinds
            .remove(id)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))?;
        match kind {
            NodeKind::Process => self.processes.retain(|p| p != id),
            NodeKind::Resource => self.resources.retain(|r| r != id),
        }
        Ok(self.take_edges(|e| e.from == id || e.to == id))
    }

    /// Remove a single edge by id
    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| Error::UnknownEdge(edge_id.to_string()))?;
        Ok(self.edges.remove(pos))
    }

    /// Remove every edge matching `pred`, preserving the order of the rest
    pub(crate) fn take_edges<F>(&mut self, pred: F) -> Vec<Edge>
    where
        F: Fn(&Edge) -> bool,
    {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| pred(e));
        self.edges = kept;
        removed
    }

    /// Kind of node `id`
    pub fn kind_of(&self, id: &str) -> Result<NodeKind> {
        self.kinds
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    pub fn is_process(&self, id: &str) -> bool {
        self.kinds.get(id) == Some(&NodeKind::Process)
    }

    pub fn is_resource(&self, id: &str) -> bool {
        self.kinds.get(id) == Some(&NodeKind::Resource)
    }

    pub fn processes(&self) -> &[NodeId] {
        &self.processes
    }

    pub fn resources(&self) -> &[NodeId] {
        &self.resources
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Resources `process` requests, in edge-declaration order
    pub fn requests_of<'a>(&'a self, process: &'a str) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.kind == EdgeKind::Request && e.from == process)
            .map(|e| &e.to)
    }

    /// Processes holding `resource`, in edge-declaration order
    pub fn holders_of<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.kind == EdgeKind::Allocation && e.from == resource)
            .map(|e| &e.to)
    }

    /// `true` if an allocation edge `resource → process` exists
    pub fn is_allocated_to(&self, resource: &str, process: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.kind == EdgeKind::Allocation && e.from == resource && e.to == process)
    }

    /// Derive the process-only wait-for graph
    pub fn wait_for_graph(&self) -> WaitForGraph {
        WaitForGraph::from_rag(self)
    }
}

impl TryFrom<GraphSpec> for ResourceAllocationGraph {
    type Error = Error;

    fn try_from(spec: GraphSpec) -> Result<Self> {
        Self::from_spec(&spec)
    }
}

impl From<ResourceAllocationGraph> for GraphSpec {
    fn from(graph: ResourceAllocationGraph) -> Self {
        graph.to_spec()
    }
}
