//! Per-method dataflow graph.
//!
//! A minimal directed multigraph over a node arena: vertices and edges
//! live in `Vec`s and are addressed by integer handles, which keeps
//! equality cheap and avoids cyclic ownership. Removal leaves a tombstone
//! so handles stay stable while Wiring rewires the graph.

mod algo;

mod edge;
pub use edge::{Edge, EdgeId, FlowEdge};

mod node;
pub use node::MappingNode;

pub mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<Option<MappingNode>>,
    edges: Vec<Option<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: MappingNode) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    /// Panics on a removed or out-of-range handle; handles are never
    /// shared across graphs.
    pub fn node(&self, id: NodeId) -> &MappingNode {
        self.nodes[id.0]
            .as_ref()
            .expect("node handle points at a removed node")
    }

    pub fn get_node(&self, id: NodeId) -> Option<&MappingNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Removes a node together with every incident edge.
    pub fn remove_node(&mut self, id: NodeId) {
        for edge in self.edges.iter_mut() {
            if edge.as_ref().is_some_and(|e| e.from == id || e.to == id) {
                *edge = None;
            }
        }
        self.nodes[id.0] = None;
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, flow: FlowEdge) -> EdgeId {
        debug_assert!(self.get_node(from).is_some() && self.get_node(to).is_some());
        self.edges.push(Some(Edge { from, to, flow }));
        EdgeId(self.edges.len() - 1)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.edges[id.0]
            .as_ref()
            .expect("edge handle points at a removed edge")
    }

    pub fn remove_edge(&mut self, id: EdgeId) {
        self.edges[id.0] = None;
    }

    /// Live node handles in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId(i))
    }

    /// Live edge handles in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId(i))
    }

    pub fn outgoing(&self, id: NodeId) -> Vec<EdgeId> {
        self.edge_ids()
            .filter(|&e| self.edge(e).from == id)
            .collect()
    }

    pub fn incoming(&self, id: NodeId) -> Vec<EdgeId> {
        self.edge_ids().filter(|&e| self.edge(e).to == id).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// First live node matching the predicate, in insertion order.
    pub fn find_node(&self, mut pred: impl FnMut(&MappingNode) -> bool) -> Option<NodeId> {
        self.node_ids().find(|&id| pred(self.node(id)))
    }

    /// Topological order over live nodes; ties broken by insertion order.
    /// On a cycle, returns the node handles stuck in it.
    pub fn topo_order(&self) -> Result<Vec<NodeId>, Vec<NodeId>> {
        algo::topo_order(self)
    }

    pub fn is_acyclic(&self) -> bool {
        self.topo_order().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::TypeRef;

    fn source(name: &str) -> MappingNode {
        MappingNode::Source {
            param: name.into(),
            ty: TypeRef::named(["T"]),
        }
    }

    fn flow() -> FlowEdge {
        FlowEdge::new(TypeRef::named(["T"]), TypeRef::named(["T"]))
    }

    #[test]
    fn multigraph_allows_parallel_edges() {
        let mut g = Graph::new();
        let a = g.add_node(source("a"));
        let b = g.add_node(source("b"));
        g.add_edge(a, b, flow());
        g.add_edge(a, b, flow());
        assert_eq!(g.outgoing(a).len(), 2);
        assert_eq!(g.incoming(b).len(), 2);
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut g = Graph::new();
        let a = g.add_node(source("a"));
        let b = g.add_node(source("b"));
        let c = g.add_node(source("c"));
        g.add_edge(a, b, flow());
        g.add_edge(b, c, flow());
        g.remove_node(b);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.get_node(b).is_none());
        // Handles of surviving nodes stay valid.
        assert!(g.get_node(a).is_some());
        assert!(g.get_node(c).is_some());
    }

    #[test]
    fn topo_order_respects_insertion_on_ties() {
        let mut g = Graph::new();
        let a = g.add_node(source("a"));
        let b = g.add_node(source("b"));
        let c = g.add_node(source("c"));
        g.add_edge(a, c, flow());
        g.add_edge(b, c, flow());
        assert_eq!(g.topo_order().unwrap(), vec![a, b, c]);
    }

    #[test]
    fn cycle_is_detected() {
        let mut g = Graph::new();
        let a = g.add_node(source("a"));
        let b = g.add_node(source("b"));
        g.add_edge(a, b, flow());
        g.add_edge(b, a, flow());
        let stuck = g.topo_order().unwrap_err();
        assert_eq!(stuck, vec![a, b]);
        assert!(!g.is_acyclic());
    }
}
