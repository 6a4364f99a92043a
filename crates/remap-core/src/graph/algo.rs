use super::{Graph, NodeId};
use std::collections::VecDeque;

/// Kahn's algorithm over live nodes. The ready queue is seeded and fed in
/// insertion order, which makes the order deterministic for a given build
/// sequence. On a cycle, the nodes that never became ready are returned.
pub(super) fn topo_order(graph: &Graph) -> Result<Vec<NodeId>, Vec<NodeId>> {
    let ids: Vec<NodeId> = graph.node_ids().collect();

    let mut in_degree: Vec<usize> = vec![0; ids.len()];
    let index_of = |id: NodeId| ids.binary_search(&id).expect("live node");

    for edge_id in graph.edge_ids() {
        let edge = graph.edge(edge_id);
        in_degree[index_of(edge.to)] += 1;
    }

    let mut ready: VecDeque<NodeId> = ids
        .iter()
        .copied()
        .filter(|&id| in_degree[index_of(id)] == 0)
        .collect();

    let mut order = Vec::with_capacity(ids.len());
    while let Some(id) = ready.pop_front() {
        order.push(id);
        for edge_id in graph.outgoing(id) {
            let to = graph.edge(edge_id).to;
            let slot = index_of(to);
            in_degree[slot] -= 1;
            if in_degree[slot] == 0 {
                ready.push_back(to);
            }
        }
    }

    if order.len() == ids.len() {
        Ok(order)
    } else {
        let stuck = ids
            .iter()
            .copied()
            .filter(|&id| in_degree[index_of(id)] > 0)
            .collect();
        Err(stuck)
    }
}
