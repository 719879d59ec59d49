use log::{debug, trace};

use crate::cs::graph::{Edge, Graph, UnionFind};

/// Kruskal's algorithm to compute the MST of the graph.
///
/// Every live edge is collected once, sorted ascending by weight (stable, so
/// equal weights keep enumeration order) and accepted iff its endpoints lie in
/// different components. Stops as soon as `order - 1` edges are accepted.
///
/// If the graph is disconnected, this will return a spanning forest of all
/// connected components, with fewer than `order - 1` edges.
pub fn compute_mst(graph: &Graph) -> Vec<Edge> {
    let mut edges: Vec<Edge> = graph.edges().map(|(_, e)| *e).collect();
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let target = graph.order().saturating_sub(1);
    let mut uf = UnionFind::new(graph.upper_bound());
    let mut mst = Vec::with_capacity(target);

    for edge in edges {
        if mst.len() == target {
            break;
        }
        if uf.union(edge.src, edge.dst) {
            trace!("adding edge ({}, {}) = {}", edge.src, edge.dst, edge.weight);
            mst.push(edge);
        } else {
            trace!("skipping edge ({}, {}), closes a cycle", edge.src, edge.dst);
        }
    }

    debug!(
        "kruskal: {} of {} edges accepted, total weight {}",
        mst.len(),
        graph.edge_count(),
        total_weight(&mst)
    );
    mst
}

/// Sum of the weights of a list of edges.
pub fn total_weight(edges: &[Edge]) -> f64 {
    edges.iter().map(|e| e.weight).sum()
}
