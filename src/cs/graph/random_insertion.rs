use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cs::graph::{ensure_connected, Edge, Graph, UnionFind};
use crate::error::Result;

/// Builds a spanning tree by inserting uniformly random edges, rejecting the
/// ones that would close a cycle.
///
/// Edges are drawn with replacement from the full, fixed edge set until
/// `order - 1` of them have been accepted. The result is not uniform over
/// spanning trees. The expected number of draws grows sharply near the end,
/// when few of the edges still join two different components (coupon
/// collector effect); dense graphs suffer most.
///
/// # Errors
/// * `Disconnected` if the graph is not connected (the target would never be reached)
///
/// Graphs with zero or one active vertex give an empty tree.
pub fn random_insertion<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<Vec<Edge>> {
    if graph.order() <= 1 {
        return Ok(Vec::new());
    }
    ensure_connected(graph)?;

    let edges: Vec<Edge> = graph.edges().map(|(_, e)| *e).collect();
    let target = graph.order() - 1;
    let mut uf = UnionFind::new(graph.upper_bound());
    let mut tree = Vec::with_capacity(target);
    let mut draws = 0u64;

    while tree.len() < target {
        let Some(&edge) = edges.choose(rng) else {
            break;
        };
        draws += 1;
        if uf.union(edge.src, edge.dst) {
            trace!("draw {draws}: accepted ({}, {})", edge.src, edge.dst);
            tree.push(edge);
        }
    }

    debug!(
        "random insertion: {} edges accepted after {draws} draws",
        tree.len()
    );
    Ok(tree)
}
