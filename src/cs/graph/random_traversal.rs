use bitvec::prelude::*;
use log::{debug, trace};
use rand::Rng;

use crate::cs::graph::{ensure_connected, Edge, Graph, Vertex};
use crate::error::Result;

/// Random traversal: grows a tree from a random vertex by repeatedly taking a
/// uniformly random arc out of the frontier.
///
/// The frontier holds the arcs leaving visited vertices toward vertices that
/// were unvisited when the arc was pushed. A drawn arc whose head has been
/// visited since is discarded. Draws remove by swapping with the last slot so
/// no position is favoured. The tree distribution is not uniform; this is a
/// structural growth heuristic closely related to randomized Prim.
///
/// # Errors
/// * `Disconnected` if the graph is not connected, instead of silently
///   returning a tree of the start vertex's component
///
/// Graphs with zero or one active vertex give an empty tree.
pub fn random_traversal<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<Vec<Edge>> {
    if graph.order() <= 1 {
        return Ok(Vec::new());
    }
    ensure_connected(graph)?;

    let vertices: Vec<Vertex> = graph.vertices().collect();
    let start = vertices[rng.gen_range(0..vertices.len())];

    let mut visited = bitvec![0; graph.upper_bound()];
    visited.set(start, true);
    let mut tree = Vec::with_capacity(graph.order() - 1);
    let mut frontier: Vec<_> = graph.out_arcs(start).to_vec();
    let mut draws = 0usize;

    while !frontier.is_empty() {
        let arc = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        draws += 1;
        let v = graph.arc_dest(arc);
        if visited[v] {
            continue;
        }
        visited.set(v, true);
        tree.push(graph[arc.edge()]);
        trace!("frontier draw {draws}: reached {v}");

        frontier.extend(
            graph
                .out_arcs(v)
                .iter()
                .copied()
                .filter(|&a| !visited[graph.arc_dest(a)]),
        );
    }

    debug!(
        "random traversal: start {start}, {} edges after {draws} draws",
        tree.len()
    );
    Ok(tree)
}
