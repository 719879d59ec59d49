//! # Aldous-Broder
//!
//! Simple random walk from a uniformly random start vertex; the edge used to
//! enter each vertex for the first time joins the tree. The result is an
//! exactly uniform spanning tree.
//!
//! The expected running time is the cover time of the graph, which can be
//! very large on graphs with bottlenecks (long pendant paths, lollipops).
//! No step limit is imposed.

use bitvec::prelude::*;
use log::{debug, trace};
use rand::Rng;

use crate::cs::graph::{ensure_connected, Edge, Graph, Vertex};
use crate::error::Result;

/// Samples a uniform spanning tree with the Aldous-Broder random walk.
///
/// # Errors
/// * `Disconnected` if the graph is not connected (the walk would never finish)
///
/// Graphs with zero or one active vertex give an empty tree.
pub fn aldous_broder<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<Vec<Edge>> {
    if graph.order() <= 1 {
        return Ok(Vec::new());
    }
    ensure_connected(graph)?;

    let vertices: Vec<Vertex> = graph.vertices().collect();
    let start = vertices[rng.gen_range(0..vertices.len())];

    let mut visited = bitvec![0; graph.upper_bound()];
    visited.set(start, true);
    let mut remaining = graph.order() - 1;
    let mut tree = Vec::with_capacity(remaining);
    let mut current = start;
    let mut steps = 0u64;

    while remaining > 0 {
        let arcs = graph.out_arcs(current);
        let arc = arcs[rng.gen_range(0..arcs.len())];
        let next = graph.arc_dest(arc);
        if !visited[next] {
            visited.set(next, true);
            tree.push(graph[arc.edge()]);
            remaining -= 1;
            trace!("step {steps}: entered {next} from {current}");
        }
        current = next;
        steps += 1;
    }

    debug!(
        "aldous-broder: start {start}, {} edges after {steps} steps",
        tree.len()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::graph::UnionFind;
    use crate::error::GraphError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn lollipop(clique: usize, tail: usize) -> Graph {
        let mut g = Graph::new(clique + tail);
        for u in 0..clique {
            for v in (u + 1)..clique {
                g.add_edge(u, v).unwrap();
            }
        }
        for v in clique..clique + tail {
            g.add_edge(v - 1, v).unwrap();
        }
        g
    }

    #[test]
    fn test_spanning_tree_on_lollipop() {
        let g = lollipop(6, 5);
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let tree = aldous_broder(&g, &mut rng).unwrap();
        assert_eq!(tree.len(), 10);
        let mut uf = UnionFind::new(g.upper_bound());
        assert!(tree.iter().all(|e| uf.union(e.src, e.dst)));
    }

    #[test]
    fn test_degenerate_graphs() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(aldous_broder(&Graph::new(0), &mut rng).unwrap().is_empty());
        assert!(aldous_broder(&Graph::new(1), &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_disconnected_fails_fast() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let result = aldous_broder(&Graph::new(2), &mut rng);
        assert!(matches!(result, Err(GraphError::Disconnected { .. })));
    }

    #[test]
    fn test_tree_uses_graph_edges() {
        let mut g = lollipop(4, 2);
        for (i, w) in g.weights_mut().enumerate() {
            *w = i as f64;
        }
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let tree = aldous_broder(&g, &mut rng).unwrap();
        for e in &tree {
            let id = g.find_edge(e.src, e.dst).unwrap();
            assert_eq!(g[id], *e);
        }
    }
}
