//! Breadth-first traversal helpers: connectivity checks for the sampler
//! preconditions and the BFS tree used to seed the flip chain.

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::cs::graph::{Edge, Graph, Vertex};
use crate::error::{GraphError, Result};

/// Visits the component of `start` along outgoing arcs, calling `on_tree_arc`
/// with `(edge, new_vertex)` each time a vertex is discovered.
fn bfs_from<F>(graph: &Graph, start: Vertex, mut on_tree_arc: F) -> usize
where
    F: FnMut(&Edge, Vertex),
{
    let mut seen = bitvec![0; graph.upper_bound()];
    let mut queue = VecDeque::new();
    seen.set(start, true);
    queue.push_back(start);
    let mut count = 1;

    while let Some(v) = queue.pop_front() {
        for &arc in graph.out_arcs(v) {
            let w = graph.arc_dest(arc);
            if !seen[w] {
                seen.set(w, true);
                on_tree_arc(&graph[arc.edge()], w);
                queue.push_back(w);
                count += 1;
            }
        }
    }
    count
}

/// Number of vertices reachable from the lowest active vertex (0 for an empty graph).
pub fn reachable_count(graph: &Graph) -> usize {
    match graph.vertices().next() {
        Some(start) => bfs_from(graph, start, |_, _| {}),
        None => 0,
    }
}

/// True if every active vertex is reachable from every other one.
/// Graphs with zero or one active vertex are connected.
pub fn is_connected(graph: &Graph) -> bool {
    reachable_count(graph) == graph.order()
}

/// Fails with [`GraphError::Disconnected`] unless the graph is connected.
pub fn ensure_connected(graph: &Graph) -> Result<()> {
    let reached = reachable_count(graph);
    if reached == graph.order() {
        Ok(())
    } else {
        Err(GraphError::Disconnected {
            reached,
            order: graph.order(),
        })
    }
}

/// Breadth-first spanning tree of the component containing `root`.
///
/// Edges come out in discovery order. On a disconnected graph only the
/// component of `root` is covered.
///
/// # Errors
/// * `VertexNotFound` if `root` is not an active vertex
pub fn bfs_tree(graph: &Graph, root: Vertex) -> Result<Vec<Edge>> {
    if !graph.is_vertex(root) {
        return Err(GraphError::VertexNotFound(root));
    }
    let mut tree = Vec::with_capacity(graph.order().saturating_sub(1));
    bfs_from(graph, root, |edge, _| tree.push(*edge));
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for v in 1..n {
            g.add_edge(v - 1, v).unwrap();
        }
        g
    }

    #[test]
    fn test_empty_and_single_vertex_are_connected() {
        assert!(is_connected(&Graph::new(0)));
        assert!(is_connected(&Graph::new(1)));
        assert_eq!(reachable_count(&Graph::new(0)), 0);
    }

    #[test]
    fn test_isolated_vertices_disconnected() {
        let g = Graph::new(2);
        assert!(!is_connected(&g));
        assert_eq!(
            ensure_connected(&g),
            Err(GraphError::Disconnected {
                reached: 1,
                order: 2
            })
        );
    }

    #[test]
    fn test_inactive_vertices_ignored() {
        let mut g = path(4);
        g.delete_vertex(3);
        assert!(is_connected(&g));
        g.delete_vertex(1);
        assert!(!is_connected(&g));
    }

    #[test]
    fn test_bfs_tree_on_path() {
        let g = path(5);
        let tree = bfs_tree(&g, 2).unwrap();
        assert_eq!(tree.len(), 4);
        assert!(tree[0].connects(2, 1) || tree[0].connects(2, 3));
    }

    #[test]
    fn test_bfs_tree_levels_on_star() {
        let mut g = Graph::new(5);
        for leaf in 1..5 {
            g.add_edge(0, leaf).unwrap();
        }
        g.add_edge(1, 2).unwrap();
        let tree = bfs_tree(&g, 0).unwrap();
        assert_eq!(tree.len(), 4);
        assert!(tree.iter().all(|e| e.src == 0 || e.dst == 0));
    }

    #[test]
    fn test_bfs_tree_invalid_root() {
        let mut g = path(3);
        g.delete_vertex(0);
        assert_eq!(bfs_tree(&g, 0), Err(GraphError::VertexNotFound(0)));
    }
}
