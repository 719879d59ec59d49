//! # Random Contraction
//!
//! Karger-style contraction used as a tree sampler: repeatedly pick a random
//! edge of a working copy, record it, and merge its endpoints, until a single
//! vertex is left. The recorded edges form a spanning tree of the input.
//!
//! Every working edge remembers the original edge it descends from, so the
//! output is expressed in the caller's vertex handles and weights. When a
//! merge makes two edges parallel only the one already present is kept; the
//! redirected one, with its weight and origin, is dropped.

use std::collections::HashMap;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cs::graph::{Edge, EdgeId, Graph, UnionFind};
use crate::error::{GraphError, Result};

/// Samples a spanning tree by contracting uniformly random edges.
///
/// Works on a private copy; `graph` is never modified. Exactly `order - 1`
/// contractions are performed.
///
/// # Errors
/// * `NoContractibleEdge` if the working copy runs out of edges while more than
///   one vertex remains, which happens exactly when `graph` is disconnected
///
/// Graphs with zero or one active vertex give an empty tree.
pub fn random_contraction<R: Rng + ?Sized>(graph: &Graph, rng: &mut R) -> Result<Vec<Edge>> {
    if graph.order() <= 1 {
        return Ok(Vec::new());
    }

    let mut work = graph.copy();
    let mut origin: HashMap<EdgeId, Edge> = work.edges().map(|(id, e)| (id, *e)).collect();
    let mut classes = UnionFind::new(graph.upper_bound());
    let mut tree = Vec::with_capacity(graph.order() - 1);

    while work.order() > 1 {
        let candidates: Vec<EdgeId> = work.edge_ids().collect();
        debug_assert!(candidates.iter().all(|&id| work[id].src != work[id].dst));
        let Some(&chosen) = candidates.choose(rng) else {
            return Err(GraphError::NoContractibleEdge {
                remaining: work.order(),
            });
        };

        let original = origin.remove(&chosen).ok_or_else(|| {
            GraphError::invalid_input(format!("edge {} lost its origin", chosen.index()))
        })?;
        let merged = classes.union(original.src, original.dst);
        debug_assert!(merged, "contracted edge closes a cycle");
        tree.push(original);

        contract(&mut work, chosen, &mut origin)?;
        trace!(
            "contracted ({}, {}), {} vertices left",
            original.src,
            original.dst,
            work.order()
        );
    }

    debug!("random contraction: {} edges", tree.len());
    Ok(tree)
}

/// Merges the endpoints of `id` into its `src`, redirecting the other edges of
/// the removed endpoint and dropping loops and parallels.
fn contract(work: &mut Graph, id: EdgeId, origin: &mut HashMap<EdgeId, Edge>) -> Result<()> {
    let Some(edge) = work.remove_edge(id) else {
        return Ok(());
    };
    let (keep, gone) = (edge.src, edge.dst);

    for other_id in work.incident_edges(gone).to_vec() {
        let Some(other) = work.remove_edge(other_id) else {
            continue;
        };
        let from = origin.remove(&other_id);
        let far = other.opposite(gone);
        if far == keep {
            continue;
        }
        if let Some(new_id) = work.add_edge_if_not_duplicate(keep, far, other.weight)? {
            if let Some(from) = from {
                origin.insert(new_id, from);
            }
        }
    }

    work.delete_vertex(gone);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn square_with_diagonal() -> Graph {
        let mut g = Graph::new(4);
        for (i, (u, v)) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)].into_iter().enumerate() {
            g.add_weighted_edge(u, v, i as f64 / 10.0).unwrap();
        }
        g
    }

    #[test]
    fn test_caller_graph_untouched() {
        let g = square_with_diagonal();
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let tree = random_contraction(&g, &mut rng).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(g.order(), 4);
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_edges_are_original_edges() {
        let g = square_with_diagonal();
        for seed in 0..30 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let tree = random_contraction(&g, &mut rng).unwrap();
            let mut uf = UnionFind::new(4);
            for e in &tree {
                let id = g.find_edge(e.src, e.dst).expect("edge missing from input");
                assert_eq!(g[id], *e);
                assert!(uf.union(e.src, e.dst));
            }
        }
    }

    #[test]
    fn test_path_contracts_to_itself() {
        let mut g = Graph::new(5);
        for v in 1..5 {
            g.add_edge(v - 1, v).unwrap();
        }
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut keys: Vec<_> = random_contraction(&g, &mut rng)
            .unwrap()
            .iter()
            .map(Edge::key)
            .collect();
        keys.sort();
        assert_eq!(keys, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_disconnected_reports_no_contractible_edge() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(2, 3).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(
            random_contraction(&g, &mut rng),
            Err(GraphError::NoContractibleEdge { remaining: 2 })
        );
    }

    #[test]
    fn test_contract_collapses_parallels() {
        let mut g = square_with_diagonal();
        let mut origin: HashMap<EdgeId, Edge> = g.edges().map(|(id, e)| (id, *e)).collect();
        let id = g.find_edge(1, 2).unwrap();
        origin.remove(&id);
        contract(&mut g, id, &mut origin).unwrap();
        // (2,3) is redirected to (1,3); (0,2) would parallel (0,1) and is dropped
        assert_eq!(g.order(), 3);
        assert!(!g.is_vertex(2));
        assert_eq!(g.edge_count(), 3);
        assert!(g.find_edge(1, 3).is_some());
        assert_eq!(g[g.find_edge(0, 1).unwrap()].weight, 0.0);
        assert_eq!(origin.len(), 3);
    }
}
