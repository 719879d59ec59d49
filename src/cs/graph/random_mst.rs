use log::debug;
use rand::Rng;

use crate::cs::graph::{assign_random_weights, compute_mst, Edge, Graph};

/// Random spanning tree as the MST under fresh i.i.d. uniform weights.
///
/// Overwrites every edge weight of `graph`, then runs Kruskal's algorithm.
/// The result follows the "MST of random weights" distribution, which is
/// **not** the uniform distribution over spanning trees in general; use
/// Wilson or Aldous-Broder when uniformity matters.
///
/// Like [`compute_mst`], a disconnected graph yields a spanning forest.
pub fn random_mst<R: Rng + ?Sized>(graph: &mut Graph, rng: &mut R) -> Vec<Edge> {
    debug!(
        "random mst: order {}, {} edges",
        graph.order(),
        graph.edge_count()
    );
    assign_random_weights(graph, rng);
    compute_mst(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::graph::total_weight;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn wheel(spokes: usize) -> Graph {
        let mut g = Graph::new(spokes + 1);
        for i in 1..=spokes {
            g.add_edge(0, i).unwrap();
            g.add_edge(i, i % spokes + 1).unwrap();
        }
        g
    }

    #[test]
    fn test_random_mst_spans() {
        let mut g = wheel(6);
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let tree = random_mst(&mut g, &mut rng);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_random_mst_is_minimal_for_drawn_weights() {
        let mut g = wheel(5);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let tree = random_mst(&mut g, &mut rng);
        // weights stay on the graph, so recomputing must agree
        let again = compute_mst(&g);
        assert_eq!(tree, again);
        assert!(total_weight(&tree) < g.edges().map(|(_, e)| e.weight).sum::<f64>());
    }

    #[test]
    fn test_random_mst_varies_with_seed() {
        let mut g = wheel(8);
        let first = random_mst(&mut g, &mut ChaCha20Rng::seed_from_u64(0));
        let differs = (1..20).any(|seed| {
            let tree = random_mst(&mut g, &mut ChaCha20Rng::seed_from_u64(seed));
            tree.iter().map(Edge::key).collect::<Vec<_>>()
                != first.iter().map(Edge::key).collect::<Vec<_>>()
        });
        assert!(differs);
    }
}
