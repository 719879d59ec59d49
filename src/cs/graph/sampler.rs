use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cs::graph::{
    aldous_broder, bfs_tree, ensure_connected, flip_chain, random_contraction, random_insertion, random_mst,
    random_traversal, wilson, Edge, Graph, Vertex,
};
use crate::error::{GraphError, Result};

/// Spanning tree sampling strategies exposed to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    RandomMst,
    RandomTraversal,
    RandomInsertion,
    AldousBroder,
    RandomContraction,
    Wilson,
    Flip,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::RandomMst,
        Mode::RandomTraversal,
        Mode::RandomInsertion,
        Mode::AldousBroder,
        Mode::RandomContraction,
        Mode::Wilson,
        Mode::Flip,
    ];

    /// Front-end identifier of the mode.
    pub fn name(self) -> &'static str {
        match self {
            Mode::RandomMst => "RandomMST",
            Mode::RandomTraversal => "RandomTraversal",
            Mode::RandomInsertion => "RandomInsertion",
            Mode::AldousBroder => "AldousBroder",
            Mode::RandomContraction => "RandomContraction",
            Mode::Wilson => "Wilson",
            Mode::Flip => "Flip",
        }
    }

    /// True for the samplers whose output is exactly uniform over spanning trees.
    pub fn is_uniform(self) -> bool {
        matches!(self, Mode::AldousBroder | Mode::Wilson)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = GraphError;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so `aldous-broder`
    /// and `random_mst` both parse.
    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Mode::ALL
            .into_iter()
            .find(|m| m.name().to_ascii_lowercase() == folded)
            .ok_or_else(|| GraphError::UnknownMode(s.to_string()))
    }
}

/// Number of flips run by [`Mode::Flip`] unless configured otherwise.
pub const DEFAULT_FLIPS: usize = 10_000;

/// Runs one sampling mode with its own ChaCha generator.
///
/// Two samplers built with the same mode and seed produce identical trees on
/// identical graphs.
#[derive(Debug, Clone)]
pub struct Sampler {
    mode: Mode,
    rng: ChaCha20Rng,
    flips: usize,
    root: Option<Vertex>,
}

impl Sampler {
    /// Sampler seeded from the operating system's entropy source.
    pub fn new(mode: Mode) -> Self {
        Self::from_rng(mode, ChaCha20Rng::from_entropy())
    }

    /// Deterministic sampler.
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Self::from_rng(mode, ChaCha20Rng::seed_from_u64(seed))
    }

    fn from_rng(mode: Mode, rng: ChaCha20Rng) -> Self {
        Self {
            mode,
            rng,
            flips: DEFAULT_FLIPS,
            root: None,
        }
    }

    /// Number of flips for [`Mode::Flip`].
    pub fn flips(mut self, flips: usize) -> Self {
        self.flips = flips;
        self
    }

    /// Root of the breadth-first seed tree for [`Mode::Flip`].
    /// Defaults to the lowest active vertex.
    pub fn root(mut self, root: Vertex) -> Self {
        self.root = Some(root);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Draws one spanning tree of `graph`.
    ///
    /// Only [`Mode::RandomMst`] writes to the graph (it overwrites the edge
    /// weights); every other mode leaves it as it was.
    ///
    /// # Errors
    /// Whatever the selected sampler reports; see the individual functions.
    pub fn sample(&mut self, graph: &mut Graph) -> Result<Vec<Edge>> {
        debug!(
            "sampling {} on order {} with {} edges",
            self.mode,
            graph.order(),
            graph.edge_count()
        );
        let rng = &mut self.rng;
        match self.mode {
            Mode::RandomMst => Ok(random_mst(graph, rng)),
            Mode::RandomTraversal => random_traversal(graph, rng),
            Mode::RandomInsertion => random_insertion(graph, rng),
            Mode::AldousBroder => aldous_broder(graph, rng),
            Mode::RandomContraction => random_contraction(graph, rng),
            Mode::Wilson => wilson(graph, rng),
            Mode::Flip => {
                let Some(root) = self.root.or_else(|| graph.vertices().next()) else {
                    return Ok(Vec::new());
                };
                ensure_connected(graph)?;
                let seed = bfs_tree(graph, root)?;
                flip_chain(graph, &seed, root, self.flips, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: usize) -> Graph {
        let mut g = Graph::new(n);
        for v in 0..n {
            g.add_edge(v, (v + 1) % n).unwrap();
        }
        g
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_mode_parsing_is_lenient() {
        assert_eq!("aldous-broder".parse::<Mode>(), Ok(Mode::AldousBroder));
        assert_eq!("random_mst".parse::<Mode>(), Ok(Mode::RandomMst));
        assert_eq!("Random Contraction".parse::<Mode>(), Ok(Mode::RandomContraction));
        assert_eq!(
            "prim".parse::<Mode>(),
            Err(GraphError::UnknownMode("prim".to_string()))
        );
    }

    #[test]
    fn test_uniform_modes() {
        let uniform: Vec<_> = Mode::ALL.into_iter().filter(|m| m.is_uniform()).collect();
        assert_eq!(uniform, vec![Mode::AldousBroder, Mode::Wilson]);
    }

    #[test]
    fn test_every_mode_on_cycle() {
        for mode in Mode::ALL {
            let mut g = cycle(7);
            let mut sampler = Sampler::with_seed(mode, 42).flips(100);
            let tree = sampler.sample(&mut g).unwrap();
            assert_eq!(tree.len(), 6, "{mode} returned a wrong size");
        }
    }

    #[test]
    fn test_flip_defaults_to_lowest_vertex() {
        let mut g = cycle(5);
        g.delete_vertex(0);
        let mut sampler = Sampler::with_seed(Mode::Flip, 1).flips(10);
        assert_eq!(sampler.sample(&mut g).unwrap().len(), 3);
        let mut bad_root = Sampler::with_seed(Mode::Flip, 1).root(0);
        assert_eq!(
            bad_root.sample(&mut g),
            Err(GraphError::VertexNotFound(0))
        );
    }

    #[test]
    fn test_flip_reports_disconnected_graph() {
        let mut g = Graph::new(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(2, 3).unwrap();
        let expected = Err(GraphError::Disconnected {
            reached: 2,
            order: 4,
        });
        assert_eq!(Sampler::with_seed(Mode::Flip, 0).sample(&mut g), expected);
        assert_eq!(Sampler::with_seed(Mode::Wilson, 0).sample(&mut g), expected);
        assert_eq!(
            Sampler::with_seed(Mode::Flip, 0).root(3).sample(&mut g),
            expected
        );
    }

    #[test]
    fn test_entropy_sampler_runs() {
        let mut g = cycle(4);
        let mut sampler = Sampler::new(Mode::Wilson);
        assert_eq!(sampler.mode(), Mode::Wilson);
        assert_eq!(sampler.sample(&mut g).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_graph_every_mode() {
        for mode in Mode::ALL {
            let mut g = Graph::new(0);
            let mut sampler = Sampler::with_seed(mode, 0);
            assert!(sampler.sample(&mut g).unwrap().is_empty());
        }
    }
}
