//! Graph store and random spanning tree samplers.
//!
//! The [`Graph`] store keeps a fixed vertex capacity with activation flags, an
//! arena of undirected edges and, per vertex, three incidence views (edges,
//! outgoing arcs, incoming arcs). On top of it sit the samplers:
//!
//! - Random MST: i.i.d. uniform weights followed by Kruskal's algorithm
//! - Random traversal: random frontier growth from a random vertex
//! - Random insertion: random edges with replacement, rejecting cycles
//! - Aldous-Broder: first-entrance edges of a covering random walk (uniform)
//! - Random contraction: contract random edges of a working copy
//! - Wilson: loop-erased random walks into a growing tree (uniform)
//! - Flip: Markov chain of root-transfer moves on an existing tree
//!
//! Every sampler takes the graph and an explicit random source and returns the
//! tree as a list of [`Edge`] values. [`Sampler`] dispatches over [`Mode`] with
//! its own seedable generator.
//!
//! # Examples
//!
//! ```rust
//! use spantree::graph::{Graph, Mode, Sampler};
//!
//! let mut graph = Graph::new(4);
//! for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)] {
//!     graph.add_edge(u, v).unwrap();
//! }
//!
//! let mut sampler = Sampler::with_seed(Mode::Wilson, 7);
//! let tree = sampler.sample(&mut graph).unwrap();
//! assert_eq!(tree.len(), 3);
//! ```

pub mod aldous_broder;
pub mod flip;
pub mod kruskal;
pub mod random_contraction;
pub mod random_insertion;
pub mod random_mst;
pub mod random_traversal;
pub mod random_weights;
pub mod sampler;
pub mod store;
pub mod traversal;
pub mod union_find;
pub mod wilson;

pub use aldous_broder::aldous_broder;
pub use flip::{flip_chain, Flipper};
pub use kruskal::{compute_mst, total_weight};
pub use random_contraction::random_contraction;
pub use random_insertion::random_insertion;
pub use random_mst::random_mst;
pub use random_traversal::random_traversal;
pub use random_weights::assign_random_weights;
pub use sampler::{Mode, Sampler};
pub use store::{Arc, Edge, EdgeId, Graph, Vertex};
pub use traversal::{bfs_tree, ensure_connected, is_connected, reachable_count};
pub use union_find::UnionFind;
pub use wilson::wilson;
