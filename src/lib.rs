pub mod cs;
pub mod error;

pub use cs::graph;
pub use cs::graph::{Edge, EdgeId, Graph, Mode, Sampler, Vertex};
pub use error::{GraphError, Result};
