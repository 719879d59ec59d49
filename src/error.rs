use thiserror::Error;

use crate::cs::graph::Vertex;

/// Errors reported by the graph store and the spanning tree samplers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The handle is out of range or the vertex is inactive.
    #[error("vertex {0} not found")]
    VertexNotFound(Vertex),

    /// Both endpoints of a requested edge are the same vertex.
    #[error("self-loop on vertex {0} is not allowed")]
    SelfLoop(Vertex),

    /// No edge joins the two vertices.
    #[error("no edge between {0} and {1}")]
    EdgeNotFound(Vertex, Vertex),

    /// A walk-based sampler was given a graph that is not connected.
    #[error("graph is disconnected: only {reached} of {order} active vertices are reachable")]
    Disconnected {
        /// Vertices reachable from the first active vertex.
        reached: usize,
        /// Active vertices in the graph.
        order: usize,
    },

    /// Contraction ran out of non-loop edges with several vertices left.
    #[error("no contractible edge left while {remaining} vertices remain")]
    NoContractibleEdge {
        /// Active vertices left in the working copy.
        remaining: usize,
    },

    /// A seed tree handed to the flip chain is not a spanning tree.
    #[error("invalid spanning tree: {0}")]
    InvalidTree(String),

    /// Generic invalid argument.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A mode name that does not match any sampler.
    #[error("unknown sampling mode: {0}")]
    UnknownMode(String),
}

impl GraphError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }

    pub fn invalid_tree(msg: impl Into<String>) -> Self {
        GraphError::InvalidTree(msg.into())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
