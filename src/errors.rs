//! Error kinds raised by the graph data model

use thiserror::Error;

use crate::graph::{EdgeNumber, VertexId, VertexNumber};

/// Everything that can go wrong while constructing or mutating a graph.
///
/// All of these indicate caller bugs rather than data-dependent outcomes:
/// algorithms propagate them unchanged and never branch on them. Negative
/// algorithmic answers ("not k-colorable", "no clique extends") are ordinary
/// return values, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex number beyond the vertex table.
    #[error("vertex number out of range: {0}")]
    VertexOutOfRange(VertexNumber),

    /// An edge number beyond the edge table.
    #[error("edge number out of range: {0}")]
    EdgeOutOfRange(EdgeNumber),

    /// A lookup by vertex ID missed when the caller demanded a hit.
    #[error("unknown vertex id: {0}")]
    VertexNotFound(VertexId),

    /// A lookup by vertex label missed when the caller demanded a hit.
    #[error("unknown vertex label: {0}")]
    LabelNotFound(String),

    /// The label is already in use by a different vertex.
    #[error("duplicate vertex label: {0}")]
    DuplicateLabel(String),

    /// An attempt to add a parallel edge with multiple edges disabled.
    #[error("attempted multiple edge from vertex {from} to vertex {to}")]
    MultipleEdge { from: VertexNumber, to: VertexNumber },

    /// An attempt to add a self-loop with loop edges disabled.
    #[error("attempted loop edge on vertex {0}")]
    LoopEdge(VertexNumber),

    /// A contraction that places one vertex into two fragments, or
    /// contracts a vertex with itself.
    #[error("cannot contract vertex {0} with itself")]
    SameVertexContract(VertexNumber),
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GraphError::LoopEdge(5).to_string(),
            "attempted loop edge on vertex 5"
        );
        assert_eq!(
            GraphError::MultipleEdge { from: 1, to: 2 }.to_string(),
            "attempted multiple edge from vertex 1 to vertex 2"
        );
        assert_eq!(
            GraphError::DuplicateLabel("a".into()).to_string(),
            "duplicate vertex label: a"
        );
    }
}
