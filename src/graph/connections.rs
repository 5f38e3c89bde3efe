//! The connection matrix

use crate::errors::{GraphError, Result};

use super::{Degree, EdgeNumber, Edges, VertexNumber};

/// Edge semantics for a graph: digraph edges, parallel edges, self-loops.
/// The default is a simple undirected graph with all three disabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub directed: bool,
    pub multiple: bool,
    pub loops: bool,
}

impl Flags {
    pub const SIMPLE: Flags = Flags {
        directed: false,
        multiple: false,
        loops: false,
    };
}

/// A graph's square connection matrix, indexed by from-vertex and to-vertex
/// numbers, in that order. Entries are lists of edge numbers.
///
/// A matrix is owned by exactly one graph and is rebuilt, never patched,
/// whenever the vertex set changes. The in/out degree of every vertex is
/// tracked alongside the matrix since the degrees are consulted constantly
/// by the bounding tests of the search algorithms.
#[derive(Debug, Clone)]
pub struct Connections {
    flags: Flags,
    order: VertexNumber,
    matrix: Vec<Edges>,
    indeg: Vec<Degree>,
    outdeg: Vec<Degree>,
}

impl Connections {
    /// Creates a new, empty connection matrix for the specified number of
    /// vertices and edge semantics.
    pub fn new(order: VertexNumber, flags: Flags) -> Self {
        Self {
            flags,
            order,
            matrix: vec![Edges::new(); order * order],
            indeg: vec![0; order],
            outdeg: vec![0; order],
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The size of the matrix, which is the order of the owning graph.
    pub fn order(&self) -> VertexNumber {
        self.order
    }

    /// The edge numbers joining the two vertices. Out-of-range vertex
    /// numbers panic, like slice indexing.
    pub fn edges(&self, from: VertexNumber, to: VertexNumber) -> &Edges {
        assert!(from < self.order && to < self.order, "vertex number out of range");
        &self.matrix[from * self.order + to]
    }

    pub fn adjacent(&self, from: VertexNumber, to: VertexNumber) -> bool {
        !self.edges(from, to).is_empty()
    }

    /// Checks that an edge between the two vertices would be legal under the
    /// edge semantics of this matrix.
    pub fn check(&self, from: VertexNumber, to: VertexNumber) -> Result<()> {
        if from >= self.order {
            return Err(GraphError::VertexOutOfRange(from));
        }
        if to >= self.order {
            return Err(GraphError::VertexOutOfRange(to));
        }
        if from == to && !self.flags.loops {
            return Err(GraphError::LoopEdge(from));
        }
        if !self.flags.multiple && !self.matrix[from * self.order + to].is_empty() {
            return Err(GraphError::MultipleEdge { from, to });
        }
        Ok(())
    }

    /// Joins the endpoint vertices with the specified edge number. For an
    /// undirected graph the edge is entered as both (from, to) and
    /// (to, from). Returns the resulting number of edges joining the two
    /// endpoints.
    pub fn join(&mut self, from: VertexNumber, to: VertexNumber, edge: EdgeNumber) -> Result<Degree> {
        self.check(from, to)?;
        Ok(self.insert(from, to, edge))
    }

    /// Enters an edge that is already known to be legal: the derivation
    /// paths (subgraph, complement, contraction) police legality themselves
    /// before inserting.
    pub(crate) fn insert(&mut self, from: VertexNumber, to: VertexNumber, edge: EdgeNumber) -> Degree {
        self.matrix[from * self.order + to].push(edge);
        self.outdeg[from] += 1;
        self.indeg[to] += 1;
        if !self.flags.directed && from != to {
            self.matrix[to * self.order + from].push(edge);
            self.outdeg[to] += 1;
            self.indeg[from] += 1;
        }
        self.matrix[from * self.order + to].len()
    }

    pub fn in_degree(&self, vertex: VertexNumber) -> Degree {
        self.indeg[vertex]
    }

    pub fn out_degree(&self, vertex: VertexNumber) -> Degree {
        self.outdeg[vertex]
    }

    /// Undirected graphs use the out degree.
    pub fn degree(&self, vertex: VertexNumber) -> Degree {
        self.outdeg[vertex]
    }

    // The extrema are recomputed on demand, so these are expensive calls.

    pub fn min_in_degree(&self) -> Degree {
        self.indeg.iter().copied().min().unwrap_or(0)
    }

    pub fn max_in_degree(&self) -> Degree {
        self.indeg.iter().copied().max().unwrap_or(0)
    }

    pub fn min_out_degree(&self) -> Degree {
        self.outdeg.iter().copied().min().unwrap_or(0)
    }

    pub fn max_out_degree(&self) -> Degree {
        self.outdeg.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn undirected_is_symmetric() {
        let mut connections = Connections::new(3, Flags::SIMPLE);
        connections.join(0, 1, 0).unwrap();
        connections.join(1, 2, 1).unwrap();
        assert_eq!(connections.edges(0, 1), &vec![0]);
        assert_eq!(connections.edges(1, 0), &vec![0]);
        assert!(connections.adjacent(2, 1));
        assert!(!connections.adjacent(0, 2));
        assert_eq!(connections.degree(1), 2);
        assert_eq!(connections.min_out_degree(), 1);
        assert_eq!(connections.max_out_degree(), 2);
    }

    #[test]
    fn simple_edge_policing() {
        let mut connections = Connections::new(3, Flags::SIMPLE);
        connections.join(0, 1, 0).unwrap();
        assert_eq!(
            connections.join(1, 0, 1),
            Err(GraphError::MultipleEdge { from: 1, to: 0 })
        );
        assert_eq!(connections.join(2, 2, 1), Err(GraphError::LoopEdge(2)));
        assert_eq!(connections.join(0, 3, 1), Err(GraphError::VertexOutOfRange(3)));
    }

    #[test]
    fn multigraph_allows_parallels() {
        let flags = Flags {
            multiple: true,
            ..Flags::SIMPLE
        };
        let mut connections = Connections::new(2, flags);
        assert_eq!(connections.join(0, 1, 0).unwrap(), 1);
        assert_eq!(connections.join(0, 1, 1).unwrap(), 2);
        assert_eq!(connections.degree(0), 2);
    }

    #[test]
    fn digraph_degrees() {
        let flags = Flags {
            directed: true,
            ..Flags::SIMPLE
        };
        let mut connections = Connections::new(2, flags);
        connections.join(0, 1, 0).unwrap();
        assert_eq!(connections.out_degree(0), 1);
        assert_eq!(connections.in_degree(0), 0);
        assert_eq!(connections.in_degree(1), 1);
        assert!(connections.adjacent(0, 1));
        assert!(!connections.adjacent(1, 0));
    }
}
