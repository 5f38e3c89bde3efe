//! The graph data model: vertices, edges, and the connection matrix

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display};

use itertools::Itertools;

use crate::errors::{GraphError, Result};

pub mod connections;
pub mod edge;
pub mod vertex;

pub use connections::{Connections, Flags};
pub use edge::{Edge, EdgeValues};
pub use vertex::{Vertex, VertexValues, Vertices};

/// Vertex and edge colors. Color values can index an external color table
/// for application-specific assignments; 0 is interpreted as "none".
pub type Color = u32;
pub const NOCOLOR: Color = 0;

/// An edge's weight is the cost to traverse it.
pub type Weight = f64;
pub const FREE: Weight = 0.0;

/// Vertex positions, for drawing add-ons.
pub type Dimension = f64;

/// The invariant identifier assigned to a vertex when it first enters a
/// graph. Subgraph and contraction operations carry ids over unchanged, so a
/// derived graph generally has a non-contiguous id range; the id/number
/// distinction is what lets an algorithm relate a working graph back to the
/// graph it started from.
pub type VertexId = u32;
pub type VertexIds = BTreeSet<VertexId>;

/// A vertex's position in the vertex table, which is also its row and column
/// in the connection matrix. Numbers are *not* stable across mutations.
pub type VertexNumber = usize;
pub type VertexNumbers = BTreeSet<VertexNumber>;
pub type VertexNumbersList = Vec<VertexNumbers>;

/// An edge's position in the edge table.
pub type EdgeNumber = usize;
pub type EdgeNumbers = BTreeSet<EdgeNumber>;
pub type Edges = Vec<EdgeNumber>;

/// The number of edges incident to a vertex.
pub type Degree = usize;

/// A graph: an ordered vertex table, an ordered edge table, and a connection
/// matrix relating the two, under a set of edge-semantics flags.
///
/// Graphs are immutable under algorithms: every structural mutation
/// (subgraph, contraction, complement) produces a new graph owning its own
/// tables and matrix, with the id/label lookups reconstructed from scratch.
/// The only in-place mutations are edge addition on a fixed vertex set
/// ([`join`](Graph::join), [`make_complete`](Graph::make_complete)) and
/// attribute updates.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vertices,
    edges: Vec<Edge>,
    connections: Connections,
}

impl Graph {
    /// Creates a simple graph with the specified number of isolated,
    /// unlabeled vertices (the null graph for n = 0).
    pub fn new(order: VertexNumber) -> Self {
        Self::with_flags(order, Flags::SIMPLE)
    }

    /// Creates an empty graph with the specified edge semantics.
    pub fn with_flags(order: VertexNumber, flags: Flags) -> Self {
        let mut vertices = Vertices::new();
        vertices.reserve(order);
        for _ in 0..order {
            vertices.add_unlabeled();
        }
        Self {
            vertices,
            edges: Vec::new(),
            connections: Connections::new(order, flags),
        }
    }

    /// Creates a simple graph with the specified vertices and edges. The
    /// vertex numbers in the edge values index into the vertex list.
    pub fn build<V, E>(vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = VertexValues>,
        E: IntoIterator<Item = EdgeValues>,
    {
        Self::build_with_flags(vertices, edges, Flags::SIMPLE)
    }

    /// Creates a graph with the specified vertices, edges, and semantics.
    pub fn build_with_flags<V, E>(vertices: V, edges: E, flags: Flags) -> Result<Self>
    where
        V: IntoIterator<Item = VertexValues>,
        E: IntoIterator<Item = EdgeValues>,
    {
        let mut table = Vertices::new();
        for values in vertices {
            table.add(values)?;
        }
        let mut graph = Self {
            connections: Connections::new(table.len(), flags),
            vertices: table,
            edges: Vec::new(),
        };
        for values in edges {
            graph.join_with(values)?;
        }
        Ok(graph)
    }

    // ---- derivations ------------------------------------------------

    /// Creates the complement: the same vertex set (ids, labels, colors,
    /// and positions included), with an edge exactly where the source has
    /// none. Self-loops are never produced. Meaningful for simple graphs.
    pub fn complement(&self) -> Self {
        let mut graph = self.skeleton(self.vertices.clone());
        let n = graph.order();
        for (i, j) in (0..n).tuple_combinations() {
            if !self.adjacent(i, j) {
                graph.insert_edge(i, j, None, NOCOLOR, FREE);
            }
        }
        graph
    }

    /// Creates the induced subgraph on the specified keep-set: the listed
    /// vertices and every edge with both endpoints among them.
    pub fn induced(&self, keep: &VertexNumbers) -> Self {
        let vertices = Vertices::derived(&self.vertices, true, keep);
        let mut graph = self.skeleton(vertices);
        graph.copy_edges(self, &EdgeNumbers::new());
        graph
    }

    /// Creates the subgraph obtained by removing the listed vertices (and
    /// their incident edges) and the listed edges.
    pub fn without(&self, vremove: &VertexNumbers, eremove: &EdgeNumbers) -> Self {
        let vertices = Vertices::derived(&self.vertices, false, vremove);
        let mut graph = self.skeleton(vertices);
        graph.copy_edges(self, eremove);
        graph
    }

    /// Contracts the two specified vertices. The contracted vertex is a new
    /// vertex with a new id carrying the label, color, and position of the
    /// lower-numbered endpoint; its contracted set is the union described in
    /// [`contract_sets`](Graph::contract_sets). Fails with
    /// [`GraphError::SameVertexContract`] when the endpoints coincide.
    pub fn contract(&self, from: VertexNumber, to: VertexNumber) -> Result<Self> {
        if from == to {
            return Err(GraphError::SameVertexContract(to));
        }
        let fragment: VertexNumbers = [from, to].iter().copied().collect();
        self.contract_sets(&[fragment])
    }

    /// Contracts every fragment of two or more vertices into a single new
    /// vertex. Empty and singleton fragments are ignored. A vertex may
    /// appear in at most one fragment.
    ///
    /// The contracted set of each replacement vertex is the union over the
    /// fragment members of: the member's own id, for members that are not
    /// themselves contractions; otherwise the member's entire contracted
    /// set. Edges are remapped to the replacement vertices; edges interior
    /// to a fragment are discarded, as are parallel edges when multiple
    /// edges are disabled.
    pub fn contract_sets(&self, fragments: &[VertexNumbers]) -> Result<Self> {
        // Where each fragment member is going. A vertex can only appear once.
        let mut destination: HashMap<VertexNumber, usize> = HashMap::new();
        let mut targets = VertexNumbers::new();
        let mut fragment_index = 0;
        for fragment in fragments {
            if fragment.len() <= 1 {
                continue;
            }
            for &member in fragment {
                if member >= self.order() {
                    return Err(GraphError::VertexOutOfRange(member));
                }
                if destination.insert(member, fragment_index).is_some() {
                    return Err(GraphError::SameVertexContract(member));
                }
                targets.insert(member);
            }
            fragment_index += 1;
        }

        // Survivors first, then one replacement vertex per fragment.
        let mut vertices = Vertices::derived(&self.vertices, false, &targets);
        let mut replacements: Vec<VertexNumber> = Vec::new();
        for fragment in fragments {
            if fragment.len() <= 1 {
                continue;
            }
            let mut all = VertexIds::new();
            let mut representative: Option<VertexNumber> = None;
            for &member in fragment {
                representative.get_or_insert(member);
                let v = self.vertex(member);
                if v.contracted().is_empty() {
                    all.insert(v.id());
                } else {
                    all.extend(v.contracted().iter().copied());
                }
            }
            if let Some(first) = representative {
                vertices.add_contracted(self.vertex(first), all);
                replacements.push(vertices.len() - 1);
            }
        }

        let mut graph = self.skeleton(vertices);

        // Merge the edges, discarding those interior to a fragment and any
        // parallels that the merge would create.
        for e in &self.edges {
            let from = self.find_by_id(e.from());
            let to = self.find_by_id(e.to());
            if let (Some(efrom), Some(eto)) = (from, to) {
                let new_from = match destination.get(&efrom) {
                    Some(&ic) => Some(replacements[ic]),
                    None => graph.find_by_id(self.vertex(efrom).id()),
                };
                let new_to = match destination.get(&eto) {
                    Some(&ic) => Some(replacements[ic]),
                    None => graph.find_by_id(self.vertex(eto).id()),
                };
                if let (Some(nf), Some(nt)) = (new_from, new_to) {
                    if nf == nt {
                        continue;
                    }
                    if graph.adjacent(nf, nt) && !graph.flags().multiple {
                        continue;
                    }
                    graph.insert_edge(nf, nt, e.label(), e.color(), e.weight());
                }
            }
        }
        Ok(graph)
    }

    /// A new graph over the given vertex table with no edges and a fresh
    /// connection matrix, inheriting this graph's edge semantics.
    fn skeleton(&self, vertices: Vertices) -> Self {
        Self {
            connections: Connections::new(vertices.len(), self.flags()),
            vertices,
            edges: Vec::new(),
        }
    }

    /// Carries over every source edge not marked for removal whose endpoints
    /// both resolve in this graph.
    fn copy_edges(&mut self, source: &Graph, eremove: &EdgeNumbers) {
        for (number, e) in source.edges.iter().enumerate() {
            if eremove.contains(&number) {
                continue;
            }
            if let (Some(from), Some(to)) = (self.find_by_id(e.from()), self.find_by_id(e.to())) {
                self.insert_edge(from, to, e.label(), e.color(), e.weight());
            }
        }
    }

    /// Adds a known-legal edge: derivation paths establish legality before
    /// calling.
    fn insert_edge(
        &mut self,
        from: VertexNumber,
        to: VertexNumber,
        label: Option<&str>,
        color: Color,
        weight: Weight,
    ) -> Degree {
        let fid = self.vertices.get(from).id();
        let tid = self.vertices.get(to).id();
        let number = self.edges.len();
        self.edges
            .push(Edge::new(fid, tid, label.map(str::to_string), color, weight));
        self.connections.insert(from, to, number)
    }

    // ---- queries ----------------------------------------------------

    pub fn flags(&self) -> Flags {
        self.connections.flags()
    }

    /// The number of vertices.
    pub fn order(&self) -> VertexNumber {
        self.vertices.len()
    }

    /// The number of edges.
    pub fn size(&self) -> EdgeNumber {
        self.edges.len()
    }

    /// A null graph has no vertices (and therefore no edges).
    pub fn is_null(&self) -> bool {
        self.order() == 0
    }

    /// An empty graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Every pair of distinct vertices is adjacent. Not cached, so this is
    /// an expensive call.
    pub fn is_complete(&self) -> bool {
        let n = self.order();
        if n < 2 {
            return true;
        }
        (0..n).all(|v| self.degree(v) >= n - 1)
    }

    /// Gets a vertex by number. Panics when the number is out of range; use
    /// [`try_vertex`](Graph::try_vertex) for a checked lookup.
    pub fn vertex(&self, number: VertexNumber) -> &Vertex {
        self.vertices.get(number)
    }

    pub fn vertex_mut(&mut self, number: VertexNumber) -> &mut Vertex {
        self.vertices.get_mut(number)
    }

    pub fn try_vertex(&self, number: VertexNumber) -> Result<&Vertex> {
        if number >= self.order() {
            return Err(GraphError::VertexOutOfRange(number));
        }
        Ok(self.vertices.get(number))
    }

    /// Gets an edge by number. Panics when the number is out of range; use
    /// [`try_edge`](Graph::try_edge) for a checked lookup.
    pub fn edge(&self, number: EdgeNumber) -> &Edge {
        &self.edges[number]
    }

    pub fn try_edge(&self, number: EdgeNumber) -> Result<&Edge> {
        self.edges
            .get(number)
            .ok_or(GraphError::EdgeOutOfRange(number))
    }

    /// The edge numbers joining the two vertices.
    pub fn edges_between(&self, from: VertexNumber, to: VertexNumber) -> &Edges {
        self.connections.edges(from, to)
    }

    pub fn adjacent(&self, from: VertexNumber, to: VertexNumber) -> bool {
        self.connections.adjacent(from, to)
    }

    /// The neighbors of a vertex, by vertex number.
    pub fn neighbors(&self, vertex: VertexNumber) -> VertexNumbers {
        (0..self.order())
            .filter(|&other| self.adjacent(vertex, other))
            .collect()
    }

    pub fn degree(&self, vertex: VertexNumber) -> Degree {
        self.connections.degree(vertex)
    }

    pub fn in_degree(&self, vertex: VertexNumber) -> Degree {
        self.connections.in_degree(vertex)
    }

    pub fn out_degree(&self, vertex: VertexNumber) -> Degree {
        self.connections.out_degree(vertex)
    }

    /// The degree extrema are recomputed on demand: expensive calls.
    pub fn min_degree(&self) -> Degree {
        self.connections.min_out_degree()
    }

    pub fn max_degree(&self) -> Degree {
        self.connections.max_out_degree()
    }

    /// Finds a vertex number by invariant vertex id.
    pub fn find_by_id(&self, id: VertexId) -> Option<VertexNumber> {
        self.vertices.find_by_id(id)
    }

    /// Finds a vertex number by label.
    pub fn find_by_label(&self, label: &str) -> Option<VertexNumber> {
        self.vertices.find_by_label(label)
    }

    /// As [`find_by_id`](Graph::find_by_id), but a miss is an error.
    pub fn require_by_id(&self, id: VertexId) -> Result<VertexNumber> {
        self.find_by_id(id).ok_or(GraphError::VertexNotFound(id))
    }

    /// As [`find_by_label`](Graph::find_by_label), but a miss is an error.
    pub fn require_by_label(&self, label: &str) -> Result<VertexNumber> {
        self.find_by_label(label)
            .ok_or_else(|| GraphError::LabelNotFound(label.to_string()))
    }

    /// Converts a set of invariant vertex ids to current vertex numbers.
    /// Any unknown id is an error.
    pub fn ids_to_numbers(&self, ids: &VertexIds) -> Result<VertexNumbers> {
        ids.iter().map(|&id| self.require_by_id(id)).collect()
    }

    // ---- mutation ---------------------------------------------------

    /// Adds an unlabeled edge between the two vertices. Fails with
    /// [`GraphError::MultipleEdge`] or [`GraphError::LoopEdge`] when the
    /// corresponding semantics are disabled, and with
    /// [`GraphError::VertexOutOfRange`] for an invalid endpoint. Returns the
    /// resulting number of edges joining the two endpoints.
    pub fn join(&mut self, from: VertexNumber, to: VertexNumber) -> Result<Degree> {
        self.join_with(EdgeValues::between(from, to))
    }

    /// Adds an edge with the specified attribute values.
    pub fn join_with(&mut self, values: EdgeValues) -> Result<Degree> {
        self.connections.check(values.from, values.to)?;
        Ok(self.insert_edge(
            values.from,
            values.to,
            values.label.as_deref(),
            values.color,
            values.weight,
        ))
    }

    /// Adds all of the specified edges.
    pub fn join_all<E>(&mut self, edges: E) -> Result<()>
    where
        E: IntoIterator<Item = EdgeValues>,
    {
        for values in edges {
            self.join_with(values)?;
        }
        Ok(())
    }

    /// Adds every missing edge, in place.
    pub fn make_complete(&mut self) {
        let n = self.order();
        for (i, j) in (0..n).tuple_combinations() {
            if !self.adjacent(i, j) {
                self.insert_edge(i, j, None, NOCOLOR, FREE);
            }
        }
    }

    /// Changes (or clears) the label of a vertex. Fails with
    /// [`GraphError::DuplicateLabel`] when the label is already in use by a
    /// different vertex.
    pub fn set_label(&mut self, number: VertexNumber, label: Option<&str>) -> Result<()> {
        if number >= self.order() {
            return Err(GraphError::VertexOutOfRange(number));
        }
        self.vertices.set_label(number, label)
    }

    /// True when every vertex is colored and no edge joins two vertices of
    /// the same color.
    pub fn proper(&self) -> bool {
        let n = self.order();
        if (0..n).any(|v| self.vertex(v).color() == NOCOLOR) {
            return false;
        }
        (0..n)
            .tuple_combinations()
            .all(|(i, j)| !self.adjacent(i, j) || self.vertex(i).color() != self.vertex(j).color())
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in 0..self.order() {
            let neighbors = self.neighbors(v).iter().map(|w| w.to_string()).join(",");
            writeln!(f, "{}: {}", v, neighbors)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn labels(names: &[&str]) -> Vec<VertexValues> {
        names
            .iter()
            .map(|name| VertexValues::labeled(name, 0.0, 0.0))
            .collect()
    }

    fn pairs(edges: &[(VertexNumber, VertexNumber)]) -> Vec<EdgeValues> {
        edges.iter().map(|&pair| pair.into()).collect()
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new(5);
        assert_eq!(g.order(), 5);
        assert_eq!(g.size(), 0);
        assert!(!g.is_null());
        assert!(g.is_empty());
        assert!(!g.is_complete());
        assert_eq!(g.min_degree(), 0);
        assert_eq!(g.max_degree(), 0);
    }

    #[test]
    fn null_graph() {
        let g = Graph::new(0);
        assert!(g.is_null());
        assert!(g.is_empty());
        assert!(g.is_complete());
    }

    #[test]
    fn build_and_lookup() {
        let g = Graph::build(labels(&["a", "b", "c"]), pairs(&[(0, 1), (1, 2)])).unwrap();
        assert_eq!(g.order(), 3);
        assert_eq!(g.size(), 2);
        assert!(g.adjacent(0, 1));
        assert!(g.adjacent(2, 1));
        assert!(!g.adjacent(0, 2));
        assert_eq!(g.degree(1), 2);
        for v in 0..3 {
            assert_eq!(g.find_by_id(g.vertex(v).id()), Some(v));
        }
        assert_eq!(g.find_by_label("b"), Some(1));
        assert_eq!(g.find_by_label("z"), None);
        assert_eq!(
            g.require_by_label("z"),
            Err(GraphError::LabelNotFound("z".to_string()))
        );
        assert_eq!(g.require_by_id(99), Err(GraphError::VertexNotFound(99)));
        // Edges resolve their endpoints by id.
        let e = g.edge(0);
        assert_eq!(e.from(), g.vertex(0).id());
        assert_eq!(e.to(), g.vertex(1).id());
        assert_eq!(g.edges_between(0, 1), &vec![0]);
    }

    #[test]
    fn simple_policing() {
        let mut g = Graph::new(6);
        g.join(4, 5).unwrap();
        assert_eq!(
            g.join(4, 5),
            Err(GraphError::MultipleEdge { from: 4, to: 5 })
        );
        assert_eq!(g.join(5, 5), Err(GraphError::LoopEdge(5)));
        assert_eq!(g.join(0, 6), Err(GraphError::VertexOutOfRange(6)));
        assert_eq!(g.size(), 1);
    }

    #[test]
    fn complement_inverts_adjacency() {
        let g = Graph::build(
            (0..4).map(|_| VertexValues::default()),
            pairs(&[(0, 1), (1, 2), (2, 3)]),
        )
        .unwrap();
        let c = g.complement();
        assert_eq!(c.order(), 4);
        assert_eq!(c.size(), 4 * 3 / 2 - g.size());
        for (i, j) in (0..4).tuple_combinations() {
            assert_eq!(c.adjacent(i, j), !g.adjacent(i, j));
        }
        // Vertex attributes, ids included, carry over.
        for v in 0..4 {
            assert_eq!(c.vertex(v).id(), g.vertex(v).id());
        }
    }

    #[test]
    fn induced_subgraph() {
        let g = Graph::build(
            labels(&["a", "b", "c", "d"]),
            pairs(&[(0, 1), (0, 2), (1, 2), (2, 3)]),
        )
        .unwrap();
        let keep: VertexNumbers = [0, 2, 3].iter().copied().collect();
        let s = g.induced(&keep);
        assert_eq!(s.order(), 3);
        assert_eq!(s.size(), 2);
        // Ids survive, numbers shift.
        assert_eq!(s.find_by_label("c"), Some(1));
        assert_eq!(s.vertex(1).id(), g.vertex(2).id());
        assert!(s.adjacent(0, 1));
        assert!(s.adjacent(1, 2));
        assert!(!s.adjacent(0, 2));
    }

    #[test]
    fn remove_subgraph() {
        let g = Graph::build(
            (0..4).map(|_| VertexValues::default()),
            pairs(&[(0, 1), (0, 2), (1, 2), (2, 3)]),
        )
        .unwrap();
        let vremove: VertexNumbers = [1].iter().copied().collect();
        let eremove: EdgeNumbers = [3].iter().copied().collect();
        let s = g.without(&vremove, &eremove);
        assert_eq!(s.order(), 3);
        // Edge (0,2) survives; (0,1) and (1,2) lost a vertex, (2,3) removed.
        assert_eq!(s.size(), 1);
        assert!(s.adjacent(0, 1));
    }

    #[test]
    fn contract_pair() {
        // Triangle plus a pendant: contracting the pendant edge leaves a
        // triangle; contracting a triangle edge leaves a single edge.
        let g = Graph::build(
            (0..4).map(|_| VertexValues::default()),
            pairs(&[(0, 1), (0, 2), (1, 2), (2, 3)]),
        )
        .unwrap();
        let c = g.contract(2, 3).unwrap();
        assert_eq!(c.order(), 3);
        assert_eq!(c.size(), 3);
        let merged = c.order() - 1;
        let expected: VertexIds = [g.vertex(2).id(), g.vertex(3).id()].iter().copied().collect();
        assert_eq!(c.vertex(merged).contracted(), &expected);
        // The replacement vertex has a brand-new id.
        assert_eq!(g.find_by_id(c.vertex(merged).id()), None);
        assert!(c.is_complete());

        let e = g.contract(0, 1).unwrap();
        assert_eq!(e.order(), 3);
        // Parallel edges into the merged vertex collapse.
        assert_eq!(e.size(), 2);
    }

    #[test]
    fn contraction_history_accumulates() {
        let g = Graph::new(4);
        let ids: Vec<VertexId> = (0..4).map(|v| g.vertex(v).id()).collect();
        let once = g.contract(0, 1).unwrap();
        // The contracted vertex is now last; fold in another original.
        let merged = once.order() - 1;
        let twice = once.contract(merged, 0).unwrap();
        let merged = twice.order() - 1;
        let expected: VertexIds = [ids[0], ids[1], ids[2]].iter().copied().collect();
        assert_eq!(twice.vertex(merged).contracted(), &expected);
    }

    #[test]
    fn contract_same_vertex_fails() {
        let g = Graph::new(4);
        assert_eq!(
            g.contract(3, 3).unwrap_err(),
            GraphError::SameVertexContract(3)
        );
        let overlapping = [
            [0, 1].iter().copied().collect::<VertexNumbers>(),
            [1, 2].iter().copied().collect::<VertexNumbers>(),
        ];
        assert_eq!(
            g.contract_sets(&overlapping).unwrap_err(),
            GraphError::SameVertexContract(1)
        );
    }

    #[test]
    fn contract_disjoint_sets() {
        let g = Graph::build(
            (0..6).map(|_| VertexValues::default()),
            pairs(&[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]),
        )
        .unwrap();
        let fragments = [
            [0, 1].iter().copied().collect::<VertexNumbers>(),
            [3, 4].iter().copied().collect::<VertexNumbers>(),
        ];
        let c = g.contract_sets(&fragments).unwrap();
        assert_eq!(c.order(), 4);
        // C6 with two opposite edges contracted is C4.
        assert_eq!(c.size(), 4);
        assert!((0..c.order()).all(|v| c.degree(v) == 2));
    }

    #[test]
    fn make_complete_and_proper() {
        let mut g = Graph::new(4);
        g.make_complete();
        assert!(g.is_complete());
        assert_eq!(g.size(), 6);
        assert!(!g.proper());
        for v in 0..4 {
            g.vertex_mut(v).set_color(v as Color + 1);
        }
        assert!(g.proper());
        g.vertex_mut(3).set_color(1);
        assert!(!g.proper());
    }

    #[test]
    fn display_lists_adjacency() {
        let mut g = Graph::new(3);
        g.join(0, 1).unwrap();
        g.join(0, 2).unwrap();
        assert_eq!(format!("{}", g), "0: 1,2\n1: 0\n2: 0\n");
    }
}
