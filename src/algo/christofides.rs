//! Christofides chromatic number search over maximal independent sets

use crate::algo::bron::{Bron, Variant};
use crate::algo::{Algorithm, Runtime, VertexColoring};
use crate::errors::Result;
use crate::graph::{Color, EdgeNumbers, Graph, VertexIds, VertexNumbers};

/// A partial coloring: an ordered list of MISs and the union of the
/// vertices (by id) they cover.
#[derive(Debug, Default, Clone)]
struct Partial {
    classes: Vec<VertexIds>,
    covered: VertexIds,
}

/// The Christofides algorithm for the chromatic number.
///
/// Searches breadth-first over partial colorings, where a partial coloring
/// is an ordered list of maximal independent sets. Each level extends every
/// current partial with each MIS of the subgraph induced by its uncovered
/// vertices (a MIS of G being a maximal clique of the complement of G).
/// Partials whose covered set is contained in another's are discarded. The
/// first partial to cover every vertex realizes the chromatic number.
pub struct Christofides<'a> {
    graph: &'a Graph,
    runtime: Runtime,
    number: Color,
    coloring: Vec<VertexNumbers>,
}

impl<'a> Christofides<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            runtime: Runtime::default(),
            number: 0,
            coloring: Vec::new(),
        }
    }
}

impl<'a> Algorithm for Christofides<'a> {
    fn graph(&self) -> &Graph {
        self.graph
    }

    fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    fn run(&mut self) -> Result<bool> {
        self.number = 0;
        self.coloring.clear();

        let n = self.graph.order();
        if n == 0 {
            return Ok(true);
        }

        let complement = self.graph.complement();

        // Seed with the empty coloring and extend level by level until the
        // first complete covering appears.
        let mut current = vec![Partial::default()];
        let mut chromatic: Option<Vec<VertexIds>> = None;

        while chromatic.is_none() {
            let mut next: Vec<Partial> = Vec::new();

            for partial in &current {
                if chromatic.is_some() {
                    break;
                }

                // MISs of the uncovered vertices are maximal cliques of the
                // uncovered part of the complement.
                let covered_numbers = complement.ids_to_numbers(&partial.covered)?;
                let subgraph = complement.without(&covered_numbers, &EdgeNumbers::new());

                let runtime = &mut self.runtime;
                let found = &mut chromatic;
                let level = &mut next;
                let mut miss = Bron::new(&subgraph, Variant::Pivot)
                    .save(false)
                    .on_found(|mis| {
                        runtime.add_call();

                        // The MIS arrives as subgraph vertex numbers;
                        // ids are the stable currency between graphs.
                        let ids: VertexIds =
                            mis.iter().map(|&v| subgraph.vertex(v).id()).collect();
                        let mut covered = partial.covered.clone();
                        covered.extend(ids.iter().copied());

                        // Discard the extension if something at this level
                        // already covers at least as much; displace
                        // whatever it dominates.
                        if level.iter().any(|other| covered.is_subset(&other.covered)) {
                            runtime.done_call();
                            return true;
                        }
                        level.retain(|other| !other.covered.is_subset(&covered));

                        let mut classes = partial.classes.clone();
                        classes.push(ids);

                        if covered.len() >= n {
                            // First complete covering: χ found, stop.
                            *found = Some(classes);
                            runtime.done_call();
                            return false;
                        }

                        level.push(Partial { classes, covered });
                        runtime.done_call();
                        true
                    });
                miss.execute()?;
            }

            current = next;
        }

        if let Some(classes) = chromatic {
            self.coloring = classes
                .iter()
                .map(|ids| self.graph.ids_to_numbers(ids))
                .collect::<Result<Vec<VertexNumbers>>>()?;
            self.number = self.coloring.len() as Color;
        }
        Ok(true)
    }
}

impl<'a> VertexColoring for Christofides<'a> {
    fn number(&self) -> Color {
        self.number
    }

    fn coloring(&self) -> &[VertexNumbers] {
        &self.coloring
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check(graph: &Graph, expected: Color) {
        let mut christofides = Christofides::new(graph);
        assert!(christofides.execute().unwrap());
        assert_eq!(christofides.number(), expected);
        if expected > 0 {
            let mut painted = graph.clone();
            christofides.apply(&mut painted);
            assert!(painted.proper());
        }
    }

    #[test]
    fn null_graph() {
        let g = Graph::new(0);
        let mut christofides = Christofides::new(&g);
        assert!(christofides.execute().unwrap());
        assert_eq!(christofides.number(), 0);
        assert!(christofides.coloring().is_empty());
    }

    #[test]
    fn empty_graph() {
        check(&Graph::new(9), 1);
    }

    #[test]
    fn complete_graph() {
        let mut g = Graph::new(6);
        g.make_complete();
        check(&g, 6);
    }

    #[test]
    fn odd_cycle() {
        let mut g = Graph::new(7);
        for v in 0..7 {
            g.join(v, (v + 1) % 7).unwrap();
        }
        check(&g, 3);
    }

    #[test]
    fn bipartite() {
        // K(2,3) is 2-chromatic.
        let mut g = Graph::new(5);
        for &left in &[0, 1] {
            for &right in &[2, 3, 4] {
                g.join(left, right).unwrap();
            }
        }
        check(&g, 2);
    }
}
