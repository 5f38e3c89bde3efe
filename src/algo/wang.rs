//! Wang chromatic number search over maximal independent sets

use crate::algo::bron::{Bron, Variant};
use crate::algo::{Algorithm, Runtime, VertexColoring};
use crate::errors::Result;
use crate::graph::{Color, EdgeNumbers, Graph, VertexIds, VertexNumbers};

/// The Wang algorithm for the chromatic number: a depth-first refinement of
/// Christofides.
///
/// At each node the MISs of the uncovered subgraph are enumerated and the
/// uncovered vertex occurring in the fewest of them is targeted; since every
/// complete coloring must color that vertex exactly once, only the MISs
/// containing it spawn subtrees. Subtrees at least as deep as the best
/// complete coloring found so far are pruned.
pub struct Wang<'a> {
    graph: &'a Graph,
    runtime: Runtime,
    number: Color,
    coloring: Vec<VertexNumbers>,
}

impl<'a> Wang<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            runtime: Runtime::default(),
            number: 0,
            coloring: Vec::new(),
        }
    }

    fn next_states(
        &mut self,
        complement: &Graph,
        classes: &[VertexIds],
        covered: &VertexIds,
    ) -> Result<()> {
        self.runtime.add_call();

        // One more class is the last chance for this subtree once the best
        // known coloring would be matched anyway.
        let last = self.number > 0 && (classes.len() + 1) as Color >= self.number;

        // MISs of the uncovered vertices are maximal cliques of the
        // uncovered part of the complement.
        let covered_numbers = complement.ids_to_numbers(covered)?;
        let subgraph = complement.without(&covered_numbers, &EdgeNumbers::new());

        let mut miss = Bron::new(&subgraph, Variant::Pivot);
        miss.execute()?;

        // Count how often each uncovered vertex occurs in a MIS, and target
        // the rarest: it has the fewest ways of ever being colored.
        let m = subgraph.order();
        let mut occurrences = vec![0usize; m];
        for mis in miss.cliques() {
            for &v in mis {
                occurrences[v] += 1;
            }
        }
        let target = match (0..m).min_by_key(|&v| occurrences[v]) {
            Some(vertex) => vertex,
            None => {
                self.runtime.done_call();
                return Ok(());
            }
        };

        for mis in miss.cliques().iter().filter(|mis| mis.contains(&target)) {
            let ids: VertexIds = mis.iter().map(|&v| subgraph.vertex(v).id()).collect();

            let mut next_classes = classes.to_vec();
            next_classes.push(ids.clone());
            let mut next_covered = covered.clone();
            next_covered.extend(ids.iter().copied());

            if next_covered.len() >= self.graph.order() {
                if self.number == 0 || (next_classes.len() as Color) < self.number {
                    self.record(&next_classes)?;
                }
                continue;
            }

            if !last {
                self.next_states(complement, &next_classes, &next_covered)?;
            }
        }

        self.runtime.done_call();
        Ok(())
    }

    /// Registers a new smallest complete coloring.
    fn record(&mut self, classes: &[VertexIds]) -> Result<()> {
        self.coloring = classes
            .iter()
            .map(|ids| self.graph.ids_to_numbers(ids))
            .collect::<Result<Vec<VertexNumbers>>>()?;
        self.number = self.coloring.len() as Color;
        Ok(())
    }
}

impl<'a> Algorithm for Wang<'a> {
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

        if self.graph.order() == 0 {
            return Ok(true);
        }

        let complement = self.graph.complement();
        self.next_states(&complement, &[], &VertexIds::new())?;
        Ok(true)
    }
}

impl<'a> VertexColoring for Wang<'a> {
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
    use std::collections::BTreeSet;

    fn check(graph: &Graph, expected: Color) {
        let mut wang = Wang::new(graph);
        assert!(wang.execute().unwrap());
        assert_eq!(wang.number(), expected);
        if expected > 0 {
            let mut painted = graph.clone();
            wang.apply(&mut painted);
            assert!(painted.proper());
            let covered: usize = wang.coloring().iter().map(BTreeSet::len).sum();
            assert_eq!(covered, graph.order());
        }
    }

    #[test]
    fn null_graph() {
        let g = Graph::new(0);
        let mut wang = Wang::new(&g);
        assert!(wang.execute().unwrap());
        assert_eq!(wang.calls(), 0);
        assert_eq!(wang.number(), 0);
    }

    #[test]
    fn trivial_graph() {
        let g = Graph::new(1);
        let mut wang = Wang::new(&g);
        assert!(wang.execute().unwrap());
        assert_eq!(wang.calls(), 1);
        assert_eq!(wang.number(), 1);
        assert_eq!(wang.coloring(), &[[0].iter().copied().collect::<VertexNumbers>()]);
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new(10);
        let mut wang = Wang::new(&g);
        assert!(wang.execute().unwrap());
        assert_eq!(wang.calls(), 1);
        assert_eq!(wang.number(), 1);
        assert_eq!(wang.coloring()[0].len(), 10);
    }

    #[test]
    fn complete_graph() {
        let mut g = Graph::new(10);
        g.make_complete();
        let mut wang = Wang::new(&g);
        assert!(wang.execute().unwrap());
        assert_eq!(wang.calls(), 10);
        assert_eq!(wang.number(), 10);
    }

    #[test]
    fn odd_cycle() {
        let mut g = Graph::new(5);
        for v in 0..5 {
            g.join(v, (v + 1) % 5).unwrap();
        }
        check(&g, 3);
    }

    #[test]
    fn petersen_graph() {
        // Outer C5, inner pentagram, spokes: χ = 3.
        let mut g = Graph::new(10);
        for v in 0..5 {
            g.join(v, (v + 1) % 5).unwrap();
            g.join(5 + v, 5 + (v + 2) % 5).unwrap();
            g.join(v, 5 + v).unwrap();
        }
        check(&g, 3);
    }
}
