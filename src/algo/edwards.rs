//! Edwards–Elphick greedy clique lower bound

use crate::algo::{Algorithm, Runtime};
use crate::errors::Result;
use crate::graph::{Degree, Graph, VertexNumber, VertexNumbers};

/// Grows a single clique greedily from a maximum-degree seed, giving a
/// lower bound for the clique number in polynomial time.
///
/// With `smart` enabled, each extension picks the eligible vertex of
/// highest degree; otherwise the first eligible vertex wins.
pub struct CliqueEdwards<'a> {
    graph: &'a Graph,
    smart: bool,
    runtime: Runtime,
    clique: VertexNumbers,
}

impl<'a> CliqueEdwards<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_smart(graph, true)
    }

    pub fn with_smart(graph: &'a Graph, smart: bool) -> Self {
        Self {
            graph,
            smart,
            runtime: Runtime::default(),
            clique: VertexNumbers::new(),
        }
    }

    pub fn smart(&self) -> bool {
        self.smart
    }

    /// The constructed clique.
    pub fn clique(&self) -> &VertexNumbers {
        &self.clique
    }

    /// The order of the constructed clique: a lower bound for the clique
    /// number.
    pub fn number(&self) -> usize {
        self.clique.len()
    }
}

impl<'a> Algorithm for CliqueEdwards<'a> {
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
        self.clique.clear();

        let g = self.graph;
        let n = g.order();
        if n == 0 {
            return Ok(true);
        }

        // Seed with the first vertex of maximum degree.
        let maxdeg = g.max_degree();
        let mut seed = 0;
        for v in 0..n {
            self.runtime.add_step();
            if g.degree(v) >= maxdeg {
                seed = v;
                break;
            }
        }
        self.clique.insert(seed);

        // Keep extending with vertices adjacent to everything selected.
        while self.clique.len() < n {
            let mut selected: Option<VertexNumber> = None;
            let mut best: Degree = 0;

            let clique = &self.clique;
            let runtime = &mut self.runtime;
            for v in 0..n {
                // Skips already selected vertices as well, since a vertex
                // is not adjacent to itself.
                let eligible = clique.iter().all(|&c| {
                    runtime.add_step();
                    g.adjacent(v, c)
                });
                if !eligible {
                    continue;
                }
                if !self.smart {
                    selected = Some(v);
                    break;
                }
                let d = g.degree(v);
                if selected.is_none() || d > best {
                    selected = Some(v);
                    best = d;
                }
            }

            match selected {
                Some(v) => self.clique.insert(v),
                None => break,
            };
        }

        Ok(true)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_graph() {
        let g = Graph::new(0);
        let mut edwards = CliqueEdwards::new(&g);
        assert!(edwards.execute().unwrap());
        assert_eq!(edwards.number(), 0);
    }

    #[test]
    fn complete_graph() {
        let mut g = Graph::new(5);
        g.make_complete();
        let mut edwards = CliqueEdwards::new(&g);
        assert!(edwards.execute().unwrap());
        assert_eq!(edwards.number(), 5);
    }

    #[test]
    fn triangle_with_pendants() {
        // Triangle 0-1-2 with pendants on each corner.
        let mut g = Graph::new(6);
        for &(i, j) in &[(0, 1), (1, 2), (2, 0), (0, 3), (1, 4), (2, 5)] {
            g.join(i, j).unwrap();
        }
        let mut edwards = CliqueEdwards::new(&g);
        assert!(edwards.execute().unwrap());
        assert_eq!(edwards.number(), 3);
        assert_eq!(
            edwards.clique(),
            &[0, 1, 2].iter().copied().collect::<VertexNumbers>()
        );
    }

    #[test]
    fn bound_never_exceeds_omega() {
        // C5 has clique number 2.
        let mut g = Graph::new(5);
        for v in 0..5 {
            g.join(v, (v + 1) % 5).unwrap();
        }
        let mut edwards = CliqueEdwards::with_smart(&g, false);
        assert!(edwards.execute().unwrap());
        assert_eq!(edwards.number(), 2);
    }
}
