//! Bron–Kerbosch maximal clique enumeration

use log::debug;

use crate::algo::{Algorithm, Runtime};
use crate::errors::Result;
use crate::graph::{Graph, VertexNumber, VertexNumbers};

/// A maximal clique, as a set of vertex numbers.
pub type Clique = VertexNumbers;
pub type Cliques = Vec<Clique>;

/// The two published refinements of the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Version 1: extend through every candidate in turn.
    Simple,
    /// Version 2: pick the pivot with the fewest candidate non-neighbors
    /// and extend only through the candidates it does not cover.
    Pivot,
}

/// What the enumeration looks for and saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Count and save every maximal clique.
    All,
    /// Count every maximal clique; save those of maximum cardinality.
    MaxOnly,
    /// Save only the first maximum clique found, and abandon branches that
    /// cannot beat it. Not every maximal clique is counted in this mode.
    FirstMax,
}

/// The Bron–Kerbosch–Schell algorithm for finding the maximal cliques of a
/// simple undirected graph.
///
/// At every recursion node the current clique accumulator is a clique, each
/// candidate is adjacent to all of it, each used vertex is adjacent to all
/// of it, and the candidate and used lists are disjoint. A node with both
/// lists empty has found a maximal clique.
///
/// A `found` callback sees each maximal clique as it is identified; a false
/// return unwinds the search cleanly, with `execute` returning `Ok(false)`
/// and the counters and saved cliques still valid.
pub struct Bron<'a> {
    graph: &'a Graph,
    variant: Variant,
    mode: Mode,
    save: bool,
    found: Option<Box<dyn FnMut(&Clique) -> bool + 'a>>,
    runtime: Runtime,
    current: Vec<VertexNumber>,
    cliques: Cliques,
    total: u64,
    number: usize,
}

impl<'a> Bron<'a> {
    /// Creates an enumeration of every maximal clique of the graph.
    pub fn new(graph: &'a Graph, variant: Variant) -> Self {
        Self::with_mode(graph, variant, Mode::All)
    }

    pub fn with_mode(graph: &'a Graph, variant: Variant, mode: Mode) -> Self {
        Self {
            graph,
            variant,
            mode,
            save: true,
            found: None,
            runtime: Runtime::default(),
            current: Vec::new(),
            cliques: Cliques::new(),
            total: 0,
            number: 0,
        }
    }

    /// Disabling save counts maximal cliques without keeping them; any
    /// needed clique processing is then up to the found callback.
    pub fn save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Installs a callback invoked for each maximal clique. Returning false
    /// aborts the enumeration.
    pub fn on_found<F>(mut self, found: F) -> Self
    where
        F: FnMut(&Clique) -> bool + 'a,
    {
        self.found = Some(Box::new(found));
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The saved cliques, in discovery order.
    pub fn cliques(&self) -> &Cliques {
        &self.cliques
    }

    /// The number of maximal cliques found. In `FirstMax` mode this can
    /// undercount the maximal cliques of the graph.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The order of the largest found clique: the clique number, on an
    /// uninterrupted run in `All` or `MaxOnly` mode.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Registers the accumulator as a maximal clique. Returns false when
    /// the found callback asks to stop.
    fn accept(&mut self) -> bool {
        let clique: Clique = self.current.iter().copied().collect();
        if let Some(found) = self.found.as_mut() {
            if !found(&clique) {
                return false;
            }
        }
        let n = clique.len();
        let bigger = n > self.number;
        if self.save {
            match self.mode {
                Mode::All => self.cliques.push(clique),
                Mode::MaxOnly => {
                    if bigger {
                        self.cliques.clear();
                    }
                    if n >= self.number {
                        self.cliques.push(clique);
                    }
                }
                Mode::FirstMax => {
                    if bigger {
                        self.cliques.clear();
                        self.cliques.push(clique);
                    }
                }
            }
        }
        if bigger {
            self.number = n;
        }
        self.total += 1;
        true
    }

    /// Version 1: works through the candidates in turn, keeping the used
    /// list to guarantee maximality. Returns false if aborted.
    fn extend_simple(&mut self, mut candidates: Vec<VertexNumber>, mut used: Vec<VertexNumber>) -> bool {
        self.runtime.add_call();
        let g = self.graph;

        // With only the clique number wanted, abandon branches that cannot
        // construct a clique larger than the current maximum.
        if self.mode == Mode::FirstMax && self.current.len() + candidates.len() <= self.number {
            self.runtime.done_call();
            return true;
        }

        while !candidates.is_empty() {
            // A used vertex adjacent to every remaining candidate makes
            // every clique from this point non-maximal.
            if used
                .iter()
                .any(|&u| candidates.iter().all(|&c| g.adjacent(u, c)))
            {
                self.runtime.done_call();
                return true;
            }

            let selected = match candidates.pop() {
                Some(vertex) => vertex,
                None => break,
            };
            self.current.push(selected);

            // Only candidates and used vertices adjacent to the selection
            // remain eligible below it.
            let next_candidates = candidates
                .iter()
                .copied()
                .filter(|&c| g.adjacent(selected, c))
                .collect();
            let next_used = used
                .iter()
                .copied()
                .filter(|&u| g.adjacent(selected, u))
                .collect();

            if !self.extend_simple(next_candidates, next_used) {
                self.runtime.done_call();
                return false;
            }

            self.current.pop();
            used.push(selected);
        }

        // Every candidate has been tried; the accumulator is maximal if
        // nothing used is left adjacent to it.
        if used.is_empty() && !self.accept() {
            self.runtime.done_call();
            return false;
        }
        self.runtime.done_call();
        true
    }

    /// Version 2: extends only through the candidates not covered by the
    /// pivot. Returns false if aborted.
    fn extend_pivot(&mut self, mut candidates: Vec<VertexNumber>, mut used: Vec<VertexNumber>) -> bool {
        self.runtime.add_call();
        let g = self.graph;

        if self.mode == Mode::FirstMax && self.current.len() + candidates.len() <= self.number {
            self.runtime.done_call();
            return true;
        }

        // Pick the pivot with the fewest candidate non-neighbors: first the
        // best used vertex, then any candidate with strictly fewer. A
        // candidate counts itself among its non-neighbors.
        let non_neighbors =
            |pivot: VertexNumber| candidates.iter().filter(|&&c| !g.adjacent(pivot, c)).count();
        let mut best: Option<(VertexNumber, usize, bool)> = None;
        for &u in used.iter() {
            let count = non_neighbors(u);
            if best.map_or(true, |(_, fewest, _)| count < fewest) {
                best = Some((u, count, false));
            }
        }

        // A used vertex adjacent to every candidate blocks all remaining
        // maximal cliques.
        if let Some((_, 0, _)) = best {
            self.runtime.done_call();
            return true;
        }

        for &c in candidates.iter() {
            let count = non_neighbors(c);
            if best.map_or(true, |(_, fewest, _)| count < fewest) {
                best = Some((c, count, true));
            }
        }

        if let Some((pivot, _, is_candidate)) = best {
            let mut targets: Vec<VertexNumber> = candidates
                .iter()
                .copied()
                .filter(|&c| !g.adjacent(pivot, c))
                .collect();
            if is_candidate {
                // A candidate pivot extends first.
                targets.retain(|&c| c != pivot);
                targets.insert(0, pivot);
            }

            for selected in targets {
                candidates.retain(|&c| c != selected);
                self.current.push(selected);

                let next_candidates = candidates
                    .iter()
                    .copied()
                    .filter(|&c| g.adjacent(selected, c))
                    .collect();
                let next_used = used
                    .iter()
                    .copied()
                    .filter(|&u| g.adjacent(selected, u))
                    .collect();

                if !self.extend_pivot(next_candidates, next_used) {
                    self.runtime.done_call();
                    return false;
                }

                self.current.pop();
                used.push(selected);
            }
        }

        if candidates.is_empty() && used.is_empty() && !self.accept() {
            self.runtime.done_call();
            return false;
        }
        self.runtime.done_call();
        true
    }
}

impl<'a> Algorithm for Bron<'a> {
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
        self.current.clear();
        self.cliques.clear();
        self.total = 0;
        self.number = 0;

        let n = self.graph.order();
        if n == 0 {
            return Ok(true);
        }

        // At first every vertex is a candidate and nothing has been used.
        // The list is kept in descending order so that extension proceeds
        // from the lowest-numbered vertex.
        let candidates: Vec<VertexNumber> = (0..n).rev().collect();
        let finished = match self.variant {
            Variant::Simple => self.extend_simple(candidates, Vec::new()),
            Variant::Pivot => self.extend_pivot(candidates, Vec::new()),
        };
        debug!(
            "bron: n={} total={} number={} finished={}",
            n, self.total, self.number, finished
        );
        Ok(finished)
    }
}
