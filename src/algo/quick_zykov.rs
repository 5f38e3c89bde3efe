//! Modified Zykov search for the chromatic number

use std::collections::HashMap;

use log::debug;

use crate::algo::{Algorithm, HitCounter, Runtime, VertexColoring};
use crate::errors::Result;
use crate::format::Tracer;
use crate::graph::{
    Color, Degree, EdgeNumbers, Graph, VertexId, VertexIds, VertexNumber, VertexNumbers,
};

/// One removal along the successful search path. Removals are journaled so
/// that the final coloring can be extended back over every removed vertex.
#[derive(Debug, Clone)]
enum Removal {
    /// A vertex peeled for having degree < k: the original ids it covered
    /// and the covered sets of its neighbors at the time of removal.
    LowDegree {
        covered: VertexIds,
        neighbors: Vec<VertexIds>,
    },
    /// A vertex whose neighborhood was contained in another's: it inherits
    /// that vertex's color class.
    Subset { covered: VertexIds, into: VertexIds },
}

/// The working state of the search: the current graph plus the removal
/// journal accumulated along the path that produced it.
#[derive(Debug, Clone)]
struct State {
    graph: Graph,
    journal: Vec<Removal>,
}

/// What a scan of all vertex pairs found.
enum PairScan {
    /// N(u) ⊆ N(v): u can be removed.
    Subset(VertexNumber, VertexNumber),
    /// No subset; the smallest common-neighbor count overall and the
    /// non-adjacent pair realizing the smallest count among non-adjacent
    /// pairs (absent only for a complete graph, which the edge threshold
    /// has already excluded).
    Smallest {
        count: Degree,
        nonadjacent: Option<(VertexNumber, VertexNumber)>,
    },
}

/// A modified Zykov algorithm ("Quick Zykov") for the chromatic number.
///
/// The outer loop asks whether the graph is k-colorable for k = 2, 3, …;
/// the first success is χ. The k-colorability decision interleaves cheap
/// bounding tests with Zykov branching, in a fixed order: success when the
/// working graph has at most k vertices; failure when the edge count
/// exceeds the Turán-style threshold n²(k−1)/2k; peel every vertex of
/// degree < k; remove any vertex whose neighborhood is contained in
/// another's; failure when the smallest common-neighbor count exceeds
/// n − 2 − (n − 2)/(k − 1); otherwise branch on the non-adjacent pair with
/// the fewest common neighbors, identifying it first and separating it
/// second. Each bounding test carries a tries/hits peg counter.
///
/// With a [`Tracer`] installed, every step emits a human-readable line
/// prefixed by the step number and loop position.
pub struct QuickZykov<'a> {
    graph: &'a Graph,
    tracer: Option<&'a mut dyn Tracer>,
    runtime: Runtime,
    k: Color,
    coloring: Vec<VertexNumbers>,
    edge_threshold: HitCounter,
    small_degree: HitCounter,
    neighborhood_subset: HitCounter,
    common_neighbors: HitCounter,
}

impl<'a> QuickZykov<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            tracer: None,
            runtime: Runtime::default(),
            k: 0,
            coloring: Vec::new(),
            edge_threshold: HitCounter::default(),
            small_degree: HitCounter::default(),
            neighborhood_subset: HitCounter::default(),
            common_neighbors: HitCounter::default(),
        }
    }

    /// Creates an instance with step-by-step tracing enabled.
    pub fn with_tracer(graph: &'a Graph, tracer: &'a mut dyn Tracer) -> Self {
        let mut algorithm = Self::new(graph);
        algorithm.tracer = Some(tracer);
        algorithm
    }

    pub fn tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Effectiveness of the maximum edge threshold test.
    pub fn edge_threshold(&self) -> &HitCounter {
        &self.edge_threshold
    }

    /// Effectiveness of the small degree vertex removal test.
    pub fn small_degree(&self) -> &HitCounter {
        &self.small_degree
    }

    /// Effectiveness of the neighborhood subset test.
    pub fn neighborhood_subset(&self) -> &HitCounter {
        &self.neighborhood_subset
    }

    /// Effectiveness of the minimum common neighbors bound test.
    pub fn common_neighbors(&self) -> &HitCounter {
        &self.common_neighbors
    }

    // ---- tracing helpers --------------------------------------------

    fn note_outer(&mut self, text: String) {
        let steps = self.runtime.steps();
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.note(&format!("{}. (outer) {}", steps, text));
        }
    }

    fn note_inner(&mut self, text: String) {
        let steps = self.runtime.steps();
        let depth = self.runtime.depth();
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.note(&format!("{}. (inner-{}) {}", steps, depth, text));
        }
    }

    fn snapshot(&mut self, graph: &Graph) {
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.snapshot(graph);
        }
    }

    /// Identifies a vertex by label where present, id otherwise.
    fn identify(graph: &Graph, vertex: VertexNumber) -> String {
        let v = graph.vertex(vertex);
        match v.label() {
            Some(label) => label.to_string(),
            None => v.id().to_string(),
        }
    }

    // ---- the outer loop ---------------------------------------------

    fn outer_loop(&mut self, state: &mut State) -> Result<()> {
        // Null graphs are by definition 0-colorable.
        self.runtime.add_step();
        let n = state.graph.order();
        if state.graph.is_null() {
            self.k = 0;
            if self.tracing() {
                self.note_outer(format!("Null check: n={}: null graph is 0-colorable", n));
            }
            return Ok(());
        }
        if self.tracing() {
            self.note_outer(format!("Null check: n={}: not a null graph", n));
        }

        // Empty graphs are 1-colorable.
        self.runtime.add_step();
        let m = state.graph.size();
        if state.graph.is_empty() {
            self.k = 1;
            self.coloring = vec![(0..n).collect()];
            if self.tracing() {
                self.note_outer(format!("Empty check: m={}: empty graph is 1-colorable", m));
            }
            return Ok(());
        }
        if self.tracing() {
            self.note_outer(format!("Empty check: m={}: not an empty graph", m));
        }

        // All other graphs are 2 or more colorable. Trying k = 2, 3, … is
        // guaranteed to terminate: at worst k reaches n.
        self.runtime.add_step();
        self.k = 2;
        if self.tracing() {
            self.note_outer(format!("Initialized: k={}", self.k));
        }

        while !self.subroutine(state)? {
            self.runtime.add_step();
            self.k += 1;
            if self.tracing() {
                self.note_outer(format!("Incrementing: k={}", self.k));
            }
        }

        self.extract_coloring(state)
    }

    /// The recursion wrapper: counts the call and tracks depth.
    fn subroutine(&mut self, state: &mut State) -> Result<bool> {
        self.runtime.add_call();
        let outcome = self.is_k_colorable(state);
        self.runtime.done_call();
        outcome
    }

    // ---- the k-colorability decision --------------------------------

    fn is_k_colorable(&mut self, state: &mut State) -> Result<bool> {
        // Attempt to bound before branching.
        let branch_pair = loop {
            // Check for success: n <= k.
            self.runtime.add_step();
            if self.check_success(state) {
                return Ok(true);
            }

            // Calculate the maximum edge threshold. Complete graphs on
            // more than k vertices are always caught here.
            self.runtime.add_step();
            let a = self.max_edge_threshold(state);

            self.runtime.add_step();
            self.edge_threshold.tried();
            if !self.check_max_edges(state, a) {
                self.edge_threshold.hit();
                return Ok(false);
            }

            // Find and remove all vertices with degree < k; they can
            // always be colored last from their neighborhoods.
            self.runtime.add_step();
            let small = self.find_small_degree(state);

            self.runtime.add_step();
            self.small_degree.tried();
            if self.remove_small_degree(state, &small) {
                self.small_degree.hit();
                continue;
            }

            // Scan all pairs for a neighborhood subset, tracking the
            // common-neighbor minima along the way.
            self.runtime.add_step();
            let scan = self.scan_pairs(state);

            self.runtime.add_step();
            self.neighborhood_subset.tried();
            let (count, nonadjacent) = match scan {
                PairScan::Subset(inside, outside) => {
                    self.neighborhood_subset.hit();
                    self.remove_subset(state, inside, outside);
                    continue;
                }
                PairScan::Smallest { count, nonadjacent } => {
                    if self.tracing() {
                        self.note_inner("No neighborhood subsets found".to_string());
                    }
                    (count, nonadjacent)
                }
            };

            self.runtime.add_step();
            if self.tracing() {
                if let Some((u, v)) = nonadjacent {
                    let u = Self::identify(&state.graph, u);
                    let v = Self::identify(&state.graph, v);
                    self.note_inner(format!(
                        "Smallest common neighbors: {} and {} have {}",
                        u, v, count
                    ));
                }
            }

            // An upper bound for the smallest common-neighbor count in any
            // k-colorable graph.
            self.runtime.add_step();
            let c = self.min_common_bound(state);

            self.runtime.add_step();
            self.common_neighbors.tried();
            if !self.check_min_common(count, c) {
                self.common_neighbors.hit();
                return Ok(false);
            }

            // Every bounding test has failed: branch.
            break nonadjacent;
        };

        if let Some((u, v)) = branch_pair {
            // Assume the pair shares a color and contract it.
            self.runtime.add_step();
            if self.try_contract(state, u, v)? {
                return Ok(true);
            }

            // The same color does not work, so separate the pair.
            self.runtime.add_step();
            if self.try_add_edge(state, u, v)? {
                return Ok(true);
            }
        }

        self.runtime.add_step();
        if self.tracing() {
            self.note_inner(format!("Not {}-colorable", self.k));
        }
        Ok(false)
    }

    fn check_success(&mut self, state: &State) -> bool {
        let n = state.graph.order();
        let success = n <= self.k as usize;
        if self.tracing() {
            let verdict = if success {
                format!("graph is {}-colorable", self.k)
            } else {
                "continue".to_string()
            };
            self.note_inner(format!("Success check: n={}, k={}: {}", n, self.k, verdict));
        }
        success
    }

    fn max_edge_threshold(&mut self, state: &State) -> f64 {
        let n = state.graph.order() as f64;
        let k = self.k as f64;
        let a = n * n * (k - 1.0) / (2.0 * k);
        if self.tracing() {
            self.note_inner(format!("Maximum edge threshold: a={}", a));
        }
        a
    }

    fn check_max_edges(&mut self, state: &State, a: f64) -> bool {
        let m = state.graph.size() as f64;
        let colorable = m <= a;
        if self.tracing() {
            let verdict = if colorable {
                "continue".to_string()
            } else {
                format!("not {}-colorable", self.k)
            };
            self.note_inner(format!("Compare: m={}, a={}: {}", m, a, verdict));
        }
        colorable
    }

    fn find_small_degree(&mut self, state: &State) -> VertexNumbers {
        let g = &state.graph;
        let small: VertexNumbers = (0..g.order())
            .filter(|&v| g.degree(v) < self.k as Degree)
            .collect();
        if self.tracing() {
            self.note_inner(format!("Finding degree < {}: found {}", self.k, small.len()));
        }
        small
    }

    /// Journals and removes the found small-degree vertices. The journal
    /// entries are written as if the vertices were removed one at a time,
    /// so replaying them in reverse always finds a free color.
    fn remove_small_degree(&mut self, state: &mut State, small: &VertexNumbers) -> bool {
        if self.tracing() {
            let names = if small.is_empty() {
                " none".to_string()
            } else {
                small
                    .iter()
                    .map(|&v| format!(" {}", Self::identify(&state.graph, v)))
                    .collect()
            };
            self.note_inner(format!("Removing vertices:{}", names));
        }
        if small.is_empty() {
            return false;
        }

        let g = &state.graph;
        for &peeled in small {
            let neighbors = (0..g.order())
                .filter(|&w| {
                    g.adjacent(peeled, w) && (!small.contains(&w) || w > peeled)
                })
                .map(|w| g.vertex(w).covers())
                .collect();
            state.journal.push(Removal::LowDegree {
                covered: g.vertex(peeled).covers(),
                neighbors,
            });
        }

        state.graph = state.graph.without(small, &EdgeNumbers::new());
        self.snapshot(&state.graph);
        true
    }

    /// Scans every vertex pair, reporting either a neighborhood subset or
    /// the smallest common-neighbor counts.
    fn scan_pairs(&mut self, state: &State) -> PairScan {
        // The preceding checks guarantee an incomplete graph with n >= 2.
        let g = &state.graph;
        let n = g.order();
        if self.tracing() {
            self.note_inner("Calculating common neighbors".to_string());
        }

        let mut smallest: Option<Degree> = None;
        let mut smallest_nonadjacent: Option<(Degree, VertexNumber, VertexNumber)> = None;

        for i in 0..n {
            for j in (i + 1)..n {
                let common = (0..n)
                    .filter(|&w| g.adjacent(i, w) && g.adjacent(j, w))
                    .count();

                if common == g.degree(i) {
                    return PairScan::Subset(i, j);
                }
                if common == g.degree(j) {
                    return PairScan::Subset(j, i);
                }

                if smallest.map_or(true, |best| common < best) {
                    smallest = Some(common);
                }
                if !g.adjacent(i, j)
                    && smallest_nonadjacent.map_or(true, |(best, _, _)| common < best)
                {
                    smallest_nonadjacent = Some((common, i, j));
                }
            }
        }

        PairScan::Smallest {
            count: smallest.unwrap_or(0),
            nonadjacent: smallest_nonadjacent.map(|(_, u, v)| (u, v)),
        }
    }

    /// Journals and removes a vertex whose neighborhood is contained in
    /// another's: any coloring of the rest extends by reusing the
    /// superset's color.
    fn remove_subset(&mut self, state: &mut State, inside: VertexNumber, outside: VertexNumber) {
        if self.tracing() {
            let u = Self::identify(&state.graph, inside);
            let v = Self::identify(&state.graph, outside);
            self.note_inner(format!("N({}) in N({}): Removing {}", u, v, u));
        }
        state.journal.push(Removal::Subset {
            covered: state.graph.vertex(inside).covers(),
            into: state.graph.vertex(outside).covers(),
        });
        let removed: VertexNumbers = [inside].iter().copied().collect();
        state.graph = state.graph.without(&removed, &EdgeNumbers::new());
        self.snapshot(&state.graph);
    }

    fn min_common_bound(&mut self, state: &State) -> f64 {
        let n = state.graph.order() as f64;
        let k = self.k as f64;
        let c = n - 2.0 - (n - 2.0) / (k - 1.0);
        if self.tracing() {
            self.note_inner(format!("Minimum common neighbors upper bound: c={}", c));
        }
        c
    }

    fn check_min_common(&mut self, count: Degree, c: f64) -> bool {
        let b = count as f64;
        let colorable = b <= c;
        if self.tracing() {
            let verdict = if colorable {
                "continue".to_string()
            } else {
                format!("not {}-colorable", self.k)
            };
            self.note_inner(format!("Compare: b={}, c={}: {}", b, c, verdict));
        }
        colorable
    }

    /// Branch 1: identify the pair and recurse. The child state replaces
    /// the current one on success, carrying its journal along.
    fn try_contract(&mut self, state: &mut State, u: VertexNumber, v: VertexNumber) -> Result<bool> {
        if self.tracing() {
            let un = Self::identify(&state.graph, u);
            let vn = Self::identify(&state.graph, v);
            self.note_inner(format!("Contracting: {} and {}", un, vn));
        }
        let mut child = State {
            graph: state.graph.contract(u, v)?,
            journal: state.journal.clone(),
        };
        self.snapshot(&child.graph);
        let success = self.subroutine(&mut child)?;
        if success {
            *state = child;
        }
        Ok(success)
    }

    /// Branch 2: separate the pair and recurse.
    fn try_add_edge(&mut self, state: &mut State, u: VertexNumber, v: VertexNumber) -> Result<bool> {
        if self.tracing() {
            let un = Self::identify(&state.graph, u);
            let vn = Self::identify(&state.graph, v);
            self.note_inner(format!("Adding edge: {} and {}", un, vn));
        }
        let mut child = state.clone();
        child.graph.join(u, v)?;
        self.snapshot(&child.graph);
        let success = self.subroutine(&mut child)?;
        if success {
            *state = child;
        }
        Ok(success)
    }

    // ---- coloring extraction ----------------------------------------

    /// Builds the color classes: one class per vertex of the final graph
    /// (its covered original ids), then the journal replayed in reverse so
    /// that every peeled or reduced vertex rejoins a class. Peeled vertices
    /// had fewer than k neighbors when removed, so a free class among the
    /// first k always exists.
    fn extract_coloring(&mut self, state: &State) -> Result<()> {
        let mut classes: Vec<VertexIds> = Vec::new();
        let mut class_of: HashMap<VertexId, usize> = HashMap::new();

        let leaf = &state.graph;
        for v in 0..leaf.order() {
            let covered = leaf.vertex(v).covers();
            for &id in &covered {
                class_of.insert(id, classes.len());
            }
            classes.push(covered);
        }

        for removal in state.journal.iter().rev() {
            let (covered, index) = match removal {
                Removal::Subset { covered, into } => {
                    let index = into
                        .iter()
                        .find_map(|id| class_of.get(id).copied())
                        .unwrap_or(classes.len());
                    (covered, index)
                }
                Removal::LowDegree { covered, neighbors } => {
                    let used: Vec<usize> = neighbors
                        .iter()
                        .filter_map(|ids| {
                            ids.iter().find_map(|id| class_of.get(id).copied())
                        })
                        .collect();
                    let index = (0..classes.len())
                        .find(|candidate| !used.contains(candidate))
                        .unwrap_or(classes.len());
                    (covered, index)
                }
            };
            if index == classes.len() {
                classes.push(VertexIds::new());
            }
            for &id in covered {
                classes[index].insert(id);
                class_of.insert(id, index);
            }
        }

        self.coloring = classes
            .iter()
            .map(|ids| self.graph.ids_to_numbers(ids))
            .collect::<Result<Vec<VertexNumbers>>>()?;
        Ok(())
    }
}

impl<'a> Algorithm for QuickZykov<'a> {
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
        self.k = 0;
        self.coloring.clear();
        self.edge_threshold.reset();
        self.small_degree.reset();
        self.neighborhood_subset.reset();
        self.common_neighbors.reset();

        // The algorithm replaces the working graph with subgraphs and
        // contractions as it goes; the original stays untouched.
        let mut state = State {
            graph: self.graph.clone(),
            journal: Vec::new(),
        };

        if let Some(tracer) = self.tracer.as_mut() {
            tracer.note("Initial graph");
            tracer.snapshot(&state.graph);
        }

        self.outer_loop(&mut state)?;

        if let Some(tracer) = self.tracer.as_mut() {
            tracer.note("Final graph");
            tracer.snapshot(&state.graph);
        }

        debug!(
            "quick zykov: n={} chromatic={} steps={} calls={}",
            self.graph.order(),
            self.k,
            self.runtime.steps(),
            self.runtime.calls()
        );
        Ok(true)
    }
}

impl<'a> VertexColoring for QuickZykov<'a> {
    fn number(&self) -> Color {
        self.k
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
        let mut quick = QuickZykov::new(graph);
        assert!(quick.execute().unwrap());
        assert_eq!(quick.number(), expected);
        if expected > 0 {
            let mut painted = graph.clone();
            quick.apply(&mut painted);
            assert!(painted.proper());
            let covered: usize = quick.coloring().iter().map(BTreeSet::len).sum();
            assert_eq!(covered, graph.order());
            assert!(quick.coloring().len() as Color <= expected);
        }
    }

    #[test]
    fn null_graph() {
        check(&Graph::new(0), 0);
    }

    #[test]
    fn empty_graph() {
        let g = Graph::new(8);
        let mut quick = QuickZykov::new(&g);
        assert!(quick.execute().unwrap());
        assert_eq!(quick.number(), 1);
        assert_eq!(quick.coloring().len(), 1);
        assert_eq!(quick.coloring()[0].len(), 8);
    }

    #[test]
    fn single_edge() {
        let mut g = Graph::new(2);
        g.join(0, 1).unwrap();
        check(&g, 2);
    }

    #[test]
    fn complete_graph() {
        let mut g = Graph::new(6);
        g.make_complete();
        check(&g, 6);
    }

    #[test]
    fn even_and_odd_cycles() {
        let mut even = Graph::new(6);
        for v in 0..6 {
            even.join(v, (v + 1) % 6).unwrap();
        }
        check(&even, 2);

        let mut odd = Graph::new(7);
        for v in 0..7 {
            odd.join(v, (v + 1) % 7).unwrap();
        }
        check(&odd, 3);
    }

    #[test]
    fn peg_counters_accumulate() {
        let mut g = Graph::new(6);
        g.make_complete();
        let mut quick = QuickZykov::new(&g);
        quick.execute().unwrap();
        // K6 fails the edge threshold for every k from 2 through 5; k = 6
        // succeeds before the threshold is consulted.
        assert_eq!(quick.edge_threshold().tries(), 4);
        assert_eq!(quick.edge_threshold().hits(), 4);
        assert_eq!(quick.edge_threshold().percent(), 100.0);
    }

    #[test]
    fn trace_lines() {
        use crate::format::TikzFormatter;

        let mut g = Graph::new(3);
        g.join(0, 1).unwrap();
        g.join(1, 2).unwrap();
        let mut formatter = TikzFormatter::new(Vec::new());
        {
            let mut quick = QuickZykov::with_tracer(&g, &mut formatter);
            quick.execute().unwrap();
            assert_eq!(quick.number(), 2);
        }
        let text = String::from_utf8(formatter.into_inner()).unwrap();
        assert!(text.contains("(outer) Initialized: k=2"));
        assert!(text.contains("(inner-1) Success check:"));
        assert!(text.contains("Initial graph"));
        assert!(text.contains("Final graph"));
    }
}
