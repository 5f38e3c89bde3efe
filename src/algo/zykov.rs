//! Classical Zykov branch-and-bound for the chromatic number

use crate::algo::{Algorithm, CliqueEdwards, Runtime, VertexColoring};
use crate::errors::Result;
use crate::graph::{Color, Graph, VertexNumber, VertexNumbers};

/// A pruning hook consulted before every branch. Receives the working graph
/// and the order of the best complete graph found so far; a true return
/// prunes the subtree.
pub type BoundHook<'a> = Box<dyn FnMut(&Graph, VertexNumber) -> bool + 'a>;

/// A Zykov algorithm for the chromatic number, branching on the identity
/// χ(G) = min(χ(G·uv), χ(G+uv)) for any non-adjacent pair (u, v) until the
/// working graph is complete. The smallest complete graph over the search
/// tree realizes χ, and its contracted sets are the color classes.
///
/// Branching picks the first non-adjacent pair in lexicographic order. An
/// optional bound hook injects pruning; see
/// [`edwards_bound`](Zykov::edwards_bound).
pub struct Zykov<'a> {
    graph: &'a Graph,
    bound: Option<BoundHook<'a>>,
    runtime: Runtime,
    best: Option<Graph>,
    number: Color,
    coloring: Vec<VertexNumbers>,
}

impl<'a> Zykov<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            bound: None,
            runtime: Runtime::default(),
            best: None,
            number: 0,
            coloring: Vec::new(),
        }
    }

    /// Installs a pruning hook.
    pub fn with_bound<F>(graph: &'a Graph, bound: F) -> Self
    where
        F: FnMut(&Graph, VertexNumber) -> bool + 'a,
    {
        let mut zykov = Self::new(graph);
        zykov.bound = Some(Box::new(bound));
        zykov
    }

    /// A ready-made bound: prune once the Edwards–Elphick clique lower
    /// bound of the working graph reaches the best order found so far,
    /// since every leaf below must then be at least as large.
    pub fn edwards_bound(state: &Graph, best: VertexNumber) -> bool {
        let mut lower = CliqueEdwards::new(state);
        match lower.execute() {
            Ok(_) => lower.number() >= best,
            Err(_) => false,
        }
    }

    fn best_order(&self) -> VertexNumber {
        self.best.as_ref().map_or(usize::MAX, Graph::order)
    }

    fn branch(&mut self, state: Graph) -> Result<()> {
        self.runtime.add_call();

        let best = self.best_order();
        if let Some(bound) = self.bound.as_mut() {
            if bound(&state, best) {
                self.runtime.done_call();
                return Ok(());
            }
        }

        // A complete graph is a leaf state: its order is a candidate for χ.
        if state.is_complete() {
            if state.order() < best {
                self.best = Some(state);
            }
            self.runtime.done_call();
            return Ok(());
        }

        // The completeness test guarantees a non-adjacent pair.
        let n = state.order();
        let mut pair = None;
        'scan: for i in 0..n {
            for j in (i + 1)..n {
                if !state.adjacent(i, j) {
                    pair = Some((i, j));
                    break 'scan;
                }
            }
        }

        if let Some((u, v)) = pair {
            self.branch(state.contract(u, v)?)?;
            let mut addition = state;
            addition.join(u, v)?;
            self.branch(addition)?;
        }

        self.runtime.done_call();
        Ok(())
    }

    /// Transfers the winning complete graph into a coloring: each of its
    /// vertices stands for one color class of original vertices.
    fn set_chromatic(&mut self) -> Result<()> {
        if let Some(result) = self.best.as_ref() {
            self.coloring.clear();
            for v in 0..result.order() {
                let covered = result.vertex(v).covers();
                self.coloring.push(self.graph.ids_to_numbers(&covered)?);
            }
            self.number = result.order() as Color;
        }
        Ok(())
    }
}

impl<'a> Algorithm for Zykov<'a> {
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
        self.best = Some(self.graph.clone());
        self.branch(self.graph.clone())?;
        self.set_chromatic()?;
        Ok(true)
    }
}

impl<'a> VertexColoring for Zykov<'a> {
    fn number(&self) -> Color {
        self.number
    }

    fn coloring(&self) -> &[VertexNumbers] {
        &self.coloring
    }
}
