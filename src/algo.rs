//! Graph algorithms and their shared execution harness

use std::time::Instant;

use crate::errors::Result;
use crate::graph::{Color, Graph, VertexNumbers, NOCOLOR};

pub mod bron;
pub mod christofides;
pub mod edwards;
pub mod greedy;
pub mod quick_zykov;
pub mod wang;
pub mod zykov;

#[doc(inline)]
pub use bron::{Bron, Mode, Variant};
#[doc(inline)]
pub use christofides::Christofides;
#[doc(inline)]
pub use edwards::CliqueEdwards;
#[doc(inline)]
pub use greedy::GreedyColoring;
#[doc(inline)]
pub use quick_zykov::QuickZykov;
#[doc(inline)]
pub use wang::Wang;
#[doc(inline)]
pub use zykov::Zykov;

/// Wall-clock markers and step/call counters shared by every algorithm.
///
/// What constitutes a step or a call is up to the algorithm; usually a step
/// is a major algorithm event and a call is a recursive invocation. The
/// depth counter follows the live recursion and its high-water mark is kept
/// in `max_depth`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runtime {
    started: Option<Instant>,
    finished: Option<Instant>,
    steps: u64,
    calls: u64,
    depth: u64,
    max_depth: u64,
}

impl Runtime {
    /// Zeroes every counter and stamps a new start time.
    pub(crate) fn restart(&mut self) {
        *self = Runtime {
            started: Some(Instant::now()),
            ..Runtime::default()
        };
    }

    /// Stamps the end time.
    pub(crate) fn finish(&mut self) {
        self.finished = Some(Instant::now());
    }

    pub fn started(&self) -> bool {
        self.started.is_some()
    }

    pub fn completed(&self) -> bool {
        self.finished.is_some()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn max_depth(&self) -> u64 {
        self.max_depth
    }

    /// The elapsed seconds: end minus start once finished, otherwise the
    /// running duration. Zero for a runtime that has never started.
    pub fn seconds(&self) -> f64 {
        match (self.started, self.finished) {
            (Some(start), Some(end)) => (end - start).as_secs_f64(),
            (Some(start), None) => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    pub(crate) fn add_step(&mut self) {
        self.steps += 1;
    }

    pub(crate) fn add_call(&mut self) {
        self.calls += 1;
        self.depth += 1;
        if self.depth > self.max_depth {
            self.max_depth = self.depth;
        }
    }

    pub(crate) fn done_call(&mut self) {
        self.depth -= 1;
    }
}

/// The execution protocol shared by every algorithm: an algorithm binds a
/// single source graph, runs via [`execute`](Algorithm::execute), and
/// exposes its instrumentation afterwards.
///
/// `run` returning `Ok(false)` means the algorithm was stopped early by a
/// client callback; it is not a failure, and all accumulated state remains
/// inspectable. Data-model errors propagate out of `execute` unchanged.
pub trait Algorithm {
    /// The original target graph.
    fn graph(&self) -> &Graph;

    fn runtime(&self) -> &Runtime;

    fn runtime_mut(&mut self) -> &mut Runtime;

    /// The actual algorithm. Called by [`execute`](Algorithm::execute);
    /// derived state is reset here.
    fn run(&mut self) -> Result<bool>;

    /// Resets the counters, stamps the start time, runs the algorithm, and
    /// stamps the end time. Since the target graph is never mutated, an
    /// algorithm can be executed repeatedly on the same instance.
    fn execute(&mut self) -> Result<bool> {
        self.runtime_mut().restart();
        let outcome = self.run();
        self.runtime_mut().finish();
        outcome
    }

    fn steps(&self) -> u64 {
        self.runtime().steps()
    }

    fn calls(&self) -> u64 {
        self.runtime().calls()
    }

    fn max_depth(&self) -> u64 {
        self.runtime().max_depth()
    }

    /// Elapsed wall-clock seconds, running if the algorithm is unfinished.
    fn seconds(&self) -> f64 {
        self.runtime().seconds()
    }
}

/// A tries/hits peg counter measuring the effectiveness of a single
/// bounding test.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HitCounter {
    tries: u64,
    hits: u64,
}

impl HitCounter {
    /// Pegs an attempt.
    pub(crate) fn tried(&mut self) {
        self.tries += 1;
    }

    /// Pegs a success.
    pub(crate) fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn tries(&self) -> u64 {
        self.tries
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// The percentage of successful tries, 0 when nothing has been tried.
    pub fn percent(&self) -> f64 {
        if self.tries == 0 {
            0.0
        } else {
            100.0 * (self.hits as f64) / (self.tries as f64)
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = HitCounter::default();
    }
}

/// An algorithm that constructs a proper (or chromatic) vertex coloring.
pub trait VertexColoring: Algorithm {
    /// The found or estimated chromatic number.
    fn number(&self) -> Color;

    /// The constructed coloring: one set of vertex numbers per color class.
    fn coloring(&self) -> &[VertexNumbers];

    /// Applies the found coloring to the specified graph, painting the
    /// classes with colors 1..=k in order.
    fn apply(&self, graph: &mut Graph) {
        for v in 0..graph.order() {
            graph.vertex_mut(v).set_color(NOCOLOR);
        }
        for (index, class) in self.coloring().iter().enumerate() {
            let color = index as Color + 1;
            for &v in class {
                graph.vertex_mut(v).set_color(color);
            }
        }
    }
}
