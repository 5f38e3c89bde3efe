//! Exact and heuristic algorithms for two NP-hard invariants of finite
//! simple graphs: the clique number ω(G) and the chromatic number χ(G).
//!
//! The [`graph`] module provides the data model — vertices with invariant
//! ids, edges addressed by id, a connection matrix, and the subgraph,
//! complement, and contraction operations the searches are built from. The
//! [`algo`] module provides the algorithms behind a common instrumented
//! [`Algorithm`](algo::Algorithm) harness:
//!
//! - [`Bron`](algo::Bron) — Bron–Kerbosch maximal clique enumeration, with
//!   and without pivoting, giving ω(G);
//! - [`QuickZykov`](algo::QuickZykov) — χ(G) by k-colorability decisions
//!   with a battery of bounding tests;
//! - [`Christofides`](algo::Christofides) and [`Wang`](algo::Wang) — χ(G)
//!   by covering searches over maximal independent sets;
//! - [`Zykov`](algo::Zykov) — the classical contraction/addition
//!   branch-and-bound;
//! - [`GreedyColoring`](algo::GreedyColoring) — largest-first sequential
//!   coloring with optional color interchange;
//! - [`CliqueEdwards`](algo::CliqueEdwards) — a fast clique lower bound.
//!
//! ```
//! use omega_chi::algo::{Algorithm, Bron, QuickZykov, Variant, VertexColoring};
//! use omega_chi::graph::Graph;
//!
//! let mut graph = Graph::new(4);
//! for &(i, j) in &[(0, 1), (1, 2), (2, 0), (2, 3)] {
//!     graph.join(i, j).unwrap();
//! }
//!
//! let mut cliques = Bron::new(&graph, Variant::Pivot);
//! cliques.execute().unwrap();
//! assert_eq!(cliques.number(), 3);
//! drop(cliques);
//!
//! let mut chromatic = QuickZykov::new(&graph);
//! chromatic.execute().unwrap();
//! assert_eq!(chromatic.number(), 3);
//! let mut painted = graph.clone();
//! chromatic.apply(&mut painted);
//! assert!(painted.proper());
//! ```

pub mod algo;
pub mod errors;
pub mod format;
pub mod generators;
pub mod graph;

#[doc(inline)]
pub use errors::{GraphError, Result};
#[doc(inline)]
pub use graph::Graph;
