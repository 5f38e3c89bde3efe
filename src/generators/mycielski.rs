//! The Mycielski construction

use crate::graph::{Color, Graph, VertexNumber};

/// The order of the Mycielski graph for a given k: 0 for k = 0, 1 for
/// k = 1, 2 for k = 2, and 3·2^(k−2) − 1 beyond.
pub fn mycielski_order(k: Color) -> VertexNumber {
    if k <= 2 {
        k as VertexNumber
    } else {
        3 * (1 << (k - 2)) - 1
    }
}

/// Builds a triangle-free graph with chromatic number k by repeated
/// Mycielski construction: starting from a single edge, each round adds a
/// shadow vertex u for every vertex v with N(u) = N(v), plus one vertex
/// adjacent to every shadow. k = 3 gives the 5-cycle, k = 4 the Grötzsch
/// graph; every level has clique number 2.
pub fn mycielski(k: Color) -> Graph {
    let mut graph = Graph::new(mycielski_order(k));
    if k < 2 {
        return graph;
    }

    let link = |graph: &mut Graph, from: VertexNumber, to: VertexNumber| {
        graph
            .join(from, to)
            .expect("the construction never repeats an edge");
    };

    link(&mut graph, 0, 1);

    let mut prev = 2;
    for _ in 3..=k {
        let next = 2 * prev;
        for v in 0..prev {
            let shadow = v + prev;
            for w in 0..prev {
                if graph.adjacent(v, w) {
                    link(&mut graph, shadow, w);
                }
            }
            link(&mut graph, next, shadow);
        }
        prev = next + 1;
    }
    graph
}
