//! Greedy sequential vertex coloring

use std::collections::BTreeSet;

use priority_queue::PriorityQueue;

use crate::algo::{Algorithm, Runtime, VertexColoring};
use crate::errors::Result;
use crate::graph::{Color, Graph, VertexNumber, VertexNumbers, NOCOLOR};

/// Sequential (greedy) vertex coloring, largest degree first: each vertex in
/// turn takes the smallest color unused by its already-colored neighbors.
///
/// With interchange enabled, a vertex about to open a new color first
/// attempts a Matula-style two-color interchange: if, for some pair of
/// neighbor colors (a, b), no connected component of the (a, b)-colored
/// subgraph touches both an a-neighbor and a b-neighbor of the vertex, the
/// components holding its a-neighbors are swapped and the vertex takes a.
///
/// The output is proper but not in general chromatic.
pub struct GreedyColoring<'a> {
    graph: &'a Graph,
    interchange: bool,
    runtime: Runtime,
    number: Color,
    coloring: Vec<VertexNumbers>,
}

impl<'a> GreedyColoring<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_interchange(graph, true)
    }

    pub fn with_interchange(graph: &'a Graph, interchange: bool) -> Self {
        Self {
            graph,
            interchange,
            runtime: Runtime::default(),
            number: 0,
            coloring: Vec::new(),
        }
    }

    pub fn interchange(&self) -> bool {
        self.interchange
    }

    /// The colors in use by the already-colored neighbors of a vertex.
    fn neighbor_colors(&self, vertex: VertexNumber, colors: &[Color]) -> BTreeSet<Color> {
        (0..self.graph.order())
            .filter(|&w| self.graph.adjacent(vertex, w))
            .map(|w| colors[w])
            .filter(|&c| c != NOCOLOR)
            .collect()
    }

    /// Attempts a two-color interchange to free an existing color for the
    /// given vertex. Returns the freed color on success, with the
    /// assignments swapped in place.
    fn attempt_interchange(&mut self, vertex: VertexNumber, colors: &mut [Color]) -> Option<Color> {
        let g = self.graph;
        let blocked: Vec<Color> = self.neighbor_colors(vertex, colors).into_iter().collect();

        for (ia, &a) in blocked.iter().enumerate() {
            for &b in blocked.iter().skip(ia + 1) {
                self.runtime.add_step();

                // Flood the (a, b)-colored subgraph from every a-colored
                // neighbor of the vertex.
                let mut component: BTreeSet<VertexNumber> = BTreeSet::new();
                let mut frontier: Vec<VertexNumber> = (0..g.order())
                    .filter(|&w| g.adjacent(vertex, w) && colors[w] == a)
                    .collect();
                while let Some(w) = frontier.pop() {
                    if !component.insert(w) {
                        continue;
                    }
                    for x in 0..g.order() {
                        if g.adjacent(w, x) && (colors[x] == a || colors[x] == b) {
                            frontier.push(x);
                        }
                    }
                }

                // If the flooded region reaches a b-colored neighbor of the
                // vertex, swapping would not free anything for this pair.
                let reaches_b = component
                    .iter()
                    .any(|&w| colors[w] == b && g.adjacent(vertex, w));
                if reaches_b {
                    continue;
                }

                // Swap a and b throughout the region: a Kempe chain swap,
                // so properness is preserved and a becomes free.
                for &w in &component {
                    colors[w] = if colors[w] == a { b } else { a };
                }
                return Some(a);
            }
        }
        None
    }
}

impl<'a> Algorithm for GreedyColoring<'a> {
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

        let g = self.graph;
        let n = g.order();
        if n == 0 {
            return Ok(true);
        }

        // Sort the vertices by non-increasing degree.
        let mut by_degree: PriorityQueue<VertexNumber, usize> = PriorityQueue::new();
        for v in 0..n {
            by_degree.push(v, g.degree(v));
        }

        let mut colors: Vec<Color> = vec![NOCOLOR; n];
        let mut in_use: Color = 0;

        while let Some((next, _)) = by_degree.pop() {
            self.runtime.add_step();
            let blocked = self.neighbor_colors(next, &colors);
            let mut color = 1;
            while blocked.contains(&color) {
                color += 1;
            }

            // About to open a new color: try to make an old one work first.
            if color > in_use && self.interchange && in_use >= 2 {
                if let Some(freed) = self.attempt_interchange(next, &mut colors) {
                    color = freed;
                }
            }

            colors[next] = color;
            if color > in_use {
                in_use = color;
            }
        }

        // Extract the color classes.
        self.number = in_use;
        self.coloring = vec![VertexNumbers::new(); in_use as usize];
        for (v, &c) in colors.iter().enumerate() {
            self.coloring[(c - 1) as usize].insert(v);
        }
        Ok(true)
    }
}

impl<'a> VertexColoring for GreedyColoring<'a> {
    fn number(&self) -> Color {
        self.number
    }

    fn coloring(&self) -> &[VertexNumbers] {
        &self.coloring
    }
}
