//! Presentation formatting for graphs and algorithm traces

use std::io::{self, Write};

use crate::graph::Graph;

/// Receives human-readable diagnostic output from an algorithm run: trace
/// lines and snapshots of the working graph. The text carries no stability
/// contract.
pub trait Tracer {
    /// Emits one line of trace text.
    fn note(&mut self, line: &str);

    /// Emits the current state of a working graph.
    fn snapshot(&mut self, graph: &Graph);
}

/// Formats graphs as TikZ pictures, using the vertex position hints, and
/// passes trace lines through verbatim.
///
/// Write failures are remembered rather than raised: tracing is a
/// diagnostic side channel and must never unwind an algorithm.
pub struct TikzFormatter<W: Write> {
    out: W,
    labels: bool,
    failed: bool,
}

const LABELED_STYLE: &str = "labeled node/.style={draw,circle,minimum size=2em}";
const UNLABELED_STYLE: &str =
    "unlabeled node/.style={draw,circle,fill=black,inner sep=0cm,minimum size=0.2cm}";

impl<W: Write> TikzFormatter<W> {
    /// Creates a formatter that identifies vertices by label where present.
    pub fn new(out: W) -> Self {
        Self {
            out,
            labels: true,
            failed: false,
        }
    }

    /// Draw anonymous filled nodes instead of labeled circles.
    pub fn without_labels(mut self) -> Self {
        self.labels = false;
        self
    }

    /// True once any write has failed; subsequent output is discarded.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format(&mut self, graph: &Graph) -> io::Result<()> {
        writeln!(self.out, "\\begin{{tikzpicture}}")?;
        let style = if self.labels {
            LABELED_STYLE
        } else {
            UNLABELED_STYLE
        };
        writeln!(self.out, "  \\begin{{scope}}[{}]", style)?;
        for number in 0..graph.order() {
            let v = graph.vertex(number);
            let name = v
                .label()
                .map(str::to_string)
                .unwrap_or_else(|| v.id().to_string());
            writeln!(
                self.out,
                "  \\node ({}) at ({},{}) {{{}}};",
                v.id(),
                v.xpos(),
                v.ypos(),
                if self.labels { name } else { String::new() }
            )?;
        }
        writeln!(self.out, "  \\end{{scope}}")?;
        for number in 0..graph.size() {
            let e = graph.edge(number);
            writeln!(self.out, "  \\draw ({}) edge ({});", e.from(), e.to())?;
        }
        writeln!(self.out, "\\end{{tikzpicture}}")
    }
}

impl<W: Write> Tracer for TikzFormatter<W> {
    fn note(&mut self, line: &str) {
        if self.failed {
            return;
        }
        if writeln!(self.out, "{}", line).is_err() {
            self.failed = true;
        }
    }

    fn snapshot(&mut self, graph: &Graph) {
        if self.failed {
            return;
        }
        if self.format(graph).is_err() {
            self.failed = true;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::VertexValues;

    #[test]
    fn tikz_snapshot() {
        let g = Graph::build(
            vec![
                VertexValues::labeled("a", 0.0, 2.0),
                VertexValues::labeled("b", 2.0, 2.0),
            ],
            vec![(0, 1).into()],
        )
        .unwrap();
        let mut formatter = TikzFormatter::new(Vec::new());
        formatter.snapshot(&g);
        formatter.note("1. (outer) Initialized: k=2");
        assert!(!formatter.failed());
        let text = String::from_utf8(formatter.into_inner()).unwrap();
        assert!(text.starts_with("\\begin{tikzpicture}"));
        assert!(text.contains("\\node (0) at (0,2) {a};"));
        assert!(text.contains("\\draw (0) edge (1);"));
        assert!(text.contains("\\end{tikzpicture}"));
        assert!(text.ends_with("1. (outer) Initialized: k=2\n"));
    }
}
