//! Edges and the values used to add them

use super::{Color, VertexId, VertexNumber, Weight, FREE, NOCOLOR};

/// Attribute values for adding an edge. Endpoints are vertex *numbers*
/// (positions in the vertex table of the graph being built).
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeValues {
    pub from: VertexNumber,
    pub to: VertexNumber,
    pub label: Option<String>,
    pub color: Color,
    pub weight: Weight,
}

impl EdgeValues {
    pub fn between(from: VertexNumber, to: VertexNumber) -> Self {
        Self {
            from,
            to,
            label: None,
            color: NOCOLOR,
            weight: FREE,
        }
    }
}

impl From<(VertexNumber, VertexNumber)> for EdgeValues {
    fn from((from, to): (VertexNumber, VertexNumber)) -> Self {
        EdgeValues::between(from, to)
    }
}

/// A single edge joining two endpoint vertices.
///
/// The endpoints are stored by vertex *id*, not by number, so an edge
/// remains resolvable after its endpoints are renumbered by a subgraph or
/// contraction operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: VertexId,
    to: VertexId,
    label: Option<String>,
    color: Color,
    weight: Weight,
}

impl Edge {
    pub(crate) fn new(
        from: VertexId,
        to: VertexId,
        label: Option<String>,
        color: Color,
        weight: Weight,
    ) -> Self {
        Self {
            from,
            to,
            label,
            color,
            weight,
        }
    }

    /// The from-endpoint vertex id (source, for digraphs).
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// The to-endpoint vertex id (destination, for digraphs).
    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The cost to traverse the edge between its endpoints.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Determines whether the vertex with the given id is an endpoint.
    pub fn is_incident(&self, id: VertexId) -> bool {
        self.from == id || self.to == id
    }
}
