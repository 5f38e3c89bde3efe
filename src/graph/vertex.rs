//! Vertices and the vertex table

use std::collections::HashMap;

use crate::errors::{GraphError, Result};

use super::{Color, Dimension, VertexId, VertexIds, VertexNumber, VertexNumbers, NOCOLOR};

/// Attribute values for creating a vertex. The vertex ID is assigned by the
/// parent graph and is therefore not part of the values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VertexValues {
    pub label: Option<String>,
    pub color: Color,
    pub xpos: Dimension,
    pub ypos: Dimension,
}

impl VertexValues {
    /// A labeled vertex with no color at the specified position.
    pub fn labeled(label: &str, xpos: Dimension, ypos: Dimension) -> Self {
        Self {
            label: Some(label.to_string()),
            color: NOCOLOR,
            xpos,
            ypos,
        }
    }
}

/// A single vertex in a graph.
///
/// The vertex ID is assigned once, when the vertex first enters a graph, and
/// is invariant across all graph mutations: a vertex that changes its number
/// (position in the vertex table) across a subgraph or contraction is still
/// identifiable with the corresponding vertex of the original graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: VertexId,
    label: Option<String>,
    color: Color,
    contracted: VertexIds,
    xpos: Dimension,
    ypos: Dimension,
}

impl Vertex {
    fn new(id: VertexId, values: VertexValues) -> Self {
        Self {
            id,
            label: values.label,
            color: values.color,
            contracted: VertexIds::new(),
            xpos: values.xpos,
            ypos: values.ypos,
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Labels can only be changed through the parent graph, which guarantees
    /// their uniqueness.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The set of original vertex ids folded into this vertex by
    /// contraction. Empty for a vertex that is not a contraction.
    pub fn contracted(&self) -> &VertexIds {
        &self.contracted
    }

    /// The original ids this vertex stands for: the contracted set, or the
    /// vertex's own id when nothing has been folded into it.
    pub fn covers(&self) -> VertexIds {
        if self.contracted.is_empty() {
            let mut own = VertexIds::new();
            own.insert(self.id);
            own
        } else {
            self.contracted.clone()
        }
    }

    /// Position hints for external rendering.
    pub fn xpos(&self) -> Dimension {
        self.xpos
    }

    pub fn ypos(&self) -> Dimension {
        self.ypos
    }

    pub fn set_position(&mut self, xpos: Dimension, ypos: Dimension) {
        self.xpos = xpos;
        self.ypos = ypos;
    }
}

/// The vertex table of a graph.
///
/// Vertices are addressed by vertex number (position in the table) and
/// resolvable by ID or label. The lookup maps are owned by the table and are
/// rebuilt from scratch whenever a table is derived from another; maps are
/// never shared between graphs.
#[derive(Debug, Clone, Default)]
pub struct Vertices {
    table: Vec<Vertex>,
    next: VertexId,
    by_id: HashMap<VertexId, VertexNumber>,
    by_label: HashMap<String, VertexNumber>,
}

impl Vertices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a vertex table, either keeping or removing the vertices in the
    /// specified set. Ids and contracted sets carry over unchanged, so the
    /// derived table generally has a non-contiguous id range. The next-id
    /// counter carries over as well: ids are never reused within a graph
    /// lineage.
    pub fn derived(source: &Vertices, keep: bool, targets: &VertexNumbers) -> Self {
        let mut vertices = Vertices::new();
        for (number, vertex) in source.table.iter().enumerate() {
            if targets.contains(&number) != keep {
                continue;
            }
            vertices.push(vertex.clone());
        }
        vertices.next = source.next;
        vertices
    }

    pub fn len(&self) -> VertexNumber {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn reserve(&mut self, n: VertexNumber) {
        self.table.reserve(n);
    }

    pub fn get(&self, number: VertexNumber) -> &Vertex {
        &self.table[number]
    }

    pub fn get_mut(&mut self, number: VertexNumber) -> &mut Vertex {
        &mut self.table[number]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.table.iter()
    }

    /// Adds a new isolated, unlabeled vertex with default attributes.
    pub fn add_unlabeled(&mut self) -> VertexNumber {
        let number = self.table.len();
        let vertex = Vertex::new(self.next, VertexValues::default());
        self.next += 1;
        self.push(vertex);
        number
    }

    /// Adds a new isolated vertex, assigning it the next vertex ID.
    pub fn add(&mut self, values: VertexValues) -> Result<VertexNumber> {
        let number = self.table.len();
        if let Some(label) = values.label.as_ref() {
            if self.by_label.contains_key(label) {
                return Err(GraphError::DuplicateLabel(label.clone()));
            }
        }
        let vertex = Vertex::new(self.next, values);
        self.next += 1;
        self.push(vertex);
        Ok(number)
    }

    /// Appends an existing vertex value verbatim, indexing its id and label.
    /// Used by derivation paths where uniqueness is already established.
    pub(crate) fn push(&mut self, vertex: Vertex) {
        let number = self.table.len();
        self.by_id.insert(vertex.id, number);
        if let Some(label) = vertex.label.as_ref() {
            self.by_label.insert(label.clone(), number);
        }
        self.table.push(vertex);
    }

    /// Creates the replacement vertex for a contracted fragment. The new
    /// vertex takes the label, color, and position of the fragment
    /// representative but receives a fresh id; its contracted set is supplied
    /// by the caller.
    pub(crate) fn add_contracted(&mut self, representative: &Vertex, contracted: VertexIds) {
        let mut vertex = Vertex::new(
            self.next,
            VertexValues {
                label: representative.label.clone(),
                color: representative.color,
                xpos: representative.xpos,
                ypos: representative.ypos,
            },
        );
        self.next += 1;
        vertex.contracted = contracted;
        self.push(vertex);
    }

    pub fn find_by_id(&self, id: VertexId) -> Option<VertexNumber> {
        self.by_id.get(&id).copied()
    }

    pub fn find_by_label(&self, label: &str) -> Option<VertexNumber> {
        self.by_label.get(label).copied()
    }

    /// Changes (or clears) the label of an existing vertex. Setting the same
    /// label again does nothing; any old label becomes available for reuse.
    pub fn set_label(&mut self, number: VertexNumber, label: Option<&str>) -> Result<()> {
        if self.table[number].label() == label {
            return Ok(());
        }
        if let Some(new) = label {
            if let Some(&holder) = self.by_label.get(new) {
                if holder != number {
                    return Err(GraphError::DuplicateLabel(new.to_string()));
                }
            }
        }
        if let Some(old) = self.table[number].label.take() {
            self.by_label.remove(&old);
        }
        if let Some(new) = label {
            self.by_label.insert(new.to_string(), number);
            self.table[number].label = Some(new.to_string());
        }
        Ok(())
    }
}
