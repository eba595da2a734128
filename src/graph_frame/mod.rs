//! The graph-as-two-relations view: a vertex table and an edge table.
//!
//! `GraphFrame::new` is the single place the fixed column-name contract is
//! checked: the vertex relation must carry an `id` column, the edge relation
//! `src` and `dst` columns. Everything downstream (motif finding, degrees,
//! graph conversion) relies on that one-time validation.

use crate::plan::{ColumnRef, Relation};

pub mod conversion;
mod errors;

pub use errors::GraphFrameError;

/// Vertex identifier column name.
pub const ID: &str = "id";
/// Edge source identifier column name.
pub const SRC: &str = "src";
/// Edge destination identifier column name.
pub const DST: &str = "dst";

/// Output column name of [`GraphFrame::out_degrees`].
pub const OUT_DEG: &str = "outDeg";
/// Output column name of [`GraphFrame::in_degrees`].
pub const IN_DEG: &str = "inDeg";
/// Output column name of [`GraphFrame::degrees`].
pub const DEG: &str = "deg";

#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    vertices: Relation,
    edges: Relation,
}

impl GraphFrame {
    /// Build a graph frame, validating the required identifier columns.
    ///
    /// Uniqueness of vertex ids and referential integrity of edge endpoints
    /// are assumed, not checked; dangling edge references are legal input.
    pub fn new(vertices: Relation, edges: Relation) -> Result<Self, GraphFrameError> {
        if !vertices.has_column(ID) {
            return Err(GraphFrameError::MissingVertexIdColumn {
                found: vertices.schema(),
            });
        }
        for column in [SRC, DST] {
            if !edges.has_column(column) {
                return Err(GraphFrameError::MissingEdgeEndpointColumn {
                    column: column.to_string(),
                    found: edges.schema(),
                });
            }
        }
        Ok(GraphFrame { vertices, edges })
    }

    pub fn vertices(&self) -> &Relation {
        &self.vertices
    }

    pub fn edges(&self) -> &Relation {
        &self.edges
    }

    /// Out-degree per vertex id, as `(id, outDeg)`. Vertices without outgoing
    /// edges are absent, not zero-filled.
    pub fn out_degrees(&self) -> Relation {
        self.edges
            .group_count(vec![(ColumnRef::col(SRC), ID.to_string())], OUT_DEG)
    }

    /// In-degree per vertex id, as `(id, inDeg)`.
    pub fn in_degrees(&self) -> Relation {
        self.edges
            .group_count(vec![(ColumnRef::col(DST), ID.to_string())], IN_DEG)
    }

    /// Total degree per vertex id, as `(id, deg)`: each edge contributes one
    /// occurrence to each of its endpoints.
    pub fn degrees(&self) -> Relation {
        let sources = self
            .edges
            .project(vec![(ColumnRef::col(SRC), ID.to_string())]);
        let destinations = self
            .edges
            .project(vec![(ColumnRef::col(DST), ID.to_string())]);
        sources
            .union_all(&destinations)
            .group_count(vec![(ColumnRef::col(ID), ID.to_string())], DEG)
    }
}
