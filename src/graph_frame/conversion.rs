//! Conversion between a [`GraphFrame`] and the generic [`Graph`].
//!
//! When the vertex identifier space is already integral the ids are cast
//! straight to i64. Otherwise every vertex is assigned a dense synthetic id
//! and both edge endpoints are re-resolved through two sequential joins
//! against the (original id, synthetic id) index. The synthetic path costs
//! two extra joins and only triggers when the cast is impossible; synthetic
//! ids are unique but not stable across runs.

use log::debug;

use crate::graph::{Graph, GraphEdge, GraphVertex, Schema};
use crate::plan::{ColumnRef, JoinMode, Relation, Table, Value};

use super::{GraphFrame, GraphFrameError, DST, ID, SRC};

/// Synthetic id column appended to the vertex relation on the non-integral path.
const GID: &str = "__gid";
const SRC_KEY: &str = "__src_key";
const SRC_GID: &str = "__src_gid";
const DST_KEY: &str = "__dst_key";
const DST_GID: &str = "__dst_gid";

impl GraphFrame {
    /// Materialize this frame as a generic directed graph.
    pub fn to_graph(&self) -> Result<Graph, GraphFrameError> {
        let vtable = self.vertices().collect()?;
        let etable = self.edges().collect()?;
        let vertex_schema = Schema::new(vtable.columns.clone());
        let edge_schema = Schema::new(etable.columns.clone());

        let id_idx = column_of(&vtable, ID)?;
        let src_idx = column_of(&etable, SRC)?;
        let dst_idx = column_of(&etable, DST)?;

        let integral = vtable.rows.iter().all(|r| r[id_idx].as_int().is_some())
            && etable
                .rows
                .iter()
                .all(|r| r[src_idx].as_int().is_some() && r[dst_idx].as_int().is_some());

        if integral {
            debug!("graph conversion: integral id fast path");
            let vertices = vtable
                .rows
                .iter()
                .map(|r| GraphVertex {
                    // Checked integral just above
                    id: r[id_idx].as_int().unwrap_or_default(),
                    row: r.clone(),
                })
                .collect();
            let edges = etable
                .rows
                .iter()
                .map(|r| GraphEdge {
                    src: r[src_idx].as_int().unwrap_or_default(),
                    dst: r[dst_idx].as_int().unwrap_or_default(),
                    row: r.clone(),
                })
                .collect();
            return Ok(Graph {
                vertices,
                edges,
                vertex_schema,
                edge_schema,
            });
        }

        debug!("graph conversion: assigning synthetic ids");
        self.to_graph_synthetic(vertex_schema, edge_schema, etable.columns.len())
    }

    /// Non-integral id path: dense synthetic ids plus edge re-resolution.
    fn to_graph_synthetic(
        &self,
        vertex_schema: Schema,
        edge_schema: Schema,
        edge_width: usize,
    ) -> Result<Graph, GraphFrameError> {
        // Materialize the id assignment once so the vertex listing and the
        // edge re-resolution below see the same synthetic ids.
        let assigned = self.vertices().with_row_ids(GID).collect()?;
        let gid_idx = column_of(&assigned, GID)?;
        let id_idx = column_of(&assigned, ID)?;

        let vertices: Vec<GraphVertex> = assigned
            .rows
            .iter()
            .map(|r| GraphVertex {
                id: r[gid_idx].as_int().unwrap_or_default(),
                row: r[..r.len() - 1].to_vec(),
            })
            .collect();

        // Original id -> synthetic id index, joined once per endpoint
        let index_rows: Vec<Vec<Value>> = assigned
            .rows
            .iter()
            .map(|r| vec![r[id_idx].clone(), r[gid_idx].clone()])
            .collect();
        let src_index = Relation::values([SRC_KEY, SRC_GID], index_rows.clone());
        let dst_index = Relation::values([DST_KEY, DST_GID], index_rows);

        let resolved = self
            .edges()
            .join(
                &src_index,
                vec![(ColumnRef::col(SRC), ColumnRef::col(SRC_KEY))],
                JoinMode::Inner,
            )
            .join(
                &dst_index,
                vec![(ColumnRef::col(DST), ColumnRef::col(DST_KEY))],
                JoinMode::Inner,
            )
            .collect()?;
        let src_gid = column_of(&resolved, SRC_GID)?;
        let dst_gid = column_of(&resolved, DST_GID)?;

        let edges = resolved
            .rows
            .iter()
            .map(|r| GraphEdge {
                src: r[src_gid].as_int().unwrap_or_default(),
                dst: r[dst_gid].as_int().unwrap_or_default(),
                row: r[..edge_width].to_vec(),
            })
            .collect();

        Ok(Graph {
            vertices,
            edges,
            vertex_schema,
            edge_schema,
        })
    }
}

/// Rebuild a [`GraphFrame`] from a generic graph: literal relations in schema
/// order, revalidated through [`GraphFrame::new`].
pub fn from_graph(graph: &Graph) -> Result<GraphFrame, GraphFrameError> {
    let vertices = Relation::values(
        graph.vertex_schema.fields().iter().cloned(),
        graph.vertices.iter().map(|v| v.row.clone()).collect(),
    );
    let edges = Relation::values(
        graph.edge_schema.fields().iter().cloned(),
        graph.edges.iter().map(|e| e.row.clone()).collect(),
    );
    GraphFrame::new(vertices, edges)
}

fn column_of(table: &Table, name: &str) -> Result<usize, GraphFrameError> {
    table.column_index(name).ok_or_else(|| {
        GraphFrameError::Plan(crate::plan::PlanError::UnknownColumn {
            name: name.to_string(),
            available: table.columns.clone(),
        })
    })
}
