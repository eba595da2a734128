//! Generic directed graph representation with a 64-bit integer id space.
//!
//! Produced from a [`crate::GraphFrame`] by the conversion layer; vertex and
//! edge payloads are full base-relation rows in declared column order, with
//! [`Schema`] describing that order for downstream consumers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::plan::Value;

/// Ordered field names plus a name→index lookup map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Schema {
    fields: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new(fields: Vec<String>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.clone(), i))
            .collect();
        Schema { fields, index }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<String>> for Schema {
    fn from(fields: Vec<String>) -> Self {
        Schema::new(fields)
    }
}

impl From<Schema> for Vec<String> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphVertex {
    pub id: i64,
    /// Full vertex row in `vertex_schema` order (identifier column included).
    pub row: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub src: i64,
    pub dst: i64,
    /// Full edge row in `edge_schema` order (endpoint columns included).
    pub row: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub vertices: Vec<GraphVertex>,
    pub edges: Vec<GraphEdge>,
    pub vertex_schema: Schema,
    pub edge_schema: Schema,
}
