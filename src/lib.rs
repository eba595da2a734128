//! Relgraph - motif finding and graph analysis over relational tables
//!
//! This crate compiles small graph patterns ("motifs") into relational join
//! plans over two base relations, a vertex table and an edge table:
//! - Motif text parsing into elementary pattern terms
//! - Incremental join compilation with consistent name binding and negation
//! - Degree computation and conversion to/from a generic graph representation
//! - A lazy relational plan layer with an in-process evaluator

pub mod graph;
pub mod graph_frame;
pub mod motif_finder;
pub mod motif_parser;
pub mod plan;

pub use graph_frame::GraphFrame;
pub use plan::{Relation, Value};
