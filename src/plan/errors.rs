use thiserror::Error;

/// Errors raised while evaluating a relational plan.
///
/// Plan construction itself never fails: the builders only describe work.
/// These surface at `collect()` time, when column references and schemas are
/// actually resolved.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("Unknown column `{name}`. Available columns: [{}]", available.join(", "))]
    UnknownColumn { name: String, available: Vec<String> },

    #[error("Join would produce duplicate column `{name}`")]
    DuplicateColumn { name: String },

    #[error("Schema mismatch: left has [{}], right has [{}]", left.join(", "), right.join(", "))]
    SchemaMismatch { left: Vec<String>, right: Vec<String> },

    #[error("Column `{column}` holds a scalar, cannot access field `{field}`")]
    NotARecord { column: String, field: String },

    #[error("Row width {got} does not match schema width {expected}")]
    RowWidthMismatch { expected: usize, got: usize },
}
