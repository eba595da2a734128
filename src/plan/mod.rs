//! Lazy relational plan values.
//!
//! A [`Relation`] is an immutable, cheaply clonable description of a table
//! computation: building one performs no work. The motif compiler layers
//! joins, projections and set differences on top of literal [`RelOp::Values`]
//! sources, and only [`Relation::collect`] (in [`eval`]) materializes rows.
//! Every plan value is safe to evaluate any number of times.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

mod errors;
mod eval;
mod serde_arc;
pub mod value;

pub use errors::PlanError;
pub use eval::Table;
pub use value::Value;

/// Reference to a column, or to a field inside a record column.
///
/// `ColumnRef::col("e")` addresses the whole column; `ColumnRef::path("e", "src")`
/// addresses `e.src` inside the nested record (see [`Relation::nest`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub column: String,
    pub field: Option<String>,
}

impl ColumnRef {
    pub fn col(column: impl Into<String>) -> Self {
        ColumnRef {
            column: column.into(),
            field: None,
        }
    }

    pub fn path(column: impl Into<String>, field: impl Into<String>) -> Self {
        ColumnRef {
            column: column.into(),
            field: Some(field.into()),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}.{}", self.column, field),
            None => write!(f, "{}", self.column),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinMode {
    Inner,
    /// Keep unmatched left rows, null-filling the right side's columns.
    LeftOuter,
}

/// One node of a relational plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RelOp {
    /// Literal source relation.
    Values {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// Pack each full input row into a single record column named `column`,
    /// preserving input column order as field order.
    Nest { input: Relation, column: String },
    /// Projection with rename; each output column is `(source ref, output name)`.
    Project {
        input: Relation,
        columns: Vec<(ColumnRef, String)>,
    },
    /// Equi-join on a conjunction of equality predicates. An empty predicate
    /// list is a cross join.
    Join {
        left: Relation,
        right: Relation,
        on: Vec<(ColumnRef, ColumnRef)>,
        mode: JoinMode,
    },
    /// Remove one column.
    Drop { input: Relation, column: String },
    /// Group by `keys` (each `(source ref, output name)`) and count rows per
    /// group into `count_as`.
    GroupCount {
        input: Relation,
        keys: Vec<(ColumnRef, String)>,
        count_as: String,
    },
    /// Multiset union; schemas must match.
    UnionAll { left: Relation, right: Relation },
    /// Remove every left row equal to some right row (full-row equality);
    /// schemas must match.
    Difference { left: Relation, right: Relation },
    /// Append a fresh monotonically increasing i64 id per row. Ids are unique
    /// process-wide but not stable or contiguous across evaluations.
    WithRowIds { input: Relation, column: String },
}

/// Handle over a plan node. Cloning is an `Arc` bump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(with = "serde_arc")]
    op: Arc<RelOp>,
}

impl Relation {
    fn new(op: RelOp) -> Self {
        Relation { op: Arc::new(op) }
    }

    pub fn op(&self) -> &RelOp {
        &self.op
    }

    /// Literal relation from column names and rows.
    pub fn values(
        columns: impl IntoIterator<Item = impl Into<String>>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        Relation::new(RelOp::Values {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
        })
    }

    /// Zero-column, zero-row relation.
    pub fn empty() -> Self {
        Relation::new(RelOp::Values {
            columns: vec![],
            rows: vec![],
        })
    }

    pub fn nest(&self, column: impl Into<String>) -> Self {
        Relation::new(RelOp::Nest {
            input: self.clone(),
            column: column.into(),
        })
    }

    pub fn project(&self, columns: Vec<(ColumnRef, String)>) -> Self {
        Relation::new(RelOp::Project {
            input: self.clone(),
            columns,
        })
    }

    pub fn join(&self, right: &Relation, on: Vec<(ColumnRef, ColumnRef)>, mode: JoinMode) -> Self {
        Relation::new(RelOp::Join {
            left: self.clone(),
            right: right.clone(),
            on,
            mode,
        })
    }

    /// Join with no predicate: the cartesian product.
    pub fn cross_join(&self, right: &Relation) -> Self {
        self.join(right, vec![], JoinMode::Inner)
    }

    pub fn drop_column(&self, column: impl Into<String>) -> Self {
        Relation::new(RelOp::Drop {
            input: self.clone(),
            column: column.into(),
        })
    }

    pub fn group_count(
        &self,
        keys: Vec<(ColumnRef, String)>,
        count_as: impl Into<String>,
    ) -> Self {
        Relation::new(RelOp::GroupCount {
            input: self.clone(),
            keys,
            count_as: count_as.into(),
        })
    }

    pub fn union_all(&self, right: &Relation) -> Self {
        Relation::new(RelOp::UnionAll {
            left: self.clone(),
            right: right.clone(),
        })
    }

    pub fn difference(&self, right: &Relation) -> Self {
        Relation::new(RelOp::Difference {
            left: self.clone(),
            right: right.clone(),
        })
    }

    pub fn with_row_ids(&self, column: impl Into<String>) -> Self {
        Relation::new(RelOp::WithRowIds {
            input: self.clone(),
            column: column.into(),
        })
    }

    /// Output column names, derived from the plan without executing it.
    ///
    /// Duplicate names a join would produce are only rejected at `collect`
    /// time; here the concatenation is reported as-is.
    pub fn schema(&self) -> Vec<String> {
        match self.op() {
            RelOp::Values { columns, .. } => columns.clone(),
            RelOp::Nest { column, .. } => vec![column.clone()],
            RelOp::Project { columns, .. } => {
                columns.iter().map(|(_, name)| name.clone()).collect()
            }
            RelOp::Join { left, right, .. } => {
                let mut schema = left.schema();
                schema.extend(right.schema());
                schema
            }
            RelOp::Drop { input, column } => input
                .schema()
                .into_iter()
                .filter(|c| c != column)
                .collect(),
            RelOp::GroupCount { keys, count_as, .. } => {
                let mut schema: Vec<String> =
                    keys.iter().map(|(_, name)| name.clone()).collect();
                schema.push(count_as.clone());
                schema
            }
            RelOp::UnionAll { left, .. } => left.schema(),
            RelOp::Difference { left, .. } => left.schema(),
            RelOp::WithRowIds { input, column } => {
                let mut schema = input.schema();
                schema.push(column.clone());
                schema
            }
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema().iter().any(|c| c == name)
    }
}

static ROW_ID_COUNTER: AtomicI64 = AtomicI64::new(0);

/// Next value of the process-wide row id sequence, used by `WithRowIds`.
pub(crate) fn next_row_id() -> i64 {
    ROW_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Reset the row id counter (useful for testing to get predictable ids).
pub fn reset_row_id_counter() {
    ROW_ID_COUNTER.store(0, Ordering::SeqCst);
}
