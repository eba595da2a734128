//! In-process plan evaluation.
//!
//! `collect` walks the plan bottom-up and materializes every operator. Joins
//! use hash maps keyed on the equality predicates; a `Null` join key never
//! matches (SQL semantics), while set difference compares full rows with
//! `Null` equal to `Null`.

use std::collections::{HashMap, HashSet};

use log::trace;

use super::errors::PlanError;
use super::value::{RowKey, Value};
use super::{next_row_id, ColumnRef, JoinMode, RelOp, Relation};

/// A materialized relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, PlanError> {
        let idx = self.column_index(name).ok_or_else(|| self.unknown(name))?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Resolve `column` or `column.field` in one row of this table.
    pub fn value<'a>(&self, row: &'a [Value], cref: &ColumnRef) -> Result<&'a Value, PlanError> {
        let idx = self
            .column_index(&cref.column)
            .ok_or_else(|| self.unknown(&cref.column))?;
        let cell = &row[idx];
        match &cref.field {
            None => Ok(cell),
            Some(field) => match cell {
                // Missing fields and null-filled records read as Null so
                // outer-join remnants flow through comparisons unmatched.
                Value::Record(_) => Ok(cell.field(field).unwrap_or(&Value::Null)),
                Value::Null => Ok(&Value::Null),
                _ => Err(PlanError::NotARecord {
                    column: cref.column.clone(),
                    field: field.clone(),
                }),
            },
        }
    }

    fn unknown(&self, name: &str) -> PlanError {
        PlanError::UnknownColumn {
            name: name.to_string(),
            available: self.columns.clone(),
        }
    }
}

impl Relation {
    /// Evaluate the plan and materialize its rows.
    pub fn collect(&self) -> Result<Table, PlanError> {
        let table = eval(self)?;
        trace!(
            "collected relation [{}]: {} rows",
            table.columns.join(", "),
            table.rows.len()
        );
        Ok(table)
    }
}

fn eval(relation: &Relation) -> Result<Table, PlanError> {
    match relation.op() {
        RelOp::Values { columns, rows } => {
            for row in rows {
                if row.len() != columns.len() {
                    return Err(PlanError::RowWidthMismatch {
                        expected: columns.len(),
                        got: row.len(),
                    });
                }
            }
            Ok(Table {
                columns: columns.clone(),
                rows: rows.clone(),
            })
        }
        RelOp::Nest { input, column } => {
            let table = eval(input)?;
            let rows = table
                .rows
                .iter()
                .map(|row| {
                    let record = table
                        .columns
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect();
                    vec![Value::Record(record)]
                })
                .collect();
            Ok(Table {
                columns: vec![column.clone()],
                rows,
            })
        }
        RelOp::Project { input, columns } => {
            let table = eval(input)?;
            let mut rows = Vec::with_capacity(table.rows.len());
            for row in &table.rows {
                let mut out = Vec::with_capacity(columns.len());
                for (cref, _) in columns {
                    out.push(table.value(row, cref)?.clone());
                }
                rows.push(out);
            }
            Ok(Table {
                columns: columns.iter().map(|(_, name)| name.clone()).collect(),
                rows,
            })
        }
        RelOp::Join {
            left,
            right,
            on,
            mode,
        } => eval_join(left, right, on, *mode),
        RelOp::Drop { input, column } => {
            let table = eval(input)?;
            let idx = table
                .column_index(column)
                .ok_or_else(|| table.unknown(column))?;
            let columns = table
                .columns
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, c)| c.clone())
                .collect();
            let rows = table
                .rows
                .into_iter()
                .map(|mut row| {
                    row.remove(idx);
                    row
                })
                .collect();
            Ok(Table { columns, rows })
        }
        RelOp::GroupCount {
            input,
            keys,
            count_as,
        } => {
            let table = eval(input)?;
            let mut counts: HashMap<RowKey, i64> = HashMap::new();
            let mut order: Vec<RowKey> = Vec::new();
            for row in &table.rows {
                let mut key = Vec::with_capacity(keys.len());
                for (cref, _) in keys {
                    key.push(table.value(row, cref)?.clone());
                }
                let key = RowKey(key);
                match counts.get_mut(&key) {
                    Some(n) => *n += 1,
                    None => {
                        counts.insert(key.clone(), 1);
                        order.push(key);
                    }
                }
            }
            let mut columns: Vec<String> = keys.iter().map(|(_, name)| name.clone()).collect();
            columns.push(count_as.clone());
            let rows = order
                .into_iter()
                .map(|key| {
                    let n = counts[&key];
                    let mut row = key.0;
                    row.push(Value::Int(n));
                    row
                })
                .collect();
            Ok(Table { columns, rows })
        }
        RelOp::UnionAll { left, right } => {
            let mut l = eval(left)?;
            let r = eval(right)?;
            if l.columns != r.columns {
                return Err(PlanError::SchemaMismatch {
                    left: l.columns,
                    right: r.columns,
                });
            }
            l.rows.extend(r.rows);
            Ok(l)
        }
        RelOp::Difference { left, right } => {
            let l = eval(left)?;
            let r = eval(right)?;
            if l.columns != r.columns {
                return Err(PlanError::SchemaMismatch {
                    left: l.columns,
                    right: r.columns,
                });
            }
            let removed: HashSet<RowKey> = r.rows.into_iter().map(RowKey).collect();
            let rows = l
                .rows
                .into_iter()
                .filter(|row| !removed.contains(&RowKey(row.clone())))
                .collect();
            Ok(Table {
                columns: l.columns,
                rows,
            })
        }
        RelOp::WithRowIds { input, column } => {
            let mut table = eval(input)?;
            if table.column_index(column).is_some() {
                return Err(PlanError::DuplicateColumn {
                    name: column.clone(),
                });
            }
            table.columns.push(column.clone());
            for row in &mut table.rows {
                row.push(Value::Int(next_row_id()));
            }
            Ok(table)
        }
    }
}

fn eval_join(
    left: &Relation,
    right: &Relation,
    on: &[(ColumnRef, ColumnRef)],
    mode: JoinMode,
) -> Result<Table, PlanError> {
    let l = eval(left)?;
    let r = eval(right)?;

    let mut columns = l.columns.clone();
    for name in &r.columns {
        if columns.contains(name) {
            return Err(PlanError::DuplicateColumn { name: name.clone() });
        }
        columns.push(name.clone());
    }

    // Orient each predicate so the first ref resolves on the left input and
    // the second on the right, whichever way it was written.
    let mut oriented: Vec<(&ColumnRef, &ColumnRef)> = Vec::with_capacity(on.len());
    for (a, b) in on {
        if l.column_index(&a.column).is_some() && r.column_index(&b.column).is_some() {
            oriented.push((a, b));
        } else if l.column_index(&b.column).is_some() && r.column_index(&a.column).is_some() {
            oriented.push((b, a));
        } else {
            let missing = if l.column_index(&a.column).is_none()
                && r.column_index(&a.column).is_none()
            {
                &a.column
            } else {
                &b.column
            };
            let mut available = l.columns.clone();
            available.extend(r.columns.clone());
            return Err(PlanError::UnknownColumn {
                name: missing.clone(),
                available,
            });
        }
    }

    trace!(
        "{:?} join on {} predicate(s): {} x {} rows",
        mode,
        oriented.len(),
        l.rows.len(),
        r.rows.len()
    );

    let mut rows = Vec::new();

    if oriented.is_empty() {
        // Cross join; LeftOuter degenerates to it except against an empty right
        for lrow in &l.rows {
            if r.rows.is_empty() && mode == JoinMode::LeftOuter {
                let mut row = lrow.clone();
                row.extend(std::iter::repeat_n(Value::Null, r.columns.len()));
                rows.push(row);
                continue;
            }
            for rrow in &r.rows {
                let mut row = lrow.clone();
                row.extend(rrow.iter().cloned());
                rows.push(row);
            }
        }
        return Ok(Table { columns, rows });
    }

    // Build side: right rows indexed by key; rows with a Null key can never match
    let mut index: HashMap<RowKey, Vec<usize>> = HashMap::new();
    'build: for (i, rrow) in r.rows.iter().enumerate() {
        let mut key = Vec::with_capacity(oriented.len());
        for (_, rref) in &oriented {
            let v = r.value(rrow, rref)?;
            if v.is_null() {
                continue 'build;
            }
            key.push(v.clone());
        }
        index.entry(RowKey(key)).or_default().push(i);
    }

    for lrow in &l.rows {
        let mut key = Some(Vec::with_capacity(oriented.len()));
        for (lref, _) in &oriented {
            let v = l.value(lrow, lref)?;
            if v.is_null() {
                key = None;
                break;
            }
            if let Some(values) = key.as_mut() {
                values.push(v.clone());
            }
        }
        let matches = key
            .map(RowKey)
            .and_then(|k| index.get(&k))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if matches.is_empty() {
            if mode == JoinMode::LeftOuter {
                let mut row = lrow.clone();
                row.extend(std::iter::repeat_n(Value::Null, r.columns.len()));
                rows.push(row);
            }
            continue;
        }
        for &i in matches {
            let mut row = lrow.clone();
            row.extend(r.rows[i].iter().cloned());
            rows.push(row);
        }
    }

    Ok(Table { columns, rows })
}
