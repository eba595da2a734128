use relgraph::plan::{ColumnRef, JoinMode, PlanError, Relation, Value};
use serial_test::serial;

fn people() -> Relation {
    Relation::values(
        ["id", "name"],
        vec![
            vec![1.into(), "alice".into()],
            vec![2.into(), "bob".into()],
        ],
    )
}

#[test]
fn test_collect_is_repeatable() {
    let plan = people().nest("p");
    let first = plan.collect().unwrap();
    let second = plan.collect().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_projection_renames_and_extracts_fields() {
    let table = people()
        .nest("p")
        .project(vec![
            (ColumnRef::path("p", "id"), "pid".to_string()),
            (ColumnRef::path("p", "name"), "who".to_string()),
        ])
        .collect()
        .unwrap();
    assert_eq!(table.columns, vec!["pid", "who"]);
    assert_eq!(table.rows[1], vec![Value::Int(2), Value::Str("bob".to_string())]);
}

#[test]
fn test_missing_record_field_reads_as_null() {
    let table = people()
        .nest("p")
        .project(vec![(ColumnRef::path("p", "age"), "age".to_string())])
        .collect()
        .unwrap();
    assert!(table.rows.iter().all(|r| r[0].is_null()));
}

#[test]
fn test_unknown_column_error_lists_available() {
    let err = people()
        .project(vec![(ColumnRef::col("nope"), "nope".to_string())])
        .collect()
        .unwrap_err();
    match err {
        PlanError::UnknownColumn { name, available } => {
            assert_eq!(name, "nope");
            assert_eq!(available, vec!["id".to_string(), "name".to_string()]);
        }
        other => panic!("expected UnknownColumn, got {:?}", other),
    }
}

#[test]
fn test_left_outer_join_against_empty_right() {
    let empty = Relation::values(["id"], vec![]).nest("q");
    let table = people()
        .nest("p")
        .join(
            &empty,
            vec![(ColumnRef::path("p", "id"), ColumnRef::path("q", "id"))],
            JoinMode::LeftOuter,
        )
        .collect()
        .unwrap();
    assert_eq!(table.rows.len(), 2);
    assert!(table.rows.iter().all(|r| r[1].is_null()));
}

#[test]
fn test_predicate_orientation_is_symmetric() {
    // The same predicate written either way round joins identically
    let edges = Relation::values(["src", "dst"], vec![vec![1.into(), 2.into()]]).nest("e");
    let forward = people().nest("p").join(
        &edges,
        vec![(ColumnRef::path("p", "id"), ColumnRef::path("e", "src"))],
        JoinMode::Inner,
    );
    let reversed = people().nest("p").join(
        &edges,
        vec![(ColumnRef::path("e", "src"), ColumnRef::path("p", "id"))],
        JoinMode::Inner,
    );
    assert_eq!(forward.collect().unwrap(), reversed.collect().unwrap());
}

#[test]
fn test_union_all_keeps_duplicates() {
    let table = people().union_all(&people()).collect().unwrap();
    assert_eq!(table.rows.len(), 4);
}

#[test]
fn test_difference_removes_all_matching_occurrences() {
    let doubled = people().union_all(&people());
    let bob = Relation::values(["id", "name"], vec![vec![2.into(), "bob".into()]]);
    let table = doubled.difference(&bob).collect().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert!(table.rows.iter().all(|r| r[0] == Value::Int(1)));
}

#[test]
#[serial]
fn test_row_ids_are_dense_after_reset() {
    relgraph::plan::reset_row_id_counter();
    let table = people().with_row_ids("gid").collect().unwrap();
    let gids: Vec<i64> = table.rows.iter().map(|r| r[2].as_int().unwrap()).collect();
    assert_eq!(gids, vec![0, 1]);
}
