use relgraph::plan::{Table, Value};
use relgraph::{GraphFrame, Relation};
use serial_test::serial;

use crate::{init_logging, sample_frame};

fn nested_id(table: &Table, row: usize, column: &str) -> i64 {
    let idx = table.column_index(column).expect("column present");
    table.rows[row][idx]
        .field("id")
        .and_then(Value::as_int)
        .expect("nested id field")
}

fn nested_str(table: &Table, row: usize, column: &str, field: &str) -> String {
    let idx = table.column_index(column).expect("column present");
    match table.rows[row][idx].field(field) {
        Some(Value::Str(s)) => s.clone(),
        other => panic!("expected string field `{}`, got {:?}", field, other),
    }
}

#[test]
fn test_single_vertex_motif_round_trip() {
    init_logging();
    let frame = sample_frame();
    let table = frame.find("(a)").unwrap().collect().unwrap();
    assert_eq!(table.columns, vec!["a"]);
    assert_eq!(table.rows.len(), 3);
    let mut ids: Vec<i64> = (0..3).map(|r| nested_id(&table, r, "a")).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_chained_motif_binds_shared_vertex_once() -> anyhow::Result<()> {
    init_logging();
    let frame = sample_frame();
    let table = frame.find("(a)-[e1]->(b); (b)-[e2]->(c)")?.collect()?;
    assert_eq!(table.rows.len(), 1);
    assert_eq!(nested_id(&table, 0, "a"), 1);
    assert_eq!(nested_id(&table, 0, "b"), 2);
    assert_eq!(nested_id(&table, 0, "c"), 3);
    assert_eq!(nested_str(&table, 0, "e1", "w"), "x");
    assert_eq!(nested_str(&table, 0, "e2", "w"), "y");
    Ok(())
}

#[test]
fn test_negation_with_no_reverse_edges_keeps_everything() {
    let frame = sample_frame();
    let table = frame
        .find("(a)-[e]->(b); !(b)-[e2]->(a)")
        .unwrap()
        .collect()
        .unwrap();
    // No reverse edges exist, so both positive matches survive
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.columns, vec!["e", "a", "b"]);
}

#[test]
fn test_negation_excludes_pairs_whose_reverse_appeared() {
    let vertices = Relation::values(
        ["id", "name"],
        vec![
            vec![1.into(), "alice".into()],
            vec![2.into(), "bob".into()],
            vec![3.into(), "carol".into()],
        ],
    );
    let edges = Relation::values(
        ["src", "dst", "w"],
        vec![
            vec![1.into(), 2.into(), "x".into()],
            vec![2.into(), 3.into(), "y".into()],
            vec![2.into(), 1.into(), "back".into()],
        ],
    );
    let frame = GraphFrame::new(vertices, edges).unwrap();
    let table = frame
        .find("(a)-[e]->(b); !(b)-[e2]->(a)")
        .unwrap()
        .collect()
        .unwrap();
    // (1→2) and (2→1) each now have a reverse edge; only (2→3) survives
    assert_eq!(table.rows.len(), 1);
    assert_eq!(nested_id(&table, 0, "a"), 2);
    assert_eq!(nested_id(&table, 0, "b"), 3);
    assert_eq!(nested_str(&table, 0, "e", "w"), "y");
}

#[test]
fn test_dangling_destination_survives_with_null_attributes() {
    // V = {1}, E = {(1→2)}: outer-join policy on the unseen destination
    let vertices = Relation::values(["id", "name"], vec![vec![1.into(), "alice".into()]]);
    let edges = Relation::values(["src", "dst"], vec![vec![1.into(), 2.into()]]);
    let frame = GraphFrame::new(vertices, edges).unwrap();
    let table = frame.find("(a)-[e]->(b)").unwrap().collect().unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(nested_id(&table, 0, "a"), 1);
    let b = table.column_index("b").unwrap();
    assert!(table.rows[0][b].is_null(), "unmatched destination is null");
}

#[test]
fn test_dangling_source_is_dropped() {
    // V = {2}, E = {(1→2)}: inner-join policy on the unseen source
    let vertices = Relation::values(["id", "name"], vec![vec![2.into(), "bob".into()]]);
    let edges = Relation::values(["src", "dst"], vec![vec![1.into(), 2.into()]]);
    let frame = GraphFrame::new(vertices, edges).unwrap();
    let table = frame.find("(a)-[e]->(b)").unwrap().collect().unwrap();
    assert!(table.rows.is_empty(), "missing source drops the edge row");
}

#[test]
fn test_empty_motif_is_an_empty_relation_not_an_error() {
    let table = sample_frame().find("").unwrap().collect().unwrap();
    assert!(table.columns.is_empty());
    assert!(table.rows.is_empty());
}

#[test]
fn test_bound_source_and_destination_as_predicates() {
    // Both endpoints already bound: the edge join carries both equalities
    let frame = sample_frame();
    let table = frame
        .find("(a); (b); (a)-[e]->(b)")
        .unwrap()
        .collect()
        .unwrap();
    assert_eq!(table.rows.len(), 2);
    for row in 0..2 {
        let a = nested_id(&table, row, "a");
        let b = nested_id(&table, row, "b");
        assert!(matches!((a, b), (1, 2) | (2, 3)));
    }
}

#[test]
#[serial]
fn test_anonymous_edges_never_collide() {
    relgraph::motif_finder::reset_tmp_edge_counter();
    let frame = sample_frame();
    let relation = frame.find("(a)-[]->(b); (b)-[]->(c)").unwrap();
    assert_eq!(relation.schema(), vec!["a", "b", "c"]);
    let table = relation.collect().unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(nested_id(&table, 0, "a"), 1);
    assert_eq!(nested_id(&table, 0, "c"), 3);
}
