//! Integration tests - end-to-end motif finding, degrees and graph conversion
//! over the public API, with plans actually collected.

mod motif_finding;

/// Shared fixture: V = {1, 2, 3}, E = {(1→2, w="x"), (2→3, w="y")}.
pub fn sample_frame() -> relgraph::GraphFrame {
    let vertices = relgraph::Relation::values(
        ["id", "name"],
        vec![
            vec![1.into(), "alice".into()],
            vec![2.into(), "bob".into()],
            vec![3.into(), "carol".into()],
        ],
    );
    let edges = relgraph::Relation::values(
        ["src", "dst", "w"],
        vec![
            vec![1.into(), 2.into(), "x".into()],
            vec![2.into(), 3.into(), "y".into()],
        ],
    );
    relgraph::GraphFrame::new(vertices, edges).expect("fixture frame is valid")
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
