//! The motif-finding compiler.
//!
//! Folds an ordered sequence of motif terms into a single relational plan.
//! The accumulated result has one nested record column per name declared by
//! the motif (see [`crate::plan::Relation::nest`]); nesting keeps repeated
//! references to the same base table collision-free, and dot-qualified
//! [`ColumnRef`] paths (`e.src`, `a.id`) express the join predicates.
//!
//! Join shape per edge term:
//! - already-bound endpoints become equality predicates in the edge join
//!   itself, against the accumulated result;
//! - an unseen named source is joined inner on `edge.src == src.id`;
//! - an unseen named destination is joined left-outer on `edge.dst == dst.id`,
//!   so edges whose destination is missing survive with null attributes.
//! The inner/outer asymmetry between the two endpoint roles is deliberate and
//! covered by regression tests; do not "fix" one side to match the other.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use log::debug;

use crate::graph_frame::{GraphFrame, DST, ID, SRC};
use crate::motif_parser::ast::{EdgePattern, MotifTerm, VertexPattern};
use crate::motif_parser::parse_motif;
use crate::plan::{ColumnRef, JoinMode, Relation};

mod errors;

pub use errors::MotifError;

/// Compiler state threaded through the fold: the names introduced so far and
/// the accumulated result plan (absent until the first contributing term).
#[derive(Debug, Clone, Default)]
struct FindState {
    bound: HashSet<String>,
    result: Option<Relation>,
}

/// Parse `motif` and compile it against `frame`'s vertex and edge relations.
///
/// The returned relation is lazy; its top-level columns are the names the
/// motif declares, each holding a nested record of the matched base row.
pub fn find_motif(frame: &GraphFrame, motif: &str) -> Result<Relation, MotifError> {
    let terms = parse_motif(motif).map_err(|e| MotifError::Parse(e.to_string()))?;
    compile(frame, &terms)
}

/// Compile an already-parsed term sequence.
pub fn compile(frame: &GraphFrame, terms: &[MotifTerm<'_>]) -> Result<Relation, MotifError> {
    let mut state = FindState::default();
    for term in terms {
        apply_term(frame, &mut state, term)?;
    }
    Ok(state.result.unwrap_or_else(Relation::empty))
}

impl GraphFrame {
    /// Find all matches of a motif. See [`find_motif`].
    pub fn find(&self, motif: &str) -> Result<Relation, MotifError> {
        find_motif(self, motif)
    }
}

/// Vertex relation nested under a declared name: the sub-relation whose sole
/// column `name` holds the full vertex row as a record.
fn nested_vertices(frame: &GraphFrame, name: &str) -> Relation {
    frame.vertices().nest(name)
}

/// Edge relation nested under a declared name.
fn nested_edges(frame: &GraphFrame, name: &str) -> Relation {
    frame.edges().nest(name)
}

fn apply_term(
    frame: &GraphFrame,
    state: &mut FindState,
    term: &MotifTerm<'_>,
) -> Result<(), MotifError> {
    match term {
        MotifTerm::Vertex(vertex) => apply_vertex(frame, state, vertex),
        MotifTerm::Edge(edge) => apply_edge(frame, state, edge),
        MotifTerm::Negation(edge) => apply_negation(frame, state, edge),
    }
}

fn apply_vertex(
    frame: &GraphFrame,
    state: &mut FindState,
    vertex: &VertexPattern<'_>,
) -> Result<(), MotifError> {
    let Some(name) = vertex.name else {
        // Anonymous vertex: matches anything, contributes nothing
        return Ok(());
    };
    if state.bound.contains(name) {
        // Recurring name: consistency check only, no new join
        let labelled = state
            .result
            .as_ref()
            .is_some_and(|r| r.has_column(name));
        if !labelled {
            return Err(MotifError::InconsistentBinding {
                name: name.to_string(),
            });
        }
        return Ok(());
    }
    debug!("motif vertex `{}`: joining vertex relation", name);
    let nested = nested_vertices(frame, name);
    state.result = Some(match &state.result {
        Some(prev) => prev.cross_join(&nested),
        None => nested,
    });
    state.bound.insert(name.to_string());
    Ok(())
}

fn apply_edge(
    frame: &GraphFrame,
    state: &mut FindState,
    edge: &EdgePattern<'_>,
) -> Result<(), MotifError> {
    match edge.name {
        Some(name) => apply_named_edge(frame, state, name, edge.src, edge.dst),
        None => {
            // Anonymous edge: process under a fresh internal name, then drop
            // the column so edge attributes do not leak into the result.
            let tmp = generate_edge_name();
            apply_named_edge(frame, state, &tmp, edge.src, edge.dst)?;
            if let Some(result) = &state.result {
                state.result = Some(result.drop_column(&tmp));
            }
            state.bound.remove(&tmp);
            Ok(())
        }
    }
}

fn apply_named_edge(
    frame: &GraphFrame,
    state: &mut FindState,
    name: &str,
    src: VertexPattern<'_>,
    dst: VertexPattern<'_>,
) -> Result<(), MotifError> {
    if state.bound.contains(name) {
        return Err(MotifError::DuplicateName {
            name: name.to_string(),
        });
    }

    let edge_src = ColumnRef::path(name, SRC);
    let edge_dst = ColumnRef::path(name, DST);
    // Snapshot before this term binds anything
    let src_bound = src.name.is_some_and(|n| state.bound.contains(n));
    let dst_bound = dst.name.is_some_and(|n| state.bound.contains(n));

    // Bound endpoints become equality predicates in the edge join itself
    let mut on = Vec::new();
    if let (Some(s), true) = (src.name, src_bound) {
        on.push((edge_src.clone(), ColumnRef::path(s, ID)));
    }
    if let (Some(d), true) = (dst.name, dst_bound) {
        on.push((edge_dst.clone(), ColumnRef::path(d, ID)));
    }
    debug!(
        "motif edge `{}`: joining edge relation with {} bound-endpoint predicate(s)",
        name,
        on.len()
    );

    let nested = nested_edges(frame, name);
    let mut result = match &state.result {
        Some(prev) => prev.join(&nested, on, JoinMode::Inner),
        // No accumulated result implies no bound endpoints either
        None => nested,
    };

    if let (Some(s), false) = (src.name, src_bound) {
        debug!("motif edge `{}`: inner join on unseen source `{}`", name, s);
        result = result.join(
            &nested_vertices(frame, s),
            vec![(edge_src, ColumnRef::path(s, ID))],
            JoinMode::Inner,
        );
        state.bound.insert(s.to_string());
    }
    if let (Some(d), false) = (dst.name, dst_bound) {
        debug!(
            "motif edge `{}`: left outer join on unseen destination `{}`",
            name, d
        );
        result = result.join(
            &nested_vertices(frame, d),
            vec![(edge_dst, ColumnRef::path(d, ID))],
            JoinMode::LeftOuter,
        );
        state.bound.insert(d.to_string());
    }

    state.bound.insert(name.to_string());
    state.result = Some(result);
    Ok(())
}

fn apply_negation(
    frame: &GraphFrame,
    state: &mut FindState,
    edge: &EdgePattern<'_>,
) -> Result<(), MotifError> {
    let Some(prev) = state.result.clone() else {
        return Err(MotifError::InvalidPattern {
            message: "negation requires a preceding positive pattern to negate against"
                .to_string(),
        });
    };

    // Compile the negated edge against the current state, in isolation:
    // bindings it would introduce stay local to the candidate.
    let mut probe = FindState {
        bound: state.bound.clone(),
        result: Some(prev.clone()),
    };
    apply_edge(frame, &mut probe, edge)?;
    let candidate = probe.result.ok_or_else(|| MotifError::InvalidPattern {
        message: "negated edge produced no candidate relation".to_string(),
    })?;

    // Project the candidate back onto the accumulated result's columns; this
    // discards the negated edge's name and any endpoint columns introduced
    // inside the negation, then subtract the surviving rows.
    let columns = prev
        .schema()
        .into_iter()
        .map(|c| (ColumnRef::col(c.clone()), c))
        .collect();
    debug!("motif negation: subtracting candidate rows from accumulated result");
    state.result = Some(prev.difference(&candidate.project(columns)));
    Ok(())
}

static TMP_EDGE_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Fresh internal name for an anonymous edge, e.g. `__tmp3`. Never collides
/// with parsed names, which cannot start with an underscore.
fn generate_edge_name() -> String {
    let n = TMP_EDGE_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("__tmp{}", n)
}

/// Reset the anonymous-edge counter (useful for testing to get predictable names).
pub fn reset_tmp_edge_counter() {
    TMP_EDGE_COUNTER.store(1, Ordering::SeqCst);
}
