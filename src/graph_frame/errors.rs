use thiserror::Error;

use crate::plan::PlanError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphFrameError {
    #[error("Vertex relation has no `id` column; found columns: [{}]", found.join(", "))]
    MissingVertexIdColumn { found: Vec<String> },

    #[error("Edge relation has no `{column}` column; found columns: [{}]", found.join(", "))]
    MissingEdgeEndpointColumn { column: String, found: Vec<String> },

    /// Conversion to the generic graph materializes relations, so plan
    /// evaluation failures surface here.
    #[error(transparent)]
    Plan(#[from] PlanError),
}
