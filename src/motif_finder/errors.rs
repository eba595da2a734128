use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MotifError {
    #[error("Failed to parse motif: {0}")]
    Parse(String),

    #[error("Invalid motif: {message}")]
    InvalidPattern { message: String },

    /// A vertex name recurs but no longer labels a column of the accumulated
    /// result. Cannot happen with a well-formed term sequence; failing loudly
    /// beats a silently wrong join.
    #[error("Vertex `{name}` was bound earlier but does not label a result column")]
    InconsistentBinding { name: String },

    /// An edge term re-declares a name an earlier term already introduced.
    #[error("Name `{name}` is already bound by an earlier motif term")]
    DuplicateName { name: String },
}
