use thiserror::Error;

/// Errors raised by document operations.
#[derive(Error, Debug)]
pub enum DomError {
    #[error("Markup parsing error: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("Operation requires a node attached to a parent: {0}")]
    Detached(String),

    #[error("Node belongs to a different document implementation")]
    ForeignNode,

    #[error("A node cannot be inserted relative to itself")]
    SelfInsertion,
}
