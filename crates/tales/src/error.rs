use thiserror::Error;
use zpt_dom::DomError;

#[derive(Error, Debug)]
pub enum TalesError {
    #[error("Malformed expression prefix '{0}'")]
    ParseFailure(String),

    #[error("No evaluator is registered for the prefix '{prefix}'")]
    UnknownEvaluatorPrefix { prefix: String },

    #[error("An evaluator is already registered for the prefix '{prefix}'")]
    DuplicatePrefix { prefix: String },

    #[error("Expression '{expression}' could not be evaluated")]
    EvaluationFailure { expression: String },

    #[error("Value of '{expression}' is not a sequence and cannot be repeated")]
    NotIterable { expression: String },

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}

impl TalesError {
    pub(crate) fn evaluation(expression: &str) -> Self {
        TalesError::EvaluationFailure {
            expression: expression.to_string(),
        }
    }

    /// Short name of the failure kind, as exposed to `error/type`.
    pub fn kind(&self) -> &'static str {
        match self {
            TalesError::ParseFailure(_) => "ParseFailure",
            TalesError::UnknownEvaluatorPrefix { .. } => "UnknownEvaluatorPrefix",
            TalesError::DuplicatePrefix { .. } => "DuplicatePrefix",
            TalesError::EvaluationFailure { .. } => "ExpressionEvaluationFailure",
            TalesError::NotIterable { .. } => "NotIterable",
            TalesError::Dom(_) => "DomError",
        }
    }
}
