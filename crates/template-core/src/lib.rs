//! Core abstractions for page template rendering
//!
//! This crate provides the pieces shared by every rendering pass: the reserved
//! TAL/METAL attribute vocabulary, the render configuration, the error type the
//! passes report, and the [`DocumentPass`] contract the renderer drives.
//!
//! ## Key Abstractions
//!
//! - **`DocumentPass`**: one whole-document transformation (METAL expansion, TAL, cleanup)
//! - **`RenderConfig`**: configuration for a render
//! - **`RenderError`**: everything a pass can fail with
//! - **`vocabulary`**: namespaces and attribute specs of the reserved attributes

pub mod vocabulary;

use thiserror::Error;
use zpt_dom::{DocumentMode, DomError};
use zpt_tales::{ExpressionContext, TalesError};

/// Errors that can occur while rendering a document
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Tales(#[from] TalesError),

    #[error("Document error: {0}")]
    Dom(#[from] DomError),

    #[error("Invalid value for {attribute}: '{value}'")]
    InvalidAttribute { attribute: String, value: String },

    #[error("Unrecognised attribute {attribute} on {element}")]
    UnknownAttribute { attribute: String, element: String },

    #[error("{element} cannot carry both tal:content and tal:replace")]
    ContentAndReplace { element: String },

    #[error("{attribute}=\"{expression}\" on {element} failed: {source}")]
    Expression {
        attribute: String,
        expression: String,
        element: String,
        #[source]
        source: TalesError,
    },

    #[error("The on-error handler of {element} failed while handling '{handled}': {source}")]
    OnErrorHandling {
        element: String,
        handled: String,
        #[source]
        source: Box<RenderError>,
    },

    #[error("Macro expression '{expression}' did not resolve to an element")]
    MacroResolution { expression: String },

    #[error("Macro expansion exceeded the maximum depth of {limit}")]
    MacroDepthExceeded { limit: usize },
}

impl RenderError {
    /// Short name of the failure kind, as exposed to `error/type`.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::Tales(inner) | RenderError::Expression { source: inner, .. } => inner.kind(),
            RenderError::Dom(_) => "DomError",
            RenderError::InvalidAttribute { .. } | RenderError::UnknownAttribute { .. } => {
                "ParseFailure"
            }
            RenderError::ContentAndReplace { .. } => "ContentAndReplace",
            RenderError::OnErrorHandling { .. } => "OnErrorHandlingFailure",
            RenderError::MacroResolution { .. } => "MacroResolutionFailure",
            RenderError::MacroDepthExceeded { .. } => "MacroDepthExceeded",
        }
    }
}

/// Configuration for a render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// How the document is parsed back out.
    pub mode: DocumentMode,
    /// Limit on nested macro expansion, guarding against self-using macros.
    pub max_macro_depth: usize,
    /// If true, unknown attributes in the TAL/METAL namespaces are an error.
    pub strict_attributes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: DocumentMode::Xml,
            max_macro_depth: 32,
            strict_attributes: true,
        }
    }
}

impl RenderConfig {
    pub fn html() -> Self {
        Self {
            mode: DocumentMode::Html,
            ..Self::default()
        }
    }
}

/// A whole-document transformation run by the renderer, in order.
pub trait DocumentPass {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Processes the subtree of `context.node()` in place.
    fn process(&self, context: &ExpressionContext) -> Result<(), RenderError>;
}
