// src/error.rs
use thiserror::Error;
use zpt_dom::DomError;
use zpt_tales::TalesError;
use zpt_template_core::RenderError;

/// Everything that can go wrong between reading a template and writing the result.
#[derive(Error, Debug)]
pub enum ZptError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Template could not be parsed: {0}")]
    Parse(#[from] DomError),

    #[error("Renderer configuration failed: {0}")]
    Configuration(#[from] TalesError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
