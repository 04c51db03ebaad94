pub mod fixtures;
pub mod markup_assertions;

use serde_json::Value;
use zpt::{ZptError, ZptRenderer};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Render a template in XML mode against a JSON model
pub fn render(template: &str, model: Value) -> Result<String, ZptError> {
    ZptRenderer::new().render_json(template, &model)
}

/// Render a template in HTML mode against a JSON model
pub fn render_html(template: &str, model: Value) -> Result<String, ZptError> {
    ZptRenderer::builder().html().build().render_json(template, &model)
}
