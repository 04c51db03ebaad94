use crate::context::ExpressionContext;
use crate::error::TalesError;
use crate::evaluators::PathEvaluator;
use crate::expression::Expression;
use crate::path::Path;
use crate::registry::ExpressionEvaluator;
use crate::value::Value;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `$$`, `${path}` or `$path`, matched left to right so escapes win.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|\{([a-zA-Z0-9 /_.,~|?-]+)\}|([a-zA-Z0-9_/]+))")
        .expect("BUG: invalid PLACEHOLDER_RE regex literal")
});

/// Literal text with `$name` / `${path}` interpolation.
pub struct StringEvaluator;

impl StringEvaluator {
    pub const PREFIX: &'static str = "string";

    fn replacement(captures: &Captures<'_>, context: &ExpressionContext) -> Result<String, TalesError> {
        if captures.get(1).is_some() {
            return Ok("$".to_string());
        }
        let path = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map_or("", |m| m.as_str());
        let value = PathEvaluator.evaluate_path(&Path::create(path), context)?;
        Ok(value.to_string())
    }
}

impl ExpressionEvaluator for StringEvaluator {
    fn prefix(&self) -> &str {
        Self::PREFIX
    }

    fn evaluate(&self, expression: &Expression, context: &ExpressionContext) -> Result<Value, TalesError> {
        let source = expression.content();
        let mut output = String::with_capacity(source.len());
        let mut last = 0;
        for captures in PLACEHOLDER_RE.captures_iter(source) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            output.push_str(&source[last..whole.start()]);
            output.push_str(&Self::replacement(&captures, context)?);
            last = whole.end();
        }
        output.push_str(&source[last..]);
        Ok(Value::String(output))
    }
}
