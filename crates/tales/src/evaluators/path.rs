use crate::context::ExpressionContext;
use crate::error::TalesError;
use crate::expression::Expression;
use crate::path::{Path, PathPart, PathWalker};
use crate::registry::ExpressionEvaluator;
use crate::value::Value;

/// Name that exposes the builtin variables even when shadowed by definitions.
pub const CONTEXTS: &str = "CONTEXTS";

/// Resolves `a/b|c/d` style paths through the object traverser.
pub struct PathEvaluator;

impl PathEvaluator {
    pub const PREFIX: &'static str = "path";

    /// Tries each alternative in order; the first that resolves completely wins.
    pub fn evaluate_path(&self, path: &Path, context: &ExpressionContext) -> Result<Value, TalesError> {
        let mut walker = path.walker();
        while walker.next_component() {
            if let Some(value) = resolve_component(&mut walker, context) {
                return Ok(value);
            }
        }
        log::trace!("No alternative of path '{}' resolved", path.text());
        Err(TalesError::evaluation(path.text().trim()))
    }
}

impl ExpressionEvaluator for PathEvaluator {
    fn prefix(&self) -> &str {
        Self::PREFIX
    }

    fn evaluate(&self, expression: &Expression, context: &ExpressionContext) -> Result<Value, TalesError> {
        self.evaluate_path(&Path::create(expression.content()), context)
    }
}

fn resolve_component(walker: &mut PathWalker<'_>, context: &ExpressionContext) -> Option<Value> {
    if !walker.next_part() {
        return None;
    }
    let root_name = part_name(walker.current()?, context)?;
    let mut current = resolve_root(&root_name, context)?;
    while walker.next_part() {
        let name = part_name(walker.current()?, context)?;
        current = context.traverser().traverse(&current, &name)?;
    }
    Some(current)
}

fn part_name(part: &PathPart, context: &ExpressionContext) -> Option<String> {
    if !part.is_interpolated() {
        return Some(part.name().to_string());
    }
    match PathEvaluator.evaluate_path(&Path::create(part.name()), context) {
        Ok(value) => Some(value.to_string()),
        Err(err) => {
            log::trace!("Interpolated part '{}' did not resolve: {}", part.name(), err);
            None
        }
    }
}

fn resolve_root(name: &str, context: &ExpressionContext) -> Option<Value> {
    if name.is_empty() {
        return None;
    }
    if name == CONTEXTS {
        return Some(context.contexts());
    }
    context.get(name).or_else(|| literal(name))
}

/// Numbers and booleans written directly as a path root.
fn literal(name: &str) -> Option<Value> {
    match name {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }
    let numeric = name
        .strip_prefix('-')
        .unwrap_or(name)
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.');
    if !numeric {
        return None;
    }
    name.parse::<i64>()
        .map(Value::Int)
        .or_else(|_| name.parse::<f64>().map(Value::Float))
        .ok()
}
