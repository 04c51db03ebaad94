use crate::context::ExpressionContext;
use crate::error::TalesError;
use crate::expression::Expression;
use crate::registry::ExpressionEvaluator;
use crate::value::Value;

/// Marks the value of its sub-expression as markup to be inserted unescaped.
pub struct StructureEvaluator;

impl StructureEvaluator {
    pub const PREFIX: &'static str = "structure";
}

impl ExpressionEvaluator for StructureEvaluator {
    fn prefix(&self) -> &str {
        Self::PREFIX
    }

    fn evaluate(&self, expression: &Expression, context: &ExpressionContext) -> Result<Value, TalesError> {
        let value = context.evaluate_expression(&expression.sub_expression())?;
        Ok(match value {
            Value::Null | Value::Cancel | Value::Node(_) | Value::Markup(_) => value,
            other => Value::Markup(other.to_string()),
        })
    }
}
