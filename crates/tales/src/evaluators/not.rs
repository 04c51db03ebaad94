use crate::context::ExpressionContext;
use crate::error::TalesError;
use crate::expression::Expression;
use crate::registry::ExpressionEvaluator;
use crate::value::Value;

/// Boolean negation of its sub-expression.
pub struct NotEvaluator;

impl NotEvaluator {
    pub const PREFIX: &'static str = "not";
}

impl ExpressionEvaluator for NotEvaluator {
    fn prefix(&self) -> &str {
        Self::PREFIX
    }

    fn evaluate(&self, expression: &Expression, context: &ExpressionContext) -> Result<Value, TalesError> {
        let value = context.evaluate_expression(&expression.sub_expression())?;
        Ok(Value::Bool(!value.is_truthy()))
    }
}
