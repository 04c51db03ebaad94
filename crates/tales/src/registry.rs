//! Prefix-keyed dispatch of expressions to evaluators.

use crate::context::ExpressionContext;
use crate::error::TalesError;
use crate::evaluators::{NotEvaluator, PathEvaluator, StringEvaluator, StructureEvaluator};
use crate::expression::Expression;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A strategy for one expression prefix. Evaluators hold no per-render state.
pub trait ExpressionEvaluator: Send + Sync {
    fn prefix(&self) -> &str;

    fn evaluate(
        &self,
        expression: &Expression,
        context: &ExpressionContext,
    ) -> Result<Value, TalesError>;
}

/// Evaluators keyed by their unique prefix.
///
/// Built once per engine and shared by reference; `Default` registers the
/// built-in `path`, `string`, `not` and `structure` evaluators.
pub struct EvaluatorRegistry {
    evaluators: HashMap<String, Arc<dyn ExpressionEvaluator>>,
    default_prefix: String,
}

impl EvaluatorRegistry {
    /// A registry with nothing registered, defaulting unprefixed expressions to `path`.
    pub fn empty() -> Self {
        Self {
            evaluators: HashMap::new(),
            default_prefix: PathEvaluator::PREFIX.to_string(),
        }
    }

    pub fn register(&mut self, evaluator: impl ExpressionEvaluator + 'static) -> Result<(), TalesError> {
        let prefix = evaluator.prefix().to_string();
        if self.evaluators.contains_key(&prefix) {
            return Err(TalesError::DuplicatePrefix { prefix });
        }
        log::debug!("Registered expression evaluator for '{}:'", prefix);
        self.evaluators.insert(prefix, Arc::new(evaluator));
        Ok(())
    }

    pub fn get(&self, prefix: &str) -> Result<&dyn ExpressionEvaluator, TalesError> {
        self.evaluators
            .get(prefix)
            .map(|evaluator| evaluator.as_ref())
            .ok_or_else(|| TalesError::UnknownEvaluatorPrefix {
                prefix: prefix.to_string(),
            })
    }

    /// The evaluator for the expression's prefix, or the default one when it has none.
    pub fn evaluator_for(&self, expression: &Expression) -> Result<&dyn ExpressionEvaluator, TalesError> {
        self.get(expression.prefix().unwrap_or(&self.default_prefix))
    }

    pub fn prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = self.evaluators.keys().map(String::as_str).collect();
        prefixes.sort_unstable();
        prefixes
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        let builtins: [Arc<dyn ExpressionEvaluator>; 4] = [
            Arc::new(PathEvaluator),
            Arc::new(StringEvaluator),
            Arc::new(NotEvaluator),
            Arc::new(StructureEvaluator),
        ];
        for evaluator in builtins {
            registry
                .evaluators
                .insert(evaluator.prefix().to_string(), evaluator);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl ExpressionEvaluator for Upper {
        fn prefix(&self) -> &str {
            "upper"
        }

        fn evaluate(&self, expression: &Expression, _: &ExpressionContext) -> Result<Value, TalesError> {
            Ok(Value::String(expression.content().to_uppercase()))
        }
    }

    #[test]
    fn default_registry_has_builtins() {
        let registry = EvaluatorRegistry::default();
        assert_eq!(registry.prefixes(), vec!["not", "path", "string", "structure"]);
        let unprefixed = Expression::new("a/b");
        assert_eq!(registry.evaluator_for(&unprefixed).unwrap().prefix(), "path");
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        let registry = EvaluatorRegistry::default();
        let result = registry.evaluator_for(&Expression::new("python:1+1"));
        assert!(matches!(
            result,
            Err(TalesError::UnknownEvaluatorPrefix { prefix }) if prefix == "python"
        ));
    }

    #[test]
    fn prefixes_stay_unique() {
        let mut registry = EvaluatorRegistry::default();
        registry.register(Upper).unwrap();
        assert!(matches!(
            registry.register(Upper),
            Err(TalesError::DuplicatePrefix { .. })
        ));
        assert!(matches!(
            registry.register(StringEvaluator),
            Err(TalesError::DuplicatePrefix { .. })
        ));
    }
}
