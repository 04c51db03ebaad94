use crate::pipeline::{AttributeHandler, HandlingResult, LiveElement, attribute_value, evaluate};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::CONDITION;

/// `tal:condition`: removes the element unless the expression is truthy.
pub struct ConditionHandler;

impl AttributeHandler for ConditionHandler {
    fn attribute(&self) -> &'static str {
        CONDITION
    }

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError> {
        let Some(expression) = attribute_value(&element, CONDITION) else {
            return Ok(HandlingResult::Continue(element));
        };
        if evaluate(&element.context, CONDITION, &expression)?.is_truthy() {
            Ok(HandlingResult::Continue(element))
        } else {
            element.node().remove();
            Ok(HandlingResult::Abort)
        }
    }
}
