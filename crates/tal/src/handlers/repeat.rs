use crate::definitions::RepeatDefinition;
use crate::pipeline::{AttributeHandler, HandlingResult, LiveElement, attribute_value, evaluate};
use crate::repetition::RepetitionContextProvider;
use zpt_tales::{TalesError, Value};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{REPEAT, describe};

/// `tal:repeat`: one copy of the element per item, each with its own scope.
pub struct RepeatHandler;

impl AttributeHandler for RepeatHandler {
    fn attribute(&self) -> &'static str {
        REPEAT
    }

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError> {
        let Some(value) = attribute_value(&element, REPEAT) else {
            return Ok(HandlingResult::Continue(element));
        };
        let definition = RepeatDefinition::parse(&value)?;
        let items = match evaluate(&element.context, REPEAT, &definition.expression)? {
            Value::Cancel => return Ok(HandlingResult::Continue(element)),
            Value::Null => {
                log::warn!("tal:repeat over nothing on {}", describe(element.node().as_ref()));
                Vec::new()
            }
            other => other.as_sequence().ok_or_else(|| RenderError::Expression {
                attribute: format!("tal:{}", REPEAT),
                expression: definition.expression.clone(),
                element: describe(element.node().as_ref()),
                source: TalesError::NotIterable {
                    expression: definition.expression.clone(),
                },
            })?,
        };
        let contexts =
            RepetitionContextProvider::create(&element.context, &definition.name, items)?;
        Ok(HandlingResult::Replace(
            contexts.into_iter().map(LiveElement::new).collect(),
        ))
    }
}
