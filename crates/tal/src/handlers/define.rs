use crate::definitions::{DefinitionScope, VariableDefinition};
use crate::pipeline::{AttributeHandler, HandlingResult, LiveElement, attribute_value, evaluate};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::DEFINE;

/// `tal:define`: binds each definition in turn, so later ones can use earlier ones.
pub struct DefineHandler;

impl AttributeHandler for DefineHandler {
    fn attribute(&self) -> &'static str {
        DEFINE
    }

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError> {
        let Some(value) = attribute_value(&element, DEFINE) else {
            return Ok(HandlingResult::Continue(element));
        };
        for definition in VariableDefinition::parse_all(&value)? {
            let value = evaluate(&element.context, DEFINE, &definition.expression)?;
            if value.is_cancel() {
                log::trace!("Definition of '{}' cancelled", definition.name);
                continue;
            }
            match definition.scope {
                DefinitionScope::Local => element.context.add_local(&definition.name, value),
                DefinitionScope::Global => element.context.add_global(&definition.name, value),
            }
        }
        Ok(HandlingResult::Continue(element))
    }
}
