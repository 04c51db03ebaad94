use crate::definitions::AttributeDefinition;
use crate::pipeline::{AttributeHandler, HandlingResult, LiveElement, attribute_value, evaluate};
use zpt_dom::{AttributeSpec, Namespace};
use zpt_tales::Value;
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::ATTRIBUTES;

/// `tal:attributes`: sets, keeps or removes attributes by expression.
pub struct AttributesHandler;

impl AttributeHandler for AttributesHandler {
    fn attribute(&self) -> &'static str {
        ATTRIBUTES
    }

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError> {
        let Some(value) = attribute_value(&element, ATTRIBUTES) else {
            return Ok(HandlingResult::Continue(element));
        };
        let node = element.node();
        for definition in AttributeDefinition::parse_all(&value)? {
            let namespace = match &definition.prefix {
                Some(prefix) => Namespace {
                    prefix: Some(prefix.clone()),
                    uri: None,
                },
                None => Namespace::none(),
            };
            match evaluate(&element.context, ATTRIBUTES, &definition.expression)? {
                Value::Cancel => {}
                Value::Null => {
                    node.remove_attribute(&AttributeSpec::new(namespace, &definition.name));
                }
                other => node.set_attribute(&namespace, &definition.name, &other.to_string()),
            }
        }
        Ok(HandlingResult::Continue(element))
    }
}
