use crate::definitions::{InsertionMode, NodeExpression};
use crate::pipeline::{
    AttributeHandler, ChildVisit, HandlingResult, LiveElement, attribute_value, evaluate,
};
use zpt_dom::{Node, NodeRef};
use zpt_tales::Value;
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{CONTENT, REPLACE, describe};

/// `tal:content` and `tal:replace`, which are mutually exclusive.
pub struct ContentOrReplaceHandler;

/// Nodes to insert for `value`, owned by the document of `owner`.
pub(crate) fn nodes_for(
    owner: &dyn Node,
    value: &Value,
    mode: InsertionMode,
) -> Result<Vec<NodeRef>, RenderError> {
    let nodes = match (value, mode) {
        (Value::Node(node), _) => vec![node.deep_clone()],
        (Value::Markup(markup), _) => owner.parse_fragment(markup)?,
        (other, InsertionMode::Structure) => owner.parse_fragment(&other.to_string())?,
        (other, InsertionMode::Text) => vec![owner.create_text_node(&other.to_string())],
    };
    Ok(nodes)
}

impl ContentOrReplaceHandler {
    fn content(&self, element: LiveElement, value: &str) -> Result<HandlingResult, RenderError> {
        let parsed = NodeExpression::parse(value);
        let node = element.node().clone();
        match evaluate(&element.context, CONTENT, &parsed.expression)? {
            Value::Cancel => return Ok(HandlingResult::Continue(element)),
            Value::Null => node.clear_children(),
            other => {
                let nodes = nodes_for(node.as_ref(), &other, parsed.mode)?;
                node.clear_children();
                for inserted in nodes {
                    node.append_child(inserted)?;
                }
            }
        }
        Ok(HandlingResult::Continue(LiveElement {
            children: ChildVisit::Skip,
            ..element
        }))
    }

    fn replace(&self, element: LiveElement, value: &str) -> Result<HandlingResult, RenderError> {
        let parsed = NodeExpression::parse(value);
        let node = element.node().clone();
        match evaluate(&element.context, REPLACE, &parsed.expression)? {
            Value::Cancel => return Ok(HandlingResult::Continue(element)),
            Value::Null => node.remove(),
            other => {
                let nodes = nodes_for(node.as_ref(), &other, parsed.mode)?;
                node.replace_with(nodes)?;
            }
        }
        Ok(HandlingResult::Abort)
    }
}

impl AttributeHandler for ContentOrReplaceHandler {
    fn attribute(&self) -> &'static str {
        CONTENT
    }

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError> {
        match (
            attribute_value(&element, CONTENT),
            attribute_value(&element, REPLACE),
        ) {
            (Some(_), Some(_)) => Err(RenderError::ContentAndReplace {
                element: describe(element.node().as_ref()),
            }),
            (Some(content), None) => self.content(element, &content),
            (None, Some(replace)) => self.replace(element, &replace),
            (None, None) => Ok(HandlingResult::Continue(element)),
        }
    }
}
