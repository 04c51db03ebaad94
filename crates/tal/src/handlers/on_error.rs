use super::nodes_for;
use crate::cleanup::purge_reserved_attributes;
use crate::definitions::NodeExpression;
use zpt_tales::{ErrorInfo, ExpressionContext, Value};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{ON_ERROR, describe, tal};

/// `tal:on-error`: replaces the element's content when it, or anything in
/// it, fails to render.
#[derive(Default)]
pub struct OnErrorHandler;

impl OnErrorHandler {
    /// Hands `error` back unchanged if the element has no handler.
    pub fn recover(&self, context: &ExpressionContext, error: RenderError) -> Result<(), RenderError> {
        let node = context.node();
        let Some(attr) = node.get_attribute(&tal(ON_ERROR)) else {
            return Err(error);
        };
        let element = describe(node.as_ref());
        log::info!("Handling error on {}: {}", element, error);

        let mut handler_context = context.clone();
        handler_context.set_error(ErrorInfo::new(error.kind(), &error.to_string()));
        self.replace_content(&handler_context, &attr.value)
            .map_err(|source| RenderError::OnErrorHandling {
                element,
                handled: error.to_string(),
                source: Box::new(source),
            })?;
        purge_reserved_attributes(node.as_ref());
        Ok(())
    }

    fn replace_content(&self, context: &ExpressionContext, value: &str) -> Result<(), RenderError> {
        let parsed = NodeExpression::parse(value);
        let node = context.node();
        let value = context
            .evaluate(&parsed.expression)
            .map_err(|source| RenderError::Expression {
                attribute: format!("tal:{}", ON_ERROR),
                expression: parsed.expression.clone(),
                element: describe(node.as_ref()),
                source,
            })?;
        match value {
            Value::Cancel => {}
            Value::Null => node.clear_children(),
            other => {
                let nodes = nodes_for(node.as_ref(), &other, parsed.mode)?;
                node.clear_children();
                for inserted in nodes {
                    node.append_child(inserted)?;
                }
            }
        }
        Ok(())
    }
}
