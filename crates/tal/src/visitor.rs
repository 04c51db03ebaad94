use crate::handlers::OnErrorHandler;
use crate::pipeline::{AttributePipeline, ChildVisit, LiveElement, PipelineOutcome};
use crate::cleanup::purge_reserved_attributes;
use zpt_dom::{Node, NodeKind};
use zpt_tales::ExpressionContext;
use zpt_template_core::vocabulary::{describe, is_unknown_reserved};
use zpt_template_core::{DocumentPass, RenderConfig, RenderError};

/// Depth-first TAL processing: each element goes through the attribute
/// pipeline before its children, and loses its TAL attributes once its
/// subtree is done.
pub struct TalVisitor {
    pipeline: AttributePipeline,
    on_error: OnErrorHandler,
    strict_attributes: bool,
}

impl TalVisitor {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            pipeline: AttributePipeline::new(),
            on_error: OnErrorHandler,
            strict_attributes: config.strict_attributes,
        }
    }

    fn check_attributes(&self, node: &dyn Node) -> Result<(), RenderError> {
        if !self.strict_attributes {
            return Ok(());
        }
        match node.attributes().into_iter().find(is_unknown_reserved) {
            Some(attr) => Err(RenderError::UnknownAttribute {
                attribute: attr.qualified_name(),
                element: describe(node),
            }),
            None => Ok(()),
        }
    }

    fn visit_element(&self, context: ExpressionContext) -> Result<(), RenderError> {
        if let Err(error) = self.check_attributes(context.node().as_ref()) {
            return self.on_error.recover(&context, error);
        }
        for outcome in self.pipeline.process(context) {
            let element = match outcome {
                PipelineOutcome::Handled(element) => {
                    if let Err(error) = self.visit_children(&element) {
                        self.on_error.recover(&element.context, error)?;
                    }
                    element
                }
                PipelineOutcome::Failed(element, error) => {
                    self.on_error.recover(&element.context, error)?;
                    element
                }
            };
            purge_reserved_attributes(element.node().as_ref());
            if element.omit_tag {
                element.node().omit()?;
            }
        }
        Ok(())
    }

    fn visit_children(&self, element: &LiveElement) -> Result<(), RenderError> {
        let children = match &element.children {
            ChildVisit::Children => element.node().child_elements(),
            ChildVisit::Skip => return Ok(()),
        };
        for child in children {
            self.visit_element(element.context.create_child(child))?;
        }
        Ok(())
    }
}

impl Default for TalVisitor {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl DocumentPass for TalVisitor {
    fn name(&self) -> &'static str {
        "tal"
    }

    fn process(&self, context: &ExpressionContext) -> Result<(), RenderError> {
        match context.node().kind() {
            NodeKind::Document => self.visit_children(&LiveElement::new(context.clone())),
            _ => self.visit_element(context.clone()),
        }
    }
}
