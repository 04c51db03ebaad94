use crate::expander::MacroExpander;
use zpt_dom::NodeRef;
use zpt_tales::ExpressionContext;
use zpt_template_core::vocabulary::{EXTEND_MACRO, USE_MACRO, metal};
use zpt_template_core::{DocumentPass, RenderConfig, RenderError};

/// Expands every `use-macro` and `extend-macro` in a document, including
/// those brought in by an expansion, before TAL runs.
#[derive(Debug)]
pub struct MetalVisitor {
    expander: MacroExpander,
}

impl MetalVisitor {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            expander: MacroExpander::new(config.max_macro_depth),
        }
    }

    fn visit(&self, context: &ExpressionContext, node: NodeRef, depth: usize) -> Result<(), RenderError> {
        let expands = [USE_MACRO, EXTEND_MACRO]
            .iter()
            .any(|name| node.get_attribute(&metal(name)).is_some());
        if expands {
            let expanded = self
                .expander
                .expand(&context.create_child(node.clone()), &node, depth)?;
            return self.visit(context, expanded, depth + 1);
        }
        for child in node.child_elements() {
            self.visit(context, child, depth)?;
        }
        Ok(())
    }
}

impl Default for MetalVisitor {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl DocumentPass for MetalVisitor {
    fn name(&self) -> &'static str {
        "metal"
    }

    fn process(&self, context: &ExpressionContext) -> Result<(), RenderError> {
        self.visit(context, context.node().clone(), 0)
    }
}
