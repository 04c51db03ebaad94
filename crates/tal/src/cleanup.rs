//! Removal of the template vocabulary from rendered output.

use zpt_dom::Node;
use zpt_tales::ExpressionContext;
use zpt_template_core::vocabulary::{is_reserved, is_reserved_declaration, is_reserved_element};
use zpt_template_core::{DocumentPass, RenderError};

/// Drops every TAL and METAL attribute from `node`.
pub fn purge_reserved_attributes(node: &dyn Node) -> usize {
    node.remove_attributes_where(&is_reserved)
}

/// Final pass: strips reserved attributes and namespace declarations, and
/// unwraps elements in the reserved namespaces such as `<tal:block>`.
#[derive(Debug, Default)]
pub struct CleanupPass;

impl DocumentPass for CleanupPass {
    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn process(&self, context: &ExpressionContext) -> Result<(), RenderError> {
        let root = context.node();
        let mut elements = Vec::new();
        if root.is_element() {
            elements.push(root.clone());
        }
        elements.extend(root.descendant_elements());

        let mut removed = 0;
        for element in &elements {
            removed += element
                .remove_attributes_where(&|attr| is_reserved(attr) || is_reserved_declaration(attr));
        }
        let mut unwrapped = 0;
        for element in elements
            .iter()
            .filter(|element| is_reserved_element(element.as_ref()))
        {
            if element.parent().is_some() {
                element.omit()?;
                unwrapped += 1;
            }
        }
        log::debug!(
            "Cleanup removed {} attribute(s) and unwrapped {} element(s)",
            removed,
            unwrapped
        );
        Ok(())
    }
}
