use crate::macros::MetalMacro;
use zpt_dom::NodeRef;
use zpt_tales::ExpressionContext;
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{describe, metal};

/// Resolves the macro an element references through `use-macro` or `extend-macro`.
#[derive(Debug, Default)]
pub struct MacroProvider;

impl MacroProvider {
    /// `Ok(None)` when the element has no such attribute. The macro returned
    /// is a fresh copy.
    pub fn get_macro(
        &self,
        context: &ExpressionContext,
        element: &NodeRef,
        attribute: &str,
    ) -> Result<Option<MetalMacro>, RenderError> {
        let Some(attr) = element.get_attribute(&metal(attribute)) else {
            return Ok(None);
        };
        let unresolved = || RenderError::MacroResolution {
            expression: attr.value.clone(),
        };
        let value = context.evaluate(&attr.value).map_err(|err| {
            log::debug!("metal:{} on {} failed: {}", attribute, describe(element.as_ref()), err);
            unresolved()
        })?;
        let found = MetalMacro::from_value(&value).ok_or_else(unresolved)?;
        log::trace!(
            "{} references macro {}",
            describe(element.as_ref()),
            found.name().unwrap_or("(unnamed)")
        );
        Ok(Some(found.copy()))
    }
}
