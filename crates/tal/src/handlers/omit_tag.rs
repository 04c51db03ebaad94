use crate::pipeline::{AttributeHandler, HandlingResult, LiveElement, attribute_value, evaluate};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::OMIT_TAG;

/// `tal:omit-tag`: drops the start and end tags but keeps the content.
///
/// The tag is only marked here. The visitor omits it after the content is
/// rendered, so `tal:on-error` still has an element to put its output in.
pub struct OmitTagHandler;

impl AttributeHandler for OmitTagHandler {
    fn attribute(&self) -> &'static str {
        OMIT_TAG
    }

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError> {
        let Some(expression) = attribute_value(&element, OMIT_TAG) else {
            return Ok(HandlingResult::Continue(element));
        };
        let omit = expression.trim().is_empty() || {
            let value = evaluate(&element.context, OMIT_TAG, &expression)?;
            !value.is_cancel() && value.is_truthy()
        };
        if !omit {
            return Ok(HandlingResult::Continue(element));
        }
        Ok(HandlingResult::Continue(LiveElement {
            omit_tag: true,
            ..element
        }))
    }
}
