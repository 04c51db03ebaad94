//! The fixed sequence of TAL attribute handlers.
//!
//! Every element goes through the handlers in the order Zope defines:
//! define, condition, repeat, content/replace, attributes, omit-tag. A
//! handler may drop the element or multiply it, so the pipeline works on a
//! set of live elements rather than a single one.

use crate::handlers::{
    AttributesHandler, ConditionHandler, ContentOrReplaceHandler, DefineHandler, OmitTagHandler,
    RepeatHandler,
};
use zpt_dom::NodeRef;
use zpt_tales::{ExpressionContext, Value};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{describe, tal};

/// Which children the visitor descends into once an element is handled.
#[derive(Debug, Clone)]
pub enum ChildVisit {
    /// The element's own children, read after handling.
    Children,
    /// Nothing: the content was generated and is not processed again.
    Skip,
}

/// An element still being handled, with the scope it is handled in.
#[derive(Clone)]
pub struct LiveElement {
    pub context: ExpressionContext,
    pub children: ChildVisit,
    /// Replace the element with its children once they are rendered.
    pub omit_tag: bool,
}

impl LiveElement {
    pub fn new(context: ExpressionContext) -> Self {
        Self {
            context,
            children: ChildVisit::Children,
            omit_tag: false,
        }
    }

    pub fn node(&self) -> &NodeRef {
        self.context.node()
    }
}

pub enum HandlingResult {
    /// Keep handling the element.
    Continue(LiveElement),
    /// The element is gone or finished; later handlers skip it.
    Abort,
    /// The element was replaced by these, each handled by the remaining handlers.
    Replace(Vec<LiveElement>),
}

/// What became of one live element.
pub enum PipelineOutcome {
    Handled(LiveElement),
    /// The element as it was when a handler failed on it; still in the document.
    Failed(LiveElement, RenderError),
}

pub trait AttributeHandler {
    /// Local name of the TAL attribute this handler reacts to.
    fn attribute(&self) -> &'static str;

    fn handle(&self, element: LiveElement) -> Result<HandlingResult, RenderError>;
}

pub struct AttributePipeline {
    handlers: Vec<Box<dyn AttributeHandler>>,
}

impl Default for AttributePipeline {
    fn default() -> Self {
        Self {
            handlers: vec![
                Box::new(DefineHandler),
                Box::new(ConditionHandler),
                Box::new(RepeatHandler),
                Box::new(ContentOrReplaceHandler),
                Box::new(AttributesHandler),
                Box::new(OmitTagHandler),
            ],
        }
    }
}

impl AttributePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every handler over the element of `context`. Each outcome is
    /// an element left in the document, or one that failed partway along
    /// with the error it failed with. Copies made by `tal:repeat` succeed or
    /// fail independently.
    pub fn process(&self, context: ExpressionContext) -> Vec<PipelineOutcome> {
        let mut outcomes = Vec::new();
        self.run(LiveElement::new(context), 0, &mut outcomes);
        outcomes
    }

    fn run(&self, mut element: LiveElement, start: usize, outcomes: &mut Vec<PipelineOutcome>) {
        for (index, handler) in self.handlers.iter().enumerate().skip(start) {
            match handler.handle(element.clone()) {
                Ok(HandlingResult::Continue(next)) => element = next,
                Ok(HandlingResult::Abort) => {
                    log::trace!("Element left the pipeline at tal:{}", handler.attribute());
                    return;
                }
                Ok(HandlingResult::Replace(elements)) => {
                    for replacement in elements {
                        self.run(replacement, index + 1, outcomes);
                    }
                    return;
                }
                Err(error) => {
                    outcomes.push(PipelineOutcome::Failed(element, error));
                    return;
                }
            }
        }
        outcomes.push(PipelineOutcome::Handled(element));
    }
}

/// Value of `tal:<name>` on the element, if present.
pub(crate) fn attribute_value(element: &LiveElement, name: &str) -> Option<String> {
    element.node().get_attribute(&tal(name)).map(|attr| attr.value)
}

/// Evaluates an attribute's expression, naming the attribute and element on failure.
pub(crate) fn evaluate(
    context: &ExpressionContext,
    attribute: &str,
    expression: &str,
) -> Result<Value, RenderError> {
    context
        .evaluate(expression)
        .map_err(|source| RenderError::Expression {
            attribute: format!("tal:{}", attribute),
            expression: expression.to_string(),
            element: describe(context.node().as_ref()),
            source,
        })
}
