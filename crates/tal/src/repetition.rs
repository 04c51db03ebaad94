use zpt_tales::{ExpressionContext, RepetitionInfo, Value};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{REPEAT, tal};

/// Expands a repeated element into one sibling copy per item.
pub struct RepetitionContextProvider;

impl RepetitionContextProvider {
    /// Inserts a copy of the element before it for every item, then removes
    /// the original. Each copy gets a sibling scope with the item bound to
    /// `name` and its repetition info registered.
    pub fn create(
        context: &ExpressionContext,
        name: &str,
        items: Vec<Value>,
    ) -> Result<Vec<ExpressionContext>, RenderError> {
        let original = context.node();
        let count = items.len();
        log::debug!("Repeating {} {} time(s)", name, count);
        let mut contexts = Vec::with_capacity(count);
        for (index, item) in items.into_iter().enumerate() {
            let copy = original.deep_clone();
            copy.remove_attribute(&tal(REPEAT));
            original.insert_before(copy.clone())?;
            let sibling = context.create_sibling(copy.clone());
            sibling.add_local(name, item.clone());
            sibling.add_repetition(RepetitionInfo::new(name, index, count, item, copy));
            contexts.push(sibling);
        }
        original.remove();
        Ok(contexts)
    }
}
