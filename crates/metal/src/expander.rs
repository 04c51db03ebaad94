use crate::macros::MetalMacro;
use crate::provider::MacroProvider;
use crate::slots::{SlotFiller, SlotFillers, SlotFinder};
use zpt_dom::NodeRef;
use zpt_tales::ExpressionContext;
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{DEFINE_MACRO, EXTEND_MACRO, USE_MACRO, describe, metal};

/// Expands one `use-macro` site: resolves the macro, walks its
/// `extend-macro` chain, fills slots and swaps the result into the tree.
#[derive(Debug)]
pub struct MacroExpander {
    provider: MacroProvider,
    finder: SlotFinder,
    filler: SlotFiller,
    max_depth: usize,
}

impl MacroExpander {
    pub fn new(max_depth: usize) -> Self {
        Self {
            provider: MacroProvider,
            finder: SlotFinder,
            filler: SlotFiller,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn check_depth(&self, depth: usize) -> Result<(), RenderError> {
        if depth >= self.max_depth {
            return Err(RenderError::MacroDepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Returns the expanded element, now in place of `use_site`. `depth`
    /// counts the expansions already enclosing this one.
    ///
    /// A site with `extend-macro` but no `use-macro` is expanded against
    /// itself: the extended macro is filled from the site's own fillers.
    pub fn expand(
        &self,
        context: &ExpressionContext,
        use_site: &NodeRef,
        depth: usize,
    ) -> Result<NodeRef, RenderError> {
        self.check_depth(depth)?;
        let used = match self.provider.get_macro(context, use_site, USE_MACRO)? {
            Some(used) => used,
            // An extending macro rendered in place uses its base with its own fillers.
            None => match self.provider.get_macro(context, use_site, EXTEND_MACRO)? {
                Some(extended) => extended,
                None => return Ok(use_site.clone()),
            },
        };
        log::debug!(
            "Expanding macro {} at {}",
            used.name().unwrap_or("(unnamed)"),
            describe(use_site.as_ref())
        );
        let mut fillers = self.finder.slot_filler_map(use_site);
        self.fill(&mut fillers, &used)?;

        let mut current = used;
        let mut hops = depth;
        loop {
            let extending = context.create_child(current.element().clone());
            let Some(extended) = self.provider.get_macro(&extending, current.element(), EXTEND_MACRO)?
            else {
                break;
            };
            hops += 1;
            self.check_depth(hops)?;
            log::debug!(
                "Macro {} extends {}",
                current.name().unwrap_or("(unnamed)"),
                extended.name().unwrap_or("(unnamed)")
            );
            // Fillers nearer the usage win over the extension's own.
            for slot in self.finder.slot_fillers(current.element()) {
                fillers.entry(slot.name).or_insert(slot.element);
            }
            self.fill(&mut fillers, &extended)?;
            current = extended;
        }

        let element = current.element().clone();
        element.remove_attribute(&metal(DEFINE_MACRO));
        element.remove_attribute(&metal(EXTEND_MACRO));
        use_site.replace_with(vec![element.clone()])?;
        Ok(element)
    }

    fn fill(&self, fillers: &mut SlotFillers, definer: &MetalMacro) -> Result<(), RenderError> {
        let defined = self.finder.defined_slots(definer.element());
        self.filler.fill_slots(fillers, definer.element(), defined)
    }
}
