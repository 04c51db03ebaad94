use indexmap::IndexMap;
use zpt_dom::{Node, NodeRef};
use zpt_template_core::RenderError;
use zpt_template_core::vocabulary::{DEFINE_SLOT, FILL_SLOT, METAL, USE_MACRO, metal};

/// A `define-slot` or `fill-slot` element and the slot name it carries.
#[derive(Debug, Clone)]
pub struct Slot {
    pub name: String,
    pub element: NodeRef,
}

/// Slot fillers by name; the first filler of a name wins.
pub type SlotFillers = IndexMap<String, NodeRef>;

#[derive(Debug, Default)]
pub struct SlotFinder;

impl SlotFinder {
    /// `fill-slot` elements below `element`. Fillers inside a nested
    /// `use-macro` belong to that usage and are skipped.
    pub fn slot_fillers(&self, element: &NodeRef) -> Vec<Slot> {
        let mut found = Vec::new();
        collect_fillers(element, &mut found);
        found
    }

    pub fn slot_filler_map(&self, element: &NodeRef) -> SlotFillers {
        let mut fillers = SlotFillers::new();
        for slot in self.slot_fillers(element) {
            fillers.entry(slot.name).or_insert(slot.element);
        }
        fillers
    }

    /// `define-slot` elements below `element`, in document order.
    pub fn defined_slots(&self, element: &NodeRef) -> Vec<Slot> {
        element
            .descendant_elements()
            .into_iter()
            .filter_map(|node| {
                let attr = node.get_attribute(&metal(DEFINE_SLOT))?;
                Some(Slot {
                    name: attr.value,
                    element: node,
                })
            })
            .collect()
    }
}

fn collect_fillers(element: &NodeRef, found: &mut Vec<Slot>) {
    for child in element.child_elements() {
        if let Some(attr) = child.get_attribute(&metal(FILL_SLOT)) {
            found.push(Slot {
                name: attr.value,
                element: child.clone(),
            });
        }
        if child.get_attribute(&metal(USE_MACRO)).is_none() {
            collect_fillers(&child, found);
        }
    }
}

/// Is `node` still inside `root`? A slot nested in an already filled slot is not.
fn is_within(node: &NodeRef, root: &NodeRef) -> bool {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.same_node(root.as_ref()) {
            return true;
        }
        current = ancestor.parent();
    }
    false
}

#[derive(Debug, Default)]
pub struct SlotFiller;

impl SlotFiller {
    /// Replaces each slot defined under `definer` with a copy of its filler,
    /// consuming the filler. The copy drops its own `fill-slot` and takes the
    /// defining slot's, so an extending macro can pass it further down.
    pub fn fill_slots(
        &self,
        fillers: &mut SlotFillers,
        definer: &NodeRef,
        defined: Vec<Slot>,
    ) -> Result<(), RenderError> {
        for slot in defined {
            if !is_within(&slot.element, definer) {
                continue;
            }
            let Some(filler) = fillers.shift_remove(&slot.name) else {
                log::trace!("Slot '{}' keeps its default content", slot.name);
                continue;
            };
            log::trace!("Filling slot '{}'", slot.name);
            let copy = filler.deep_clone();
            copy.remove_attribute(&metal(FILL_SLOT));
            if let Some(attr) = slot.element.get_attribute(&metal(FILL_SLOT)) {
                copy.set_attribute(&METAL, FILL_SLOT, &attr.value);
            }
            slot.element.replace_with(vec![copy])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpt_dom::{DocumentMode, XmlDocument};

    fn element(markup: &str) -> (XmlDocument, NodeRef) {
        let doc = XmlDocument::parse(markup, DocumentMode::Xml).unwrap();
        let root = doc.root_element().unwrap();
        (doc, root)
    }

    #[test]
    fn fillers_skip_nested_usages() {
        let (_doc, usage) = element(
            r#"<div metal:use-macro="a"><p metal:fill-slot="x"/><section metal:use-macro="b"><p metal:fill-slot="y"/></section><i metal:fill-slot="z"/></div>"#,
        );
        let names: Vec<String> = SlotFinder
            .slot_fillers(&usage)
            .into_iter()
            .map(|slot| slot.name)
            .collect();
        assert_eq!(names, vec!["x", "z"]);
    }

    #[test]
    fn fills_and_consumes() {
        let (_filler_doc, usage) = element(r#"<u><b metal:fill-slot="s">new</b></u>"#);
        let (doc, definer) = element(
            r#"<m><i metal:define-slot="s" metal:fill-slot="outer">old</i><i metal:define-slot="s">second</i></m>"#,
        );
        let mut fillers = SlotFinder.slot_filler_map(&usage);
        let defined = SlotFinder.defined_slots(&definer);
        SlotFiller.fill_slots(&mut fillers, &definer, defined).unwrap();
        assert!(fillers.is_empty());
        assert_eq!(
            doc.to_markup(),
            r#"<m><b metal:fill-slot="outer">new</b><i metal:define-slot="s">second</i></m>"#
        );
    }

    #[test]
    fn slots_inside_filled_slots_are_left_alone() {
        let (_filler_doc, usage) =
            element(r#"<u><b metal:fill-slot="outer">o</b><b metal:fill-slot="inner">i</b></u>"#);
        let (doc, definer) =
            element(r#"<m><div metal:define-slot="outer"><p metal:define-slot="inner"/></div></m>"#);
        let mut fillers = SlotFinder.slot_filler_map(&usage);
        let defined = SlotFinder.defined_slots(&definer);
        SlotFiller.fill_slots(&mut fillers, &definer, defined).unwrap();
        assert_eq!(doc.to_markup(), "<m><b>o</b></m>");
        assert!(fillers.contains_key("inner"));
    }
}
