//! Macros as values: the `template` builtin and documents loaded for their macros.

use std::any::Any;
use zpt_dom::{Node, NodeRef};
use zpt_tales::{HostObject, PathHandler, Value};
use zpt_template_core::vocabulary::{DEFINE_MACRO, metal};

/// An element carrying `metal:define-macro`.
#[derive(Debug, Clone)]
pub struct MetalMacro {
    name: Option<String>,
    element: NodeRef,
}

impl MetalMacro {
    pub fn new(element: NodeRef) -> Self {
        let name = element.get_attribute(&metal(DEFINE_MACRO)).map(|attr| attr.value);
        Self { name, element }
    }

    /// A macro reference is any element value; documents, text and scalars are not.
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .as_node()
            .filter(|node| node.is_element())
            .map(|node| Self::new(node.clone()))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn element(&self) -> &NodeRef {
        &self.element
    }

    /// A detached deep copy, safe to fill and insert.
    pub fn copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            element: self.element.deep_clone(),
        }
    }
}

/// The macros defined anywhere in one document, looked up by name.
#[derive(Debug, Clone)]
pub struct MacroCollection {
    root: NodeRef,
}

impl MacroCollection {
    pub fn new(root: NodeRef) -> Self {
        Self { root }
    }

    /// Reads macros from a copy of `root` taken now, so expanding the live
    /// tree in place does not change what a name resolves to.
    pub fn snapshot(root: &NodeRef) -> Self {
        Self::new(root.deep_clone())
    }

    fn definitions(&self) -> impl Iterator<Item = MetalMacro> {
        let own = self.root.is_element().then(|| self.root.clone());
        own.into_iter()
            .chain(self.root.descendant_elements())
            .map(MetalMacro::new)
            .filter(|candidate| candidate.name.is_some())
    }

    /// First macro of that name in document order.
    pub fn get(&self, name: &str) -> Option<MetalMacro> {
        self.definitions()
            .find(|candidate| candidate.name.as_deref() == Some(name))
    }

    pub fn names(&self) -> Vec<String> {
        self.definitions().filter_map(|m| m.name).collect()
    }
}

impl PathHandler for MacroCollection {
    fn try_get(&self, name: &str) -> Option<Value> {
        self.get(name).map(|found| Value::Node(found.element))
    }
}

impl HostObject for MacroCollection {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn path_handler(&self) -> Option<&dyn PathHandler> {
        Some(self)
    }

    fn as_sequence(&self) -> Option<Vec<Value>> {
        Some(self.names().into_iter().map(Value::from).collect())
    }
}

/// A document exposed to expressions, such as `template` or a layout passed
/// in as an option. `<doc>/macros/<name>` is the macro element.
#[derive(Debug, Clone)]
pub struct MetalDocument {
    root: NodeRef,
}

impl MetalDocument {
    pub fn new(root: NodeRef) -> Self {
        Self { root }
    }

    /// Reads macros from a copy of `root` taken now, so expanding the live
    /// tree in place does not change what a name resolves to.
    pub fn snapshot(root: &NodeRef) -> Self {
        Self::new(root.deep_clone())
    }

    pub fn macros(&self) -> MacroCollection {
        MacroCollection::new(self.root.clone())
    }
}

impl PathHandler for MetalDocument {
    fn try_get(&self, name: &str) -> Option<Value> {
        match name {
            "macros" => Some(Value::object(self.macros())),
            _ => None,
        }
    }
}

impl HostObject for MetalDocument {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn path_handler(&self) -> Option<&dyn PathHandler> {
        Some(self)
    }
}
