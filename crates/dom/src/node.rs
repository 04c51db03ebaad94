use crate::error::DomError;
use crate::namespace::{Attribute, AttributeSpec, Namespace};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a node in a live document tree.
pub type NodeRef = Arc<dyn Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    ProcessingInstruction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPosition {
    Before,
    Inside,
    After,
}

/// The minimal document capability the renderer needs.
///
/// Handles are cheap to clone and refer to the same underlying node, so
/// mutations through one handle are visible through all others. Sibling
/// operations (`insert_before`, `replace_with`, `omit`) require the node to be
/// attached to a parent.
pub trait Node: fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> NodeKind;

    fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    /// Qualified element name, `None` for non-element nodes.
    fn name(&self) -> Option<String>;

    /// Character content of text and comment nodes.
    fn text(&self) -> Option<String>;

    fn is_in_namespace(&self, namespace: &Namespace) -> bool;

    fn attributes(&self) -> Vec<Attribute>;

    fn get_attribute(&self, spec: &AttributeSpec) -> Option<Attribute> {
        self.attributes().into_iter().find(|attr| attr.matches(spec))
    }

    /// Sets (or adds) the attribute `name` in `namespace`.
    fn set_attribute(&self, namespace: &Namespace, name: &str, value: &str);

    fn remove_attribute(&self, spec: &AttributeSpec) -> bool {
        self.remove_attributes_where(&|attr| attr.matches(spec)) > 0
    }

    /// Removes every attribute accepted by `predicate`, returning how many went.
    fn remove_attributes_where(&self, predicate: &dyn Fn(&Attribute) -> bool) -> usize;

    fn children(&self) -> Vec<NodeRef>;

    fn child_elements(&self) -> Vec<NodeRef> {
        self.children()
            .into_iter()
            .filter(|child| child.is_element())
            .collect()
    }

    /// All elements below this node in document order, excluding the node itself.
    fn descendant_elements(&self) -> Vec<NodeRef> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeRef> = self.child_elements().into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            stack.extend(next.child_elements().into_iter().rev());
            found.push(next);
        }
        found
    }

    fn parent(&self) -> Option<NodeRef>;

    /// Inserts `node` as the immediately preceding sibling of this node.
    fn insert_before(&self, node: NodeRef) -> Result<(), DomError>;

    /// Inserts `node` as the immediately following sibling of this node.
    fn insert_after(&self, node: NodeRef) -> Result<(), DomError>;

    fn append_child(&self, node: NodeRef) -> Result<(), DomError>;

    fn clear_children(&self);

    /// Puts `nodes` where this node was and detaches this node.
    fn replace_with(&self, nodes: Vec<NodeRef>) -> Result<(), DomError>;

    /// Detaches this node from its parent. A no-op for detached nodes.
    fn remove(&self);

    /// Replaces this node with its own children, returning them.
    fn omit(&self) -> Result<Vec<NodeRef>, DomError>;

    /// Detached deep copy.
    fn deep_clone(&self) -> NodeRef;

    fn create_text_node(&self, text: &str) -> NodeRef;

    /// Parses `markup` as content valid at this node's position, returning detached nodes.
    fn parse_fragment(&self, markup: &str) -> Result<Vec<NodeRef>, DomError>;

    fn add_comment(&self, position: CommentPosition, text: &str) -> Result<(), DomError>;

    fn same_node(&self, other: &dyn Node) -> bool;
}
