//! The reserved attribute vocabulary.

use std::sync::LazyLock;
use zpt_dom::{Attribute, AttributeSpec, Namespace, Node};

pub const TAL_NAMESPACE_URI: &str = "http://xml.zope.org/namespaces/tal";
pub const METAL_NAMESPACE_URI: &str = "http://xml.zope.org/namespaces/metal";

pub static TAL: LazyLock<Namespace> = LazyLock::new(|| Namespace::new("tal", TAL_NAMESPACE_URI));
pub static METAL: LazyLock<Namespace> =
    LazyLock::new(|| Namespace::new("metal", METAL_NAMESPACE_URI));

pub const DEFINE: &str = "define";
pub const CONDITION: &str = "condition";
pub const REPEAT: &str = "repeat";
pub const CONTENT: &str = "content";
pub const REPLACE: &str = "replace";
pub const ATTRIBUTES: &str = "attributes";
pub const OMIT_TAG: &str = "omit-tag";
pub const ON_ERROR: &str = "on-error";

pub const DEFINE_MACRO: &str = "define-macro";
pub const EXTEND_MACRO: &str = "extend-macro";
pub const USE_MACRO: &str = "use-macro";
pub const DEFINE_SLOT: &str = "define-slot";
pub const FILL_SLOT: &str = "fill-slot";

pub const TAL_ATTRIBUTES: [&str; 8] = [
    DEFINE, CONDITION, REPEAT, CONTENT, REPLACE, ATTRIBUTES, OMIT_TAG, ON_ERROR,
];
pub const METAL_ATTRIBUTES: [&str; 5] = [DEFINE_MACRO, EXTEND_MACRO, USE_MACRO, DEFINE_SLOT, FILL_SLOT];

pub fn tal(name: &str) -> AttributeSpec {
    AttributeSpec::new(TAL.clone(), name)
}

pub fn metal(name: &str) -> AttributeSpec {
    AttributeSpec::new(METAL.clone(), name)
}

pub fn is_reserved(attr: &Attribute) -> bool {
    attr.is_in_namespace(&TAL) || attr.is_in_namespace(&METAL)
}

/// A reserved-namespace attribute that is not part of the vocabulary.
pub fn is_unknown_reserved(attr: &Attribute) -> bool {
    (attr.is_in_namespace(&TAL) && !TAL_ATTRIBUTES.contains(&attr.local_name.as_str()))
        || (attr.is_in_namespace(&METAL) && !METAL_ATTRIBUTES.contains(&attr.local_name.as_str()))
}

/// An `xmlns` declaration binding the TAL or METAL namespace.
pub fn is_reserved_declaration(attr: &Attribute) -> bool {
    attr.declares(&TAL) || attr.declares(&METAL)
}

/// Elements such as `<tal:block>` exist only to carry attributes.
pub fn is_reserved_element(node: &dyn Node) -> bool {
    node.is_element() && (node.is_in_namespace(&TAL) || node.is_in_namespace(&METAL))
}

/// Element name for error messages.
pub fn describe(node: &dyn Node) -> String {
    match node.name() {
        Some(name) => format!("<{}>", name),
        None => "#document".to_string(),
    }
}
