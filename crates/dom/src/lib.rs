//! Node capability for attribute-driven template rendering.
//!
//! The rendering core only ever talks to documents through the [`Node`] trait
//! defined here. [`XmlDocument`] is the bundled adapter: it parses markup with
//! `roxmltree` into a mutable, shareable tree and serializes it back in either
//! XML or HTML flavour.

pub mod error;
pub mod namespace;
pub mod node;
pub mod xml;

pub use error::DomError;
pub use namespace::{Attribute, AttributeSpec, Namespace};
pub use node::{CommentPosition, Node, NodeKind, NodeRef};
pub use xml::{DocumentMode, XmlDocument, XmlNode};
