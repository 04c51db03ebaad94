//! `roxmltree`-backed implementation of [`Node`](crate::Node).

mod node;
mod parser;
mod writer;

pub use node::XmlNode;

use crate::error::DomError;
use crate::node::{Node, NodeRef};
use std::fmt;

/// Serialization flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentMode {
    /// Empty elements are self-closed (`<br/>`).
    #[default]
    Xml,
    /// Void elements have no end tag and other elements are never self-closed.
    Html,
}

/// A parsed template document.
///
/// Anything in front of the first element that parsers would reject inside
/// content (the XML declaration and a doctype) is kept verbatim and written
/// back unchanged.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    root: XmlNode,
    preamble: String,
    mode: DocumentMode,
}

impl XmlDocument {
    pub fn parse(text: &str, mode: DocumentMode) -> Result<Self, DomError> {
        let (preamble, body) = parser::split_preamble(text);
        let root = XmlNode::document();
        for node in parser::parse_fragment(body, &[])? {
            root.append_child(node.into_ref())?;
        }
        Ok(Self {
            root,
            preamble: preamble.to_string(),
            mode,
        })
    }

    /// The document node. Its children are the top-level nodes.
    pub fn root(&self) -> NodeRef {
        self.root.clone().into_ref()
    }

    pub fn root_element(&self) -> Option<NodeRef> {
        self.root.child_elements().into_iter().next()
    }

    pub fn mode(&self) -> DocumentMode {
        self.mode
    }

    pub fn to_markup(&self) -> String {
        let mut out = self.preamble.clone();
        out.push_str(&self.root.to_markup(self.mode));
        out
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}
