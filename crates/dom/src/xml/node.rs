use super::{DocumentMode, parser, writer};
use crate::error::DomError;
use crate::namespace::{Attribute, Namespace};
use crate::node::{CommentPosition, Node, NodeKind, NodeRef};
use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

pub(crate) type Link = Arc<RwLock<NodeData>>;

#[derive(Debug, Clone)]
pub(crate) enum Content {
    Document,
    Element {
        prefix: Option<String>,
        local_name: String,
        namespace_uri: Option<String>,
        attributes: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
    Instruction {
        target: String,
        value: Option<String>,
    },
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) content: Content,
    parent: Weak<RwLock<NodeData>>,
    pub(crate) children: Vec<Link>,
}

pub(crate) fn read(link: &Link) -> RwLockReadGuard<'_, NodeData> {
    link.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(link: &Link) -> RwLockWriteGuard<'_, NodeData> {
    link.write().unwrap_or_else(PoisonError::into_inner)
}

fn detach(link: &Link) {
    let parent = read(link).parent.upgrade();
    if let Some(parent) = parent {
        write(&parent).children.retain(|child| !Arc::ptr_eq(child, link));
    }
    write(link).parent = Weak::new();
}

fn insert_at(parent: &Link, index: usize, links: Vec<Link>) {
    for link in &links {
        detach(link);
        write(link).parent = Arc::downgrade(parent);
    }
    let mut guard = write(parent);
    let index = index.min(guard.children.len());
    guard.children.splice(index..index, links);
}

fn copy_tree(link: &Link) -> Link {
    let (content, children) = {
        let data = read(link);
        (data.content.clone(), data.children.clone())
    };
    let copy = Arc::new(RwLock::new(NodeData {
        content,
        parent: Weak::new(),
        children: Vec::new(),
    }));
    let copied: Vec<Link> = children.iter().map(copy_tree).collect();
    for child in &copied {
        write(child).parent = Arc::downgrade(&copy);
    }
    write(&copy).children = copied;
    copy
}

/// Handle to a node of an [`XmlDocument`](super::XmlDocument) tree.
#[derive(Clone)]
pub struct XmlNode {
    link: Link,
}

impl XmlNode {
    pub(crate) fn from_content(content: Content) -> Self {
        Self {
            link: Arc::new(RwLock::new(NodeData {
                content,
                parent: Weak::new(),
                children: Vec::new(),
            })),
        }
    }

    pub(crate) fn document() -> Self {
        Self::from_content(Content::Document)
    }

    pub(crate) fn push_child(&self, child: XmlNode) {
        insert_at(&self.link, usize::MAX, vec![child.link]);
    }

    fn wrap(link: Link) -> NodeRef {
        Arc::new(XmlNode { link })
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    /// Serializes this node and its subtree.
    pub fn to_markup(&self, mode: DocumentMode) -> String {
        let mut out = String::new();
        writer::write_node(&mut out, &self.link, mode);
        out
    }

    fn link_of(node: &NodeRef) -> Result<Link, DomError> {
        node.as_any()
            .downcast_ref::<XmlNode>()
            .map(|xml| xml.link.clone())
            .ok_or(DomError::ForeignNode)
    }

    fn position(&self) -> Result<(Link, usize), DomError> {
        let parent = read(&self.link).parent.upgrade();
        let parent = parent.ok_or_else(|| DomError::Detached(self.describe()))?;
        let index = read(&parent)
            .children
            .iter()
            .position(|child| Arc::ptr_eq(child, &self.link));
        let index = index.ok_or_else(|| DomError::Detached(self.describe()))?;
        Ok((parent, index))
    }

    fn insert_sibling(&self, node: &NodeRef, offset: usize) -> Result<(), DomError> {
        let link = Self::link_of(node)?;
        if Arc::ptr_eq(&link, &self.link) {
            return Err(DomError::SelfInsertion);
        }
        detach(&link);
        let (parent, index) = self.position()?;
        insert_at(&parent, index + offset, vec![link]);
        Ok(())
    }

    fn describe(&self) -> String {
        match &read(&self.link).content {
            Content::Element { prefix, local_name, .. } => match prefix {
                Some(prefix) => format!("<{}:{}>", prefix, local_name),
                None => format!("<{}>", local_name),
            },
            Content::Document => "#document".to_string(),
            Content::Text(_) => "#text".to_string(),
            Content::Comment(_) => "#comment".to_string(),
            Content::Instruction { target, .. } => format!("<?{}?>", target),
        }
    }

    /// Namespace declarations in scope here, nearest first.
    fn declarations_in_scope(&self) -> Vec<Attribute> {
        let mut declarations: Vec<Attribute> = Vec::new();
        let mut current = Some(self.link.clone());
        while let Some(link) = current {
            let data = read(&link);
            if let Content::Element { attributes, .. } = &data.content {
                for attr in attributes.iter().filter(|a| a.is_namespace_declaration()) {
                    let shadowed = declarations
                        .iter()
                        .any(|known| known.qualified_name() == attr.qualified_name());
                    if !shadowed {
                        declarations.push(attr.clone());
                    }
                }
            }
            current = data.parent.upgrade();
        }
        declarations
    }
}

impl fmt::Debug for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XmlNode({})", self.describe())
    }
}

impl Node for XmlNode {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> NodeKind {
        match read(&self.link).content {
            Content::Document => NodeKind::Document,
            Content::Element { .. } => NodeKind::Element,
            Content::Text(_) => NodeKind::Text,
            Content::Comment(_) => NodeKind::Comment,
            Content::Instruction { .. } => NodeKind::ProcessingInstruction,
        }
    }

    fn name(&self) -> Option<String> {
        match &read(&self.link).content {
            Content::Element { prefix: Some(prefix), local_name, .. } => {
                Some(format!("{}:{}", prefix, local_name))
            }
            Content::Element { local_name, .. } => Some(local_name.clone()),
            _ => None,
        }
    }

    fn text(&self) -> Option<String> {
        match &read(&self.link).content {
            Content::Text(text) | Content::Comment(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn is_in_namespace(&self, namespace: &Namespace) -> bool {
        match &read(&self.link).content {
            Content::Element { prefix, namespace_uri, .. } => {
                namespace.contains(prefix.as_deref(), namespace_uri.as_deref())
            }
            _ => false,
        }
    }

    fn attributes(&self) -> Vec<Attribute> {
        match &read(&self.link).content {
            Content::Element { attributes, .. } => attributes.clone(),
            _ => Vec::new(),
        }
    }

    fn set_attribute(&self, namespace: &Namespace, name: &str, value: &str) {
        let mut data = write(&self.link);
        if let Content::Element { attributes, .. } = &mut data.content {
            let existing = attributes
                .iter_mut()
                .find(|attr| attr.local_name == name && attr.is_in_namespace(namespace));
            match existing {
                Some(attr) => attr.value = value.to_string(),
                None => attributes.push(Attribute {
                    prefix: namespace.prefix.clone(),
                    local_name: name.to_string(),
                    namespace_uri: namespace.uri.clone(),
                    value: value.to_string(),
                }),
            }
        }
    }

    fn remove_attributes_where(&self, predicate: &dyn Fn(&Attribute) -> bool) -> usize {
        let mut data = write(&self.link);
        match &mut data.content {
            Content::Element { attributes, .. } => {
                let before = attributes.len();
                attributes.retain(|attr| !predicate(attr));
                before - attributes.len()
            }
            _ => 0,
        }
    }

    fn children(&self) -> Vec<NodeRef> {
        read(&self.link)
            .children
            .iter()
            .cloned()
            .map(Self::wrap)
            .collect()
    }

    fn parent(&self) -> Option<NodeRef> {
        read(&self.link).parent.upgrade().map(Self::wrap)
    }

    fn insert_before(&self, node: NodeRef) -> Result<(), DomError> {
        self.insert_sibling(&node, 0)
    }

    fn insert_after(&self, node: NodeRef) -> Result<(), DomError> {
        self.insert_sibling(&node, 1)
    }

    fn append_child(&self, node: NodeRef) -> Result<(), DomError> {
        let link = Self::link_of(&node)?;
        if Arc::ptr_eq(&link, &self.link) {
            return Err(DomError::SelfInsertion);
        }
        insert_at(&self.link, usize::MAX, vec![link]);
        Ok(())
    }

    fn clear_children(&self) {
        let children = std::mem::take(&mut write(&self.link).children);
        for child in children {
            write(&child).parent = Weak::new();
        }
    }

    fn replace_with(&self, nodes: Vec<NodeRef>) -> Result<(), DomError> {
        let links = nodes
            .iter()
            .map(Self::link_of)
            .collect::<Result<Vec<_>, _>>()?;
        if links.iter().any(|link| Arc::ptr_eq(link, &self.link)) {
            return Err(DomError::SelfInsertion);
        }
        for link in &links {
            detach(link);
        }
        let (parent, index) = self.position()?;
        detach(&self.link);
        insert_at(&parent, index, links);
        Ok(())
    }

    fn remove(&self) {
        detach(&self.link);
    }

    fn omit(&self) -> Result<Vec<NodeRef>, DomError> {
        let (parent, index) = self.position()?;
        let children = std::mem::take(&mut write(&self.link).children);
        detach(&self.link);
        insert_at(&parent, index, children.clone());
        Ok(children.into_iter().map(Self::wrap).collect())
    }

    fn deep_clone(&self) -> NodeRef {
        Self::wrap(copy_tree(&self.link))
    }

    fn create_text_node(&self, text: &str) -> NodeRef {
        XmlNode::from_content(Content::Text(text.to_string())).into_ref()
    }

    fn parse_fragment(&self, markup: &str) -> Result<Vec<NodeRef>, DomError> {
        let declarations = self.declarations_in_scope();
        Ok(parser::parse_fragment(markup, &declarations)?
            .into_iter()
            .map(XmlNode::into_ref)
            .collect())
    }

    fn add_comment(&self, position: CommentPosition, text: &str) -> Result<(), DomError> {
        let comment = XmlNode::from_content(Content::Comment(text.to_string())).into_ref();
        match position {
            CommentPosition::Before => self.insert_before(comment),
            CommentPosition::After => self.insert_after(comment),
            CommentPosition::Inside => self.append_child(comment),
        }
    }

    fn same_node(&self, other: &dyn Node) -> bool {
        other
            .as_any()
            .downcast_ref::<XmlNode>()
            .is_some_and(|other| Arc::ptr_eq(&other.link, &self.link))
    }
}
