//! The value model expressions evaluate to.

use crate::traverser::TypeDescriptor;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use zpt_dom::NodeRef;

/// A value produced by evaluating a TALES expression.
///
/// `Cancel` is the `default` token: it tells an attribute handler to leave the
/// element as written. `Null` is `nothing`.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Cancel,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Text to be inserted as parsed markup rather than escaped text.
    Markup(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Node(NodeRef),
    Object(Arc<dyn HostObject>),
}

/// An application object exposed to path traversal.
///
/// Implementors either describe their members once per type through
/// [`HostObject::describe`], or take full control of name lookup by returning a
/// [`PathHandler`] from [`HostObject::path_handler`].
pub trait HostObject: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Self-describing lookup. When present it is the only strategy consulted.
    fn path_handler(&self) -> Option<&dyn PathHandler> {
        None
    }

    /// The member table for this type. Called once per (type, member name) and cached.
    fn describe(&self) -> TypeDescriptor {
        TypeDescriptor::new()
    }

    fn to_text(&self) -> String {
        self.type_name().to_string()
    }

    /// Items to iterate when the object is used by `tal:repeat`.
    fn as_sequence(&self) -> Option<Vec<Value>> {
        None
    }
}

/// Lookup of named children on a value that knows its own shape.
pub trait PathHandler {
    /// `None` means "not found", which lets a path fall back to its next alternative.
    fn try_get(&self, name: &str) -> Option<Value>;
}

impl Value {
    pub fn object<T: HostObject>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, Value::Cancel)
    }

    /// TALES truth. Note that the empty string is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Cancel | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Object(object) => object.as_sequence().is_none_or(|items| !items.is_empty()),
            Value::String(_) | Value::Markup(_) | Value::Node(_) => true,
        }
    }

    /// The items of a sequence value. `None` for scalars.
    pub fn as_sequence(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items.clone()),
            Value::Object(object) => object.as_sequence(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Markup(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Cancel => "default",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Markup(_) => "markup",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Node(_) => "node",
            Value::Object(object) => object.type_name(),
        }
    }
}

/// Stringification used for content, attributes and interpolation.
/// `nothing` and `default` render as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Cancel => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) | Value::Markup(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, item)?;
                }
                f.write_str("}")
            }
            Value::Node(node) => match node.text() {
                Some(text) => f.write_str(&text),
                None => f.write_str(&node.name().unwrap_or_default()),
            },
            Value::Object(object) => f.write_str(&object.to_text()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Cancel => f.write_str("Cancel"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Markup(s) => f.debug_tuple("Markup").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Value::Object(object) => f.debug_tuple("Object").field(&object.type_name()).finish(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Cancel, Value::Cancel) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::String(a), Value::String(b)) | (Value::Markup(a), Value::Markup(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a.same_node(b.as_ref()),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<NodeRef> for Value {
    fn from(node: NodeRef) -> Self {
        Value::Node(node)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}
