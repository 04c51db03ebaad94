//! TALES, the expression language of Zope page templates.
//!
//! An [`ExpressionContext`] ties a document node to a scope tree of variable
//! definitions. Expressions are dispatched by prefix through an
//! [`EvaluatorRegistry`]: `path:` (the default) walks the model with an
//! [`ObjectTraverser`], `string:` interpolates paths into text, `not:` negates
//! and `structure:` marks a value as markup.
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use zpt_dom::{DocumentMode, XmlDocument};
//! use zpt_tales::{EvaluatorRegistry, ExpressionContext, ObjectTraverser, RenderState, Value};
//!
//! let doc = XmlDocument::parse("<p/>", DocumentMode::Xml).unwrap();
//! let state = RenderState::new(Arc::new(EvaluatorRegistry::default()), Arc::new(ObjectTraverser::new()));
//! let context = ExpressionContext::new_root(doc.root(), Rc::new(state));
//! context.add_local("name", Value::from("world"));
//! let value = context.evaluate("string:Hello ${name}").unwrap();
//! assert_eq!(value, Value::from("Hello world"));
//! ```

pub mod context;
pub mod error;
pub mod evaluators;
pub mod expression;
pub mod path;
pub mod registry;
pub mod repetition;
pub mod traverser;
pub mod value;

pub use context::{BUILTIN_NAMES, ErrorInfo, ExpressionContext, RenderState};
pub use error::TalesError;
pub use evaluators::{NotEvaluator, PathEvaluator, StringEvaluator, StructureEvaluator};
pub use expression::Expression;
pub use path::{Path, PathComponent, PathPart, PathWalker};
pub use registry::{EvaluatorRegistry, ExpressionEvaluator};
pub use repetition::RepetitionInfo;
pub use traverser::{MemberAccessor, ObjectTraverser, TypeDescriptor};
pub use value::{HostObject, PathHandler, Value};
