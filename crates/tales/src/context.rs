//! The scope tree expressions are evaluated in.

use crate::error::TalesError;
use crate::evaluators::PathEvaluator;
use crate::expression::Expression;
use crate::path::Path;
use crate::registry::EvaluatorRegistry;
use crate::repetition::RepetitionInfo;
use crate::traverser::ObjectTraverser;
use crate::value::{HostObject, PathHandler, Value};
use indexmap::IndexMap;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use zpt_dom::NodeRef;

/// Names always resolvable as a path root, in the order `CONTEXTS` lists them.
pub const BUILTIN_NAMES: [&str; 8] = [
    "nothing", "default", "options", "repeat", "attrs", "here", "template", "error",
];

/// State shared by every context of one render.
///
/// The global definitions live here, so a `global` define is visible to
/// everything visited after it.
pub struct RenderState {
    registry: Arc<EvaluatorRegistry>,
    traverser: Arc<ObjectTraverser>,
    globals: RefCell<IndexMap<String, Value>>,
    options: Value,
    here: Value,
    template: Value,
}

impl RenderState {
    pub fn new(registry: Arc<EvaluatorRegistry>, traverser: Arc<ObjectTraverser>) -> Self {
        Self {
            registry,
            traverser,
            globals: RefCell::new(IndexMap::new()),
            options: Value::Map(IndexMap::new()),
            here: Value::Null,
            template: Value::Null,
        }
    }

    /// Keyword options, exposed as `options`.
    pub fn with_options(mut self, options: IndexMap<String, Value>) -> Self {
        self.options = Value::Map(options);
        self
    }

    /// The model subject, exposed as `here`.
    pub fn with_here(mut self, here: Value) -> Self {
        self.here = here;
        self
    }

    /// The document being rendered, exposed as `template`.
    pub fn with_template(mut self, template: Value) -> Self {
        self.template = template;
        self
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name).cloned()
    }
}

#[derive(Default)]
struct Scope {
    locals: RefCell<IndexMap<String, Value>>,
    repetitions: RefCell<IndexMap<String, Arc<RepetitionInfo>>>,
    parent: Option<Rc<Scope>>,
}

impl Scope {
    fn find_local(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.locals.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.find_local(name))
    }

    fn collect_repetitions(&self, into: &mut IndexMap<String, Value>) {
        if let Some(parent) = &self.parent {
            parent.collect_repetitions(into);
        }
        for (name, info) in self.repetitions.borrow().iter() {
            into.insert(name.clone(), Value::Object(info.clone()));
        }
    }
}

/// Captured failure exposed as `error` while an `on-error` handler runs.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    kind: String,
    message: String,
}

impl ErrorInfo {
    pub fn new(kind: &str, message: &str) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl PathHandler for ErrorInfo {
    fn try_get(&self, name: &str) -> Option<Value> {
        match name {
            "type" => Some(Value::from(self.kind.as_str())),
            "value" | "message" => Some(Value::from(self.message.as_str())),
            _ => None,
        }
    }
}

impl HostObject for ErrorInfo {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn path_handler(&self) -> Option<&dyn PathHandler> {
        Some(self)
    }

    fn to_text(&self) -> String {
        self.message.clone()
    }
}

/// One node of the scope tree, paired with the DOM node being processed.
///
/// Cloning gives another handle onto the same scope; use
/// [`create_child`](Self::create_child) or [`create_sibling`](Self::create_sibling)
/// for new scopes.
#[derive(Clone)]
pub struct ExpressionContext {
    node: NodeRef,
    scope: Rc<Scope>,
    state: Rc<RenderState>,
    error: Option<Arc<ErrorInfo>>,
}

impl ExpressionContext {
    pub fn new_root(node: NodeRef, state: Rc<RenderState>) -> Self {
        Self {
            node,
            scope: Rc::new(Scope::default()),
            state,
            error: None,
        }
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    pub fn state(&self) -> &Rc<RenderState> {
        &self.state
    }

    pub fn registry(&self) -> &EvaluatorRegistry {
        &self.state.registry
    }

    pub fn traverser(&self) -> &ObjectTraverser {
        &self.state.traverser
    }

    /// A nested scope for `node`: sees this scope's definitions, and its own
    /// definitions shadow them without leaking back.
    pub fn create_child(&self, node: NodeRef) -> Self {
        Self {
            node,
            scope: Rc::new(Scope {
                parent: Some(self.scope.clone()),
                ..Scope::default()
            }),
            state: self.state.clone(),
            error: self.error.clone(),
        }
    }

    /// A scope beside this one for `node`, starting from a copy of this
    /// scope's own definitions and repetitions.
    pub fn create_sibling(&self, node: NodeRef) -> Self {
        Self {
            node,
            scope: Rc::new(Scope {
                locals: RefCell::new(self.scope.locals.borrow().clone()),
                repetitions: RefCell::new(self.scope.repetitions.borrow().clone()),
                parent: self.scope.parent.clone(),
            }),
            state: self.state.clone(),
            error: self.error.clone(),
        }
    }

    pub fn add_local(&self, name: &str, value: Value) {
        self.scope.locals.borrow_mut().insert(name.to_string(), value);
    }

    pub fn add_global(&self, name: &str, value: Value) {
        self.state.globals.borrow_mut().insert(name.to_string(), value);
    }

    pub fn add_repetition(&self, info: RepetitionInfo) {
        self.scope
            .repetitions
            .borrow_mut()
            .insert(info.name().to_string(), Arc::new(info));
    }

    pub fn repetition(&self, name: &str) -> Option<Arc<RepetitionInfo>> {
        let mut scope = Some(&self.scope);
        while let Some(current) = scope {
            if let Some(info) = current.repetitions.borrow().get(name) {
                return Some(info.clone());
            }
            scope = current.parent.as_ref();
        }
        None
    }

    pub fn set_error(&mut self, error: ErrorInfo) {
        self.error = Some(Arc::new(error));
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_deref()
    }

    /// Variable lookup: nearest local definition, then globals, then builtins.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.scope
            .find_local(name)
            .or_else(|| self.state.global(name))
            .or_else(|| self.builtin(name))
    }

    pub fn builtin(&self, name: &str) -> Option<Value> {
        let value = match name {
            "nothing" => Value::Null,
            "default" => Value::Cancel,
            "options" => self.state.options.clone(),
            "repeat" => {
                let mut repetitions = IndexMap::new();
                self.scope.collect_repetitions(&mut repetitions);
                Value::Map(repetitions)
            }
            "attrs" => Value::Map(
                self.node
                    .attributes()
                    .into_iter()
                    .map(|attr| (attr.qualified_name(), Value::String(attr.value)))
                    .collect(),
            ),
            "here" => self.state.here.clone(),
            "template" => self.state.template.clone(),
            "error" => Value::Object(self.error.clone()?),
            _ => return None,
        };
        Some(value)
    }

    /// Every builtin as one map, the value of `CONTEXTS`.
    pub fn contexts(&self) -> Value {
        Value::Map(
            BUILTIN_NAMES
                .iter()
                .filter_map(|name| Some((name.to_string(), self.builtin(name)?)))
                .collect(),
        )
    }

    pub fn evaluate(&self, text: &str) -> Result<Value, TalesError> {
        self.evaluate_expression(&Expression::new(text))
    }

    pub fn evaluate_expression(&self, expression: &Expression) -> Result<Value, TalesError> {
        let evaluator = self.registry().evaluator_for(expression)?;
        let value = evaluator.evaluate(expression, self)?;
        log::trace!("'{}' evaluated to {:?}", expression, value);
        Ok(value)
    }

    /// Evaluates `text` as a path regardless of prefix registration.
    pub fn evaluate_path(&self, text: &str) -> Result<Value, TalesError> {
        PathEvaluator.evaluate_path(&Path::create(text), self)
    }
}
