//! Resolution of one path segment against a value of unknown shape.

use crate::value::{HostObject, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type StringIndexer = Arc<dyn Fn(&dyn Any, &str) -> Option<Value> + Send + Sync>;
type MemberReader = Arc<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;
type IntIndexer = Arc<dyn Fn(&dyn Any, i64) -> Option<Value> + Send + Sync>;

/// One resolved way of reading a named member from a host type.
#[derive(Clone)]
pub enum MemberAccessor {
    StringIndexer(StringIndexer),
    Method(MemberReader),
    Property(MemberReader),
    Field(MemberReader),
    IntIndexer(IntIndexer, i64),
}

impl MemberAccessor {
    fn read(&self, target: &dyn Any, name: &str) -> Option<Value> {
        match self {
            MemberAccessor::StringIndexer(indexer) => indexer(target, name),
            MemberAccessor::Method(reader)
            | MemberAccessor::Property(reader)
            | MemberAccessor::Field(reader) => reader(target),
            MemberAccessor::IntIndexer(indexer, index) => indexer(target, *index),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            MemberAccessor::StringIndexer(_) => "string indexer",
            MemberAccessor::Method(_) => "method",
            MemberAccessor::Property(_) => "property",
            MemberAccessor::Field(_) => "field",
            MemberAccessor::IntIndexer(..) => "integer indexer",
        }
    }
}

/// The member table of a host type, built with typed closures.
///
/// ```
/// use zpt_tales::{HostObject, TypeDescriptor, Value};
/// use std::any::Any;
///
/// struct Person { name: String }
///
/// impl HostObject for Person {
///     fn as_any(&self) -> &dyn Any { self }
///     fn describe(&self) -> TypeDescriptor {
///         TypeDescriptor::new().field("name", |p: &Person| Some(Value::from(p.name.as_str())))
///     }
/// }
/// ```
#[derive(Clone, Default)]
pub struct TypeDescriptor {
    string_indexer: Option<StringIndexer>,
    methods: HashMap<String, MemberReader>,
    properties: HashMap<String, MemberReader>,
    fields: HashMap<String, MemberReader>,
    int_indexer: Option<IntIndexer>,
}

fn downcast_reader<T: 'static>(
    read: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
) -> MemberReader {
    Arc::new(move |target: &dyn Any| target.downcast_ref::<T>().and_then(&read))
}

impl TypeDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string_indexer<T: 'static>(
        mut self,
        index: impl Fn(&T, &str) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.string_indexer = Some(Arc::new(move |target: &dyn Any, key: &str| {
            target.downcast_ref::<T>().and_then(|t| index(t, key))
        }));
        self
    }

    pub fn method<T: 'static>(
        mut self,
        name: &str,
        call: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.to_string(), downcast_reader(call));
        self
    }

    pub fn property<T: 'static>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.properties.insert(name.to_string(), downcast_reader(get));
        self
    }

    pub fn field<T: 'static>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.fields.insert(name.to_string(), downcast_reader(get));
        self
    }

    pub fn int_indexer<T: 'static>(
        mut self,
        index: impl Fn(&T, i64) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.int_indexer = Some(Arc::new(move |target: &dyn Any, i: i64| {
            target.downcast_ref::<T>().and_then(|t| index(t, i))
        }));
        self
    }

    /// Picks the accessor for `name`: string indexer, method, property, field,
    /// then integer indexer.
    pub fn resolve(&self, name: &str) -> Option<MemberAccessor> {
        if let Some(indexer) = &self.string_indexer {
            return Some(MemberAccessor::StringIndexer(indexer.clone()));
        }
        if let Some(method) = self.methods.get(name) {
            return Some(MemberAccessor::Method(method.clone()));
        }
        if let Some(property) = self.properties.get(name) {
            return Some(MemberAccessor::Property(property.clone()));
        }
        if let Some(field) = self.fields.get(name) {
            return Some(MemberAccessor::Field(field.clone()));
        }
        match (&self.int_indexer, name.parse::<i64>()) {
            (Some(indexer), Ok(index)) => Some(MemberAccessor::IntIndexer(indexer.clone(), index)),
            _ => None,
        }
    }
}

/// Walks one step of a path from a value to its named child.
///
/// Accessor resolution for host objects is cached per (type, name), negative
/// results included. The cache is shared by every render using this traverser.
#[derive(Default)]
pub struct ObjectTraverser {
    accessors: RwLock<HashMap<(TypeId, String), Option<MemberAccessor>>>,
}

impl ObjectTraverser {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` is a routine miss, not an error.
    pub fn traverse(&self, source: &Value, name: &str) -> Option<Value> {
        match source {
            Value::Map(map) => map.get(name).cloned(),
            Value::List(items) => name
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned()),
            Value::Object(object) => self.traverse_object(object.as_ref(), name),
            _ => None,
        }
    }

    fn traverse_object(&self, object: &dyn HostObject, name: &str) -> Option<Value> {
        if let Some(handler) = object.path_handler() {
            return handler.try_get(name);
        }
        let target = object.as_any();
        let key = (target.type_id(), name.to_string());
        let cached = self
            .accessors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        let accessor = match cached {
            Some(accessor) => accessor,
            None => {
                let resolved = object.describe().resolve(name);
                log::trace!(
                    "Resolved '{}' on {} to {}",
                    name,
                    object.type_name(),
                    resolved.as_ref().map_or("nothing", MemberAccessor::kind)
                );
                self.accessors
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, resolved.clone());
                resolved
            }
        };
        accessor.and_then(|accessor| accessor.read(target, name))
    }

    pub fn cached_accessor_count(&self) -> usize {
        self.accessors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
