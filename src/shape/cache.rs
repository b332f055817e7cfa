//! Process-wide memoization of type shapes.

use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use serde_json::{json, Map, Value};

use super::field::{FieldBinding, FieldInfo, FieldTable};
use super::schema::Shape;

/// The ordered field table of one type.
pub struct TypeShape<T> {
    type_key: &'static str,
    fields: Vec<FieldBinding<T>>,
}

impl<T: Shape> TypeShape<T> {
    fn build() -> Self {
        let mut table = FieldTable::new();
        T::fields(&mut table);
        Self {
            type_key: std::any::type_name::<T>(),
            fields: table.into_fields(),
        }
    }
}

impl<T> TypeShape<T> {
    /// Fully qualified type name.
    pub fn type_key(&self) -> &'static str {
        self.type_key
    }

    /// Type name without its module path.
    pub fn type_name(&self) -> &'static str {
        short_type_name(self.type_key)
    }

    pub fn fields(&self) -> &[FieldBinding<T>] {
        &self.fields
    }

    /// Look a field up by name, ignoring ASCII case.
    pub fn field(&self, name: &str) -> Option<&FieldBinding<T>> {
        self.fields.iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name()).collect()
    }

    pub fn field_infos(&self) -> Vec<FieldInfo> {
        self.fields.iter().map(|f| f.info()).collect()
    }

    /// Object schema with one property per field.
    pub fn object_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            properties.insert(field.name().to_string(), field.schema());
            if field.is_required() {
                required.push(Value::from(field.name()));
            }
        }

        let mut schema = json!({
            "type": "object",
            "title": self.type_name(),
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }
}

/// Cache of [`TypeShape`]s keyed by type identity.
pub struct ShapeCache {
    shapes: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    builds: AtomicUsize,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self {
            shapes: DashMap::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Return the shape of `T`, building it on first access.
    pub fn get<T: Shape>(&self) -> Arc<TypeShape<T>> {
        let id = TypeId::of::<T>();
        if let Some(hit) = self.shapes.get(&id) {
            return downcast::<T>(Arc::clone(hit.value()));
        }

        // The shard stays write-locked until the shape is inserted.
        let entry = self.shapes.entry(id).or_insert_with(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(type_key = std::any::type_name::<T>(), "Building type shape");
            Arc::new(TypeShape::<T>::build())
        });
        downcast::<T>(Arc::clone(entry.value()))
    }

    /// Number of cached shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes computed so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T: Shape>(erased: Arc<dyn Any + Send + Sync>) -> Arc<TypeShape<T>> {
    match erased.downcast::<TypeShape<T>>() {
        Ok(shape) => shape,
        Err(_) => {
            tracing::error!(
                type_key = std::any::type_name::<T>(),
                "Cached shape has the wrong type; rebuilding"
            );
            Arc::new(TypeShape::<T>::build())
        }
    }
}

static SHAPES: LazyLock<ShapeCache> = LazyLock::new(ShapeCache::new);

/// Shape of `T` from the process-wide cache.
pub fn shape_of<T: Shape>() -> Arc<TypeShape<T>> {
    SHAPES.get::<T>()
}

/// Strip module paths from a type name, keeping generic arguments out.
///
/// `app::models::Contact` becomes `Contact`; `alloc::vec::Vec<app::Contact>`
/// becomes `Vec`.
pub fn short_type_name(full: &str) -> &str {
    let head = full.split('<').next().unwrap_or(full);
    head.rsplit("::").next().unwrap_or(head)
}
