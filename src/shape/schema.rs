//! The `Shape` trait and its primitive implementations.

use serde_json::{json, Value};

use super::cache::shape_of;
use super::field::FieldTable;

/// A value type whose fields can be bound from requests and documented.
///
/// Structs list their fields in declaration order:
///
/// ```ignore
/// impl Shape for GetContactByIdQuery {
///     fn fields(table: &mut FieldTable<Self>) {
///         table.integer("id", |q, v: i64| q.id = v);
///     }
/// }
/// ```
///
/// `fields` runs once per type, inside the shape cache. It must not call
/// [`shape_of`] itself.
pub trait Shape: Send + Sync + 'static {
    /// Register the bindable fields of `Self`. Defaults to none.
    fn fields(table: &mut FieldTable<Self>)
    where
        Self: Sized,
    {
        let _ = table;
    }

    /// JSON schema fragment for `Self`. Structs get an object schema built
    /// from their field table.
    fn schema() -> Value
    where
        Self: Sized,
    {
        shape_of::<Self>().object_schema()
    }
}

macro_rules! primitive_shape {
    ($($ty:ty => $schema:expr),* $(,)?) => {
        $(
            impl Shape for $ty {
                fn schema() -> Value {
                    $schema
                }
            }
        )*
    };
}

primitive_shape! {
    i8 => json!({ "type": "integer", "format": "int32" }),
    i16 => json!({ "type": "integer", "format": "int32" }),
    i32 => json!({ "type": "integer", "format": "int32" }),
    i64 => json!({ "type": "integer", "format": "int64" }),
    u8 => json!({ "type": "integer", "format": "int32" }),
    u16 => json!({ "type": "integer", "format": "int32" }),
    u32 => json!({ "type": "integer", "format": "int64" }),
    u64 => json!({ "type": "integer", "format": "int64" }),
    usize => json!({ "type": "integer", "format": "int64" }),
    f32 => json!({ "type": "number", "format": "float" }),
    f64 => json!({ "type": "number", "format": "double" }),
    bool => json!({ "type": "boolean" }),
    String => json!({ "type": "string" }),
    &'static str => json!({ "type": "string" }),
    Value => json!({ "type": "object" }),
}

impl<T: Shape> Shape for Vec<T> {
    fn schema() -> Value {
        json!({ "type": "array", "items": T::schema() })
    }
}

impl<T: Shape> Shape for Option<T> {
    fn schema() -> Value {
        T::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pair {
        left: i32,
        right: String,
    }

    impl Shape for Pair {
        fn fields(table: &mut FieldTable<Self>) {
            table.integer("left", |p, v: i32| p.left = v).required();
            table.string("right", |p, v| p.right = v);
        }
    }

    #[test]
    fn test_primitive_schemas() {
        assert_eq!(i64::schema(), json!({ "type": "integer", "format": "int64" }));
        assert_eq!(bool::schema(), json!({ "type": "boolean" }));
        assert_eq!(Option::<String>::schema(), json!({ "type": "string" }));
    }

    #[test]
    fn test_struct_schema_lists_fields() {
        let schema = Pair::schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["title"], "Pair");
        assert_eq!(schema["properties"]["left"]["type"], "integer");
        assert_eq!(schema["properties"]["right"]["type"], "string");
        assert_eq!(schema["required"], json!(["left"]));

        let pair = Pair::default();
        assert_eq!(pair.left, 0);
        assert!(pair.right.is_empty());
    }

    #[test]
    fn test_vec_schema_wraps_items() {
        let schema = Vec::<Pair>::schema();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["title"], "Pair");
    }
}
