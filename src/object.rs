use std::collections::HashMap;
use std::sync::Arc;

/// Coordinates of one materialized object within the per-block arena. Used
/// in place of an owning reference so that the (possibly cyclic) on-disk
/// reference graph never needs `Rc`/`RefCell` or unsafe aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub block: usize,
    pub index: usize,
}

/// A decoded field value. Every structure-typed field is representable as
/// one of these, including `char` arrays (which become [`Value::Str`]
/// rather than a list of one-byte strings).
#[derive(Debug, Clone)]
pub enum Value {
    UInt(u64),
    Float(f32),
    Double(f64),
    Str(String),
    Object(Box<Object>),
    Reference(ObjectRef),
    ReferenceList(Vec<ObjectRef>),
    List(Vec<Value>),
    /// A pointer whose target address does not match any known block.
    Unresolved(u64),
    Null,
}

/// A dynamically-typed instance of one schema structure.
#[derive(Debug, Clone)]
pub struct Object {
    type_name: Arc<str>,
    fields: HashMap<String, Value>,
}

impl Object {
    pub fn new(type_name: Arc<str>) -> Self {
        Object {
            type_name,
            fields: HashMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Overwrites any existing value under `key` — field-name collisions
    /// after cleaning are resolved last-write-wins, in schema field order.
    pub fn set(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }
}
