use serde::Serialize;

use crate::value::Value;

/// Separator between positional type tags in a type key.
pub const TYPE_KEY_SEPARATOR: &str = ", ";

/// One `(type tag, concrete value)` pair from the fixed fuzzing pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeValue {
    pub type_tag: String,
    pub value: Value,
}

impl ProbeValue {
    pub fn new(type_tag: impl Into<String>, value: Value) -> Self {
        Self {
            type_tag: type_tag.into(),
            value,
        }
    }
}

/// The ordered, read-only universe of representative instances for a run.
///
/// Iteration order is the canonical enumeration order: every sweep draws
/// each argument position from this sequence front to back, so a fixed pool
/// makes the whole sweep deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbePool {
    values: Vec<ProbeValue>,
}

impl ProbePool {
    pub fn new(values: Vec<ProbeValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProbeValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[ProbeValue] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeValue> {
        self.values.iter()
    }
}

/// Build the type key identifying the type shape of an argument combination.
///
/// Positional tags joined with [`TYPE_KEY_SEPARATOR`]; the empty combination
/// (arity 0) gives the empty string. Distinct values sharing a tag collide
/// into the same key — reports group by shape, not by exact value.
pub fn type_key(tags: &[&str]) -> String {
    tags.join(TYPE_KEY_SEPARATOR)
}
