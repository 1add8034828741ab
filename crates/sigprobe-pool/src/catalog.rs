//! Built-in catalog of representative probe values.
//!
//! The engine takes any [`ProbePool`]; this is just the default universe the
//! CLI uses. It deliberately mixes positive, negative and boundary values per
//! tag so sign- and emptiness-sensitive targets show up in the failure map.

use crate::pool::{ProbePool, ProbeValue};
use crate::value::Value;

/// The default probe pool.
pub fn default_pool() -> ProbePool {
    ProbePool::new(vec![
        ProbeValue::new("int", Value::Int(1)),
        ProbeValue::new("int", Value::Int(-2)),
        ProbeValue::new("int", Value::Int(0)),
        ProbeValue::new("float", Value::Float(3.5)),
        ProbeValue::new("float", Value::Float(-0.5)),
        ProbeValue::new("string", Value::Str("a".into())),
        ProbeValue::new("string", Value::Str(String::new())),
        ProbeValue::new("bool", Value::Bool(true)),
        ProbeValue::new("none", Value::Unit),
        ProbeValue::new("list", Value::List(vec![Value::Int(1), Value::Int(2)])),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_is_nonempty_and_ordered() {
        let pool = default_pool();
        assert!(pool.len() >= 5);
        // First entries are the int probes; order is load-bearing for
        // constructor-argument selection downstream.
        assert_eq!(pool.get(0).unwrap().type_tag, "int");
        assert_eq!(pool.get(0).unwrap().value, Value::Int(1));
    }

    #[test]
    fn test_default_pool_tags_are_consistent() {
        for probe in default_pool().iter() {
            let matches = match (&probe.type_tag[..], &probe.value) {
                ("int", Value::Int(_)) => true,
                ("float", Value::Float(_)) => true,
                ("string", Value::Str(_)) => true,
                ("bool", Value::Bool(_)) => true,
                ("none", Value::Unit) => true,
                ("list", Value::List(_)) => true,
                _ => false,
            };
            assert!(matches, "tag '{}' mismatches value", probe.type_tag);
        }
    }
}
