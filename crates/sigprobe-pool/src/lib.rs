pub mod catalog;
pub mod pool;
pub mod value;

pub use pool::{type_key, ProbePool, ProbeValue, TYPE_KEY_SEPARATOR};
pub use value::Value;
