use std::fmt;

use crate::registry::ResolveError;

/// A parsed dotted target path: `"foo"` or `"Class.method"`.
///
/// Parsing happens before any lookup or invocation, so a malformed path
/// fails with zero side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPath {
    Function(String),
    Method { class: String, method: String },
}

impl TargetPath {
    /// Parse a dotted symbol path of depth 1 or 2. Any other depth (or an
    /// empty component) is a usage error.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let parts: Vec<&str> = raw.split('.').collect();
        match parts.as_slice() {
            [name] if !name.is_empty() => Ok(TargetPath::Function(name.to_string())),
            [class, method] if !class.is_empty() && !method.is_empty() => {
                Ok(TargetPath::Method {
                    class: class.to_string(),
                    method: method.to_string(),
                })
            }
            _ => Err(ResolveError::InvalidTargetPath {
                path: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetPath::Function(name) => write!(f, "{name}"),
            TargetPath::Method { class, method } => write!(f, "{class}.{method}"),
        }
    }
}
