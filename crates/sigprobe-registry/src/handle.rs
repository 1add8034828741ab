//! Callable handles — the registration-table replacement for dynamic import.
//!
//! A handle pairs a declared arity with an invocation closure. The engine
//! never inspects annotations or signatures at runtime; the arity recorded
//! here is the single source of truth for how many probe values to draw.
//! Return values flow back as `anyhow::Result<Value>` so the sweep only ever
//! looks at the Ok/Err discriminant.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sigprobe_pool::Value;

/// A live object instance a bound method is invoked against.
///
/// Method closures downcast to their concrete state type.
pub type Receiver = Box<dyn Any + Send>;

type FunctionFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync>;
type ConstructorFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Receiver> + Send + Sync>;
type MethodFn = Arc<dyn Fn(&mut (dyn Any + Send), &[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// A registered free function.
#[derive(Clone)]
pub struct FunctionHandle {
    name: String,
    arity: usize,
    call: FunctionFn,
}

impl FunctionHandle {
    pub fn new<F>(name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            call: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn invoke(&self, args: &[Value]) -> anyhow::Result<Value> {
        (self.call)(args)
    }
}

impl fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionHandle")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A registered method on a class. Arity excludes the receiver.
#[derive(Clone)]
pub struct MethodHandle {
    name: String,
    arity: usize,
    call: MethodFn,
}

impl MethodHandle {
    pub fn new<F>(name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&mut (dyn Any + Send), &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            call: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke against a live receiver. The receiver is supplied by the
    /// caller, never drawn from the probe pool.
    pub fn invoke(&self, receiver: &mut (dyn Any + Send), args: &[Value]) -> anyhow::Result<Value> {
        (self.call)(receiver, args)
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodHandle")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A registered class: a constructor plus its methods.
#[derive(Clone)]
pub struct ClassHandle {
    name: String,
    constructor_arity: usize,
    construct: ConstructorFn,
    methods: HashMap<String, MethodHandle>,
}

impl ClassHandle {
    pub fn new<F>(name: impl Into<String>, constructor_arity: usize, constructor: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Receiver> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            constructor_arity,
            construct: Arc::new(constructor),
            methods: HashMap::new(),
        }
    }

    pub fn with_method(mut self, method: MethodHandle) -> Self {
        self.methods.insert(method.name().to_string(), method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructor_arity(&self) -> usize {
        self.constructor_arity
    }

    pub fn construct(&self, args: &[Value]) -> anyhow::Result<Receiver> {
        (self.construct)(args)
    }

    pub fn method(&self, name: &str) -> Option<&MethodHandle> {
        self.methods.get(name)
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassHandle")
            .field("name", &self.name)
            .field("constructor_arity", &self.constructor_arity)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn test_function_handle_invokes() {
        let f = FunctionHandle::new("double", 1, |args| match &args[0] {
            Value::Int(i) => Ok(Value::Int(i * 2)),
            other => bail!("expected an int, got {other}"),
        });
        assert_eq!(f.arity(), 1);
        assert_eq!(f.invoke(&[Value::Int(3)]).unwrap(), Value::Int(6));
        assert!(f.invoke(&[Value::Unit]).is_err());
    }

    #[test]
    fn test_class_handle_constructs_and_dispatches() {
        struct Cell(i64);

        let class = ClassHandle::new("Cell", 1, |args| match &args[0] {
            Value::Int(i) => Ok(Box::new(Cell(*i)) as Receiver),
            other => bail!("expected an int, got {other}"),
        })
        .with_method(MethodHandle::new("get", 0, |recv, _args| {
            let cell = recv
                .downcast_mut::<Cell>()
                .ok_or_else(|| anyhow::anyhow!("receiver is not a Cell"))?;
            Ok(Value::Int(cell.0))
        }));

        let mut receiver = class.construct(&[Value::Int(5)]).unwrap();
        let get = class.method("get").unwrap();
        assert_eq!(
            get.invoke(receiver.as_mut(), &[]).unwrap(),
            Value::Int(5)
        );
        assert!(class.method("missing").is_none());
        assert!(class.construct(&[Value::Unit]).is_err());
    }
}
