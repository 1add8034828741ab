//! Built-in demonstration targets.
//!
//! A grab bag of functions and classes with different acceptance envelopes,
//! so the fuzzer has something to bite on out of the box.

use anyhow::{anyhow, bail};
use sigprobe_pool::Value;
use sigprobe_registry::{ClassHandle, FunctionHandle, MethodHandle, Module, Receiver};

pub fn demo_module() -> Module {
    Module::new("demo")
        .with_function(FunctionHandle::new("add_one", 1, |args| match &args[0] {
            Value::Int(x) => Ok(Value::Int(x + 1)),
            Value::Float(x) => Ok(Value::Float(x + 1.0)),
            other => bail!("add_one expects a number, got {other}"),
        }))
        .with_function(FunctionHandle::new("concat", 2, |args| {
            match (&args[0], &args[1]) {
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
                _ => bail!("concat expects two strings"),
            }
        }))
        .with_function(FunctionHandle::new("divide", 2, |args| {
            match (&args[0], &args[1]) {
                (Value::Int(_), Value::Int(0)) => bail!("division by zero"),
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a / b)),
                _ => bail!("divide expects two ints"),
            }
        }))
        .with_function(FunctionHandle::new("pi", 0, |_args| {
            Ok(Value::Float(std::f64::consts::PI))
        }))
        .with_function(FunctionHandle::new("head", 1, |args| match &args[0] {
            Value::List(items) => items
                .first()
                .cloned()
                .ok_or_else(|| anyhow!("head of an empty list")),
            Value::Str(s) => s
                .chars()
                .next()
                .map(|c| Value::Str(c.to_string()))
                .ok_or_else(|| anyhow!("head of an empty string")),
            other => bail!("head expects a sequence, got {other}"),
        }))
        .with_class(counter_class())
        .with_class(box_class())
        .with_class(strict_class())
}

/// `Counter(start)` requires an int; `increment(n)` mutates the receiver,
/// `total()` reads it back.
fn counter_class() -> ClassHandle {
    struct Counter {
        total: i64,
    }

    ClassHandle::new("Counter", 1, |args| match &args[0] {
        Value::Int(start) => Ok(Box::new(Counter { total: *start }) as Receiver),
        other => bail!("Counter expects an int start, got {other}"),
    })
    .with_method(MethodHandle::new("increment", 1, |recv, args| {
        let counter = recv
            .downcast_mut::<Counter>()
            .ok_or_else(|| anyhow!("receiver is not a Counter"))?;
        match &args[0] {
            Value::Int(n) => {
                counter.total += n;
                Ok(Value::Int(counter.total))
            }
            other => bail!("increment expects an int, got {other}"),
        }
    }))
    .with_method(MethodHandle::new("total", 0, |recv, _args| {
        let counter = recv
            .downcast_mut::<Counter>()
            .ok_or_else(|| anyhow!("receiver is not a Counter"))?;
        Ok(Value::Int(counter.total))
    }))
}

/// `Box(v)` accepts any single value and never fails; `get()` is nullary.
fn box_class() -> ClassHandle {
    struct BoxTarget {
        held: Value,
    }

    ClassHandle::new("Box", 1, |args| {
        Ok(Box::new(BoxTarget {
            held: args[0].clone(),
        }) as Receiver)
    })
    .with_method(MethodHandle::new("get", 0, |recv, _args| {
        let boxed = recv
            .downcast_mut::<BoxTarget>()
            .ok_or_else(|| anyhow!("receiver is not a Box"))?;
        Ok(boxed.held.clone())
    }))
}

/// A constructor nothing in the default pool satisfies: demonstrates the
/// no-viable-constructor-arguments failure mode.
fn strict_class() -> ClassHandle {
    ClassHandle::new("Strict", 1, |args| match &args[0] {
        Value::Int(x) if *x > 100 => Ok(Box::new(()) as Receiver),
        _ => bail!("Strict wants an int above 100"),
    })
    .with_method(MethodHandle::new("noop", 0, |_recv, _args| Ok(Value::Unit)))
}
