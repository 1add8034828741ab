//! Target orchestration: free functions directly, bound methods through the
//! two-phase constructor flow.
//!
//! For `Class.method`, the constructor is fuzzed first exactly like a free
//! function. One successful argument list builds a single live receiver,
//! and the whole method sweep runs against that one instance — the receiver
//! is never re-instantiated between combinations, so a mutating method makes
//! later combinations observe earlier ones' effects. That ordering
//! dependency is part of the contract.

use sigprobe_pool::{ProbePool, Value};
use sigprobe_registry::{ClassHandle, MethodHandle, Registry, ResolveError, ResolvedTarget, TargetPath};

use crate::aggregate::FuzzReport;
use crate::sweep::{dispatch_sweep, sweep, SweepError, SweepOptions};

#[derive(Debug, thiserror::Error)]
pub enum FuzzError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error("no constructor argument combination succeeded for class '{class}'")]
    NoViableConstructorArgs { class: String },

    #[error("constructor for class '{class}' failed when re-instantiated")]
    ConstructorFailed {
        class: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Fuzz a registered target named by a dotted path.
///
/// The path is parsed before any lookup or invocation, so malformed paths
/// fail with zero side effects. Per-probe failures never escape the sweep;
/// everything returned as `Err` here is fatal and discards the run.
pub fn fuzz_target(
    registry: &Registry,
    module: &str,
    raw_path: &str,
    pool: &ProbePool,
    options: &SweepOptions,
) -> Result<FuzzReport, FuzzError> {
    let path = TargetPath::parse(raw_path)?;
    match registry.resolve(module, &path)? {
        ResolvedTarget::Function(function) => {
            let report = dispatch_sweep(
                function.name(),
                function.arity(),
                pool,
                options,
                |args| function.invoke(args),
            )?;
            Ok(report)
        }
        ResolvedTarget::Method { class, method } => {
            fuzz_method(class, method, &path.to_string(), pool, options)
        }
    }
}

/// The constructor-then-method pipeline for a depth-2 target.
fn fuzz_method(
    class: &ClassHandle,
    method: &MethodHandle,
    label: &str,
    pool: &ProbePool,
    options: &SweepOptions,
) -> Result<FuzzReport, FuzzError> {
    // Phase 1: fuzz the constructor like a free function. Instances built
    // along the way are dropped; only the outcome partition matters.
    let constructor_report = dispatch_sweep(
        class.name(),
        class.constructor_arity(),
        pool,
        options,
        |args| class.construct(args).map(|_| Value::Unit),
    )?;

    // Select the first argument list of the first-seen successful type key:
    // the earliest success in enumeration order. Deterministic because the
    // pool order is fixed.
    let chosen: Vec<Value> = constructor_report
        .results
        .successes
        .first()
        .and_then(|(_, bucket)| bucket.first())
        .cloned()
        .ok_or_else(|| FuzzError::NoViableConstructorArgs {
            class: class.name().to_string(),
        })?;

    tracing::debug!(class = class.name(), args = ?chosen, "selected constructor arguments");

    // Phase 2: one live receiver for the whole method sweep.
    let mut receiver = class
        .construct(&chosen)
        .map_err(|source| FuzzError::ConstructorFailed {
            class: class.name().to_string(),
            source,
        })?;

    // Always sequential: the receiver is shared and mutable.
    let report = sweep(label, method.arity(), pool, options, |args| {
        method.invoke(receiver.as_mut(), args)
    })?;
    Ok(report)
}
