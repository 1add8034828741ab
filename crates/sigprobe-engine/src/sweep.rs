//! The combinatorial invoker.
//!
//! Enumerates the full cartesian cross of the probe pool taken `arity`
//! times (repetition allowed, diagonal included) and classifies every
//! invocation as success or failure. No short-circuiting: all combinations
//! are attempted even after a type key's outcome is known.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;

use sigprobe_pool::{type_key, ProbePool, Value};

use crate::aggregate::FuzzReport;

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("sweep over '{target}' needs {requested} combinations, above the cap of {max}")]
    CombinationLimitExceeded {
        target: String,
        requested: u128,
        max: u64,
    },
}

/// Options governing a single sweep.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Upper bound on attempted combinations. The pool-size^arity product
    /// grows fast; exceeding this fails before any invocation.
    pub max_combinations: u64,
    /// Probe independent combinations on a rayon pool. Only honored for
    /// receiverless sweeps; method sweeps stay sequential.
    pub parallel: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            max_combinations: 1_000_000,
            parallel: false,
        }
    }
}

/// `pool_len^arity`, saturating at `u128::MAX`. `0^0 == 1`: an arity-0
/// sweep always attempts exactly one (empty) combination.
fn combination_count(pool_len: usize, arity: usize) -> u128 {
    if arity == 0 {
        return 1;
    }
    let mut total: u128 = 1;
    for _ in 0..arity {
        total = total.saturating_mul(pool_len as u128);
    }
    total
}

/// Decode combination `index` into pool indices, one per argument position.
/// The rightmost position varies fastest, matching a nested-loop cross.
fn decode_combination(index: u64, pool_len: usize, slots: &mut [usize]) {
    let mut rem = index;
    let p = pool_len as u64;
    for slot in slots.iter_mut().rev() {
        *slot = (rem % p) as usize;
        rem /= p;
    }
}

/// Materialize the type key and argument values for one combination.
fn combination_tuple(pool: &ProbePool, slots: &[usize]) -> (String, Vec<Value>) {
    let probes = pool.values();
    let tags: Vec<&str> = slots.iter().map(|&i| probes[i].type_tag.as_str()).collect();
    let args: Vec<Value> = slots.iter().map(|&i| probes[i].value.clone()).collect();
    (type_key(&tags), args)
}

/// Run one probe invocation and reduce it to its discriminant. A normal
/// return is success (the value is discarded); an `Err` or a panic in the
/// target is failure. The cause is never inspected.
fn classify<F>(invoke: F) -> bool
where
    F: FnOnce() -> anyhow::Result<Value>,
{
    matches!(catch_unwind(AssertUnwindSafe(invoke)), Ok(Ok(_)))
}

fn check_cap(target: &str, pool_len: usize, arity: usize, options: &SweepOptions) -> Result<u64, SweepError> {
    let requested = combination_count(pool_len, arity);
    if requested > options.max_combinations as u128 {
        return Err(SweepError::CombinationLimitExceeded {
            target: target.to_string(),
            requested,
            max: options.max_combinations,
        });
    }
    Ok(requested as u64)
}

/// Sequential sweep over a callable of the given arity.
///
/// `invoke` may mutate captured state (a shared receiver); combinations are
/// attempted strictly in enumeration order, one blocking call at a time.
/// This seam is also the extension point for a per-call timeout policy.
pub fn sweep<F>(
    target: &str,
    arity: usize,
    pool: &ProbePool,
    options: &SweepOptions,
    mut invoke: F,
) -> Result<FuzzReport, SweepError>
where
    F: FnMut(&[Value]) -> anyhow::Result<Value>,
{
    let total = check_cap(target, pool.len(), arity, options)?;
    tracing::debug!(symbol = target, arity, combinations = total, "starting sweep");

    let mut report = FuzzReport::new(target);
    let mut slots = vec![0usize; arity];
    for index in 0..total {
        decode_combination(index, pool.len(), &mut slots);
        let (key, args) = combination_tuple(pool, &slots);
        if classify(|| invoke(&args)) {
            report.results.record_success(&key, args);
        } else {
            report.results.record_failure(&key, args);
        }
    }

    tracing::debug!(
        symbol = target,
        successes = report.results.successes.total_recorded(),
        failures = report.results.failures.total_recorded(),
        "sweep complete"
    );
    Ok(report)
}

/// Parallel sweep for receiverless callables.
///
/// Combinations are embarrassingly parallel against a read-only pool and
/// callable; outcomes are folded back in index order, so the report is
/// identical to the sequential sweep's.
pub fn sweep_parallel<F>(
    target: &str,
    arity: usize,
    pool: &ProbePool,
    options: &SweepOptions,
    invoke: F,
) -> Result<FuzzReport, SweepError>
where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Sync,
{
    let total = check_cap(target, pool.len(), arity, options)?;
    tracing::debug!(symbol = target, arity, combinations = total, "starting parallel sweep");

    let outcomes: Vec<(String, Vec<Value>, bool)> = (0..total)
        .into_par_iter()
        .map(|index| {
            let mut slots = vec![0usize; arity];
            decode_combination(index, pool.len(), &mut slots);
            let (key, args) = combination_tuple(pool, &slots);
            let ok = classify(|| invoke(&args));
            (key, args, ok)
        })
        .collect();

    let mut report = FuzzReport::new(target);
    for (key, args, ok) in outcomes {
        if ok {
            report.results.record_success(&key, args);
        } else {
            report.results.record_failure(&key, args);
        }
    }
    Ok(report)
}

/// Pick the parallel or sequential sweep per the options. Only for
/// receiverless callables — method sweeps must call [`sweep`] directly.
pub(crate) fn dispatch_sweep<F>(
    target: &str,
    arity: usize,
    pool: &ProbePool,
    options: &SweepOptions,
    invoke: F,
) -> Result<FuzzReport, SweepError>
where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Sync,
{
    if options.parallel {
        sweep_parallel(target, arity, pool, options, invoke)
    } else {
        sweep(target, arity, pool, options, invoke)
    }
}
