use std::sync::atomic::{AtomicUsize, Ordering};

use sigprobe_engine::{sweep, sweep_parallel, SweepError, SweepOptions};
use sigprobe_pool::{ProbePool, ProbeValue, Value};

fn small_pool() -> ProbePool {
    ProbePool::new(vec![
        ProbeValue::new("int", Value::Int(1)),
        ProbeValue::new("int", Value::Int(-2)),
        ProbeValue::new("string", Value::Str("a".into())),
    ])
}

fn add_one(args: &[Value]) -> anyhow::Result<Value> {
    match &args[0] {
        Value::Int(x) => Ok(Value::Int(x + 1)),
        other => anyhow::bail!("expected a number, got {other}"),
    }
}

#[test]
fn test_add_one_scenario() {
    let pool = small_pool();
    let report = sweep("add_one", 1, &pool, &SweepOptions::default(), add_one).unwrap();

    assert_eq!(report.function_to_type, "add_one");
    assert_eq!(report.results.total_recorded(), 3);
    assert_eq!(
        report.results.successes.get("int").unwrap(),
        &[vec![Value::Int(1)], vec![Value::Int(-2)]]
    );
    assert_eq!(
        report.results.failures.get("string").unwrap(),
        &[vec![Value::Str("a".into())]]
    );
    assert!(report.results.failures.get("int").is_none());
}

#[test]
fn test_total_is_pool_size_to_the_arity() {
    let pool = small_pool();
    for arity in 0..=3 {
        let calls = AtomicUsize::new(0);
        let report = sweep("count", arity, &pool, &SweepOptions::default(), |_args| {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(Value::Unit)
        })
        .unwrap();

        let expected = 3usize.pow(arity as u32);
        assert_eq!(calls.load(Ordering::Relaxed), expected);
        assert_eq!(report.results.total_recorded(), expected);
        assert_eq!(report.results.failures.total_recorded(), 0);
    }
}

#[test]
fn test_mutual_exclusion_under_mixed_outcomes() {
    let pool = small_pool();
    // Succeeds only when both positions hold ints of opposite sign.
    let report = sweep("mixed", 2, &pool, &SweepOptions::default(), |args| {
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) if a * b < 0 => Ok(Value::Unit),
            _ => anyhow::bail!("rejected"),
        }
    })
    .unwrap();

    assert_eq!(report.results.total_recorded(), 9);
    assert_eq!(report.results.successes.total_recorded(), 2);
    assert_eq!(report.results.failures.total_recorded(), 7);
    // "int, int" appears in both maps (2 successes, 2 failures) but each
    // attempted tuple is in exactly one.
    assert_eq!(report.results.successes.get("int, int").unwrap().len(), 2);
    assert_eq!(report.results.failures.get("int, int").unwrap().len(), 2);
}

#[test]
fn test_arity_zero_is_a_single_empty_combination() {
    let pool = small_pool();
    let report = sweep("nullary", 0, &pool, &SweepOptions::default(), |args| {
        assert!(args.is_empty());
        Ok(Value::Unit)
    })
    .unwrap();

    assert_eq!(report.results.total_recorded(), 1);
    assert_eq!(report.results.successes.get("").unwrap(), &[Vec::new()]);

    let report = sweep("nullary_raises", 0, &pool, &SweepOptions::default(), |_| {
        anyhow::bail!("always")
    })
    .unwrap();
    assert_eq!(report.results.failures.get("").unwrap(), &[Vec::new()]);
}

#[test]
fn test_bucket_lists_follow_invocation_order() {
    let pool = ProbePool::new(vec![
        ProbeValue::new("int", Value::Int(10)),
        ProbeValue::new("int", Value::Int(20)),
    ]);
    let report = sweep("pairs", 2, &pool, &SweepOptions::default(), |_| {
        Ok(Value::Unit)
    })
    .unwrap();

    // Rightmost position varies fastest.
    assert_eq!(
        report.results.successes.get("int, int").unwrap(),
        &[
            vec![Value::Int(10), Value::Int(10)],
            vec![Value::Int(10), Value::Int(20)],
            vec![Value::Int(20), Value::Int(10)],
            vec![Value::Int(20), Value::Int(20)],
        ]
    );
}

#[test]
fn test_panicking_target_is_recorded_as_failure() {
    let pool = small_pool();
    let report = sweep("panics_on_string", 1, &pool, &SweepOptions::default(), |args| {
        match &args[0] {
            Value::Int(_) => Ok(Value::Unit),
            other => panic!("cannot handle {other}"),
        }
    })
    .unwrap();

    assert_eq!(report.results.successes.total_recorded(), 2);
    assert_eq!(report.results.failures.get("string").unwrap().len(), 1);
}

#[test]
fn test_no_short_circuit_after_first_success() {
    let pool = small_pool();
    let calls = AtomicUsize::new(0);
    sweep("all_attempted", 2, &pool, &SweepOptions::default(), |_| {
        calls.fetch_add(1, Ordering::Relaxed);
        Ok(Value::Unit)
    })
    .unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 9);
}

#[test]
fn test_combination_cap_fails_before_any_invocation() {
    let pool = small_pool();
    let calls = AtomicUsize::new(0);
    let options = SweepOptions {
        max_combinations: 8,
        ..Default::default()
    };
    let err = sweep("capped", 2, &pool, &options, |_| {
        calls.fetch_add(1, Ordering::Relaxed);
        Ok(Value::Unit)
    })
    .unwrap_err();

    assert!(matches!(
        err,
        SweepError::CombinationLimitExceeded {
            requested: 9,
            max: 8,
            ..
        }
    ));
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_empty_pool_with_positive_arity_records_nothing() {
    let pool = ProbePool::new(Vec::new());
    let report = sweep("starved", 2, &pool, &SweepOptions::default(), |_| {
        Ok(Value::Unit)
    })
    .unwrap();
    assert_eq!(report.results.total_recorded(), 0);
}

#[test]
fn test_parallel_sweep_matches_sequential() {
    let pool = small_pool();
    let options = SweepOptions::default();
    let sequential = sweep("mixed", 2, &pool, &options, |args| {
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            _ => anyhow::bail!("ints only"),
        }
    })
    .unwrap();
    let parallel = sweep_parallel("mixed", 2, &pool, &options, |args| {
        match (&args[0], &args[1]) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            _ => anyhow::bail!("ints only"),
        }
    })
    .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_report_serializes_to_wire_shape() {
    let pool = small_pool();
    let report = sweep("add_one", 1, &pool, &SweepOptions::default(), add_one).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert_eq!(
        json,
        r#"{"function_to_type":"add_one","results":{"successes":{"int":[[1],[-2]]},"failures":{"string":[["a"]]}}}"#
    );
}
