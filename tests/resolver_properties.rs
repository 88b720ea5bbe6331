mod common;
use common::quiet_logger;

use std::sync::Arc;
use tunables::registry::builtin;
use tunables::{resolve, Outcome, RawValue, Resolver};

fn probes(min: i64, default: i64, max: i64) -> Vec<RawValue> {
    let mut values: Vec<RawValue> = [
        i64::MIN,
        -1,
        0,
        1,
        min,
        min.saturating_sub(1),
        default,
        max,
        max.saturating_add(1),
        i64::MAX,
    ]
    .into_iter()
    .map(RawValue::Integer)
    .collect();
    for text in ["", "abc", "1.0", "-", " 7 ", "+3", "-99999999999999999999"] {
        values.push(RawValue::from(text));
    }
    values.push(RawValue::Json(serde_json::json!(false)));
    values.push(RawValue::Json(serde_json::json!(u64::MAX)));
    values
}

#[test]
fn every_builtin_descriptor_is_self_consistent() {
    let registry = builtin::build().expect("builtin table");
    assert!(!registry.is_empty());
    for desc in registry.descriptors() {
        assert!(desc.min <= desc.default, "{}", desc.key());
        assert!(desc.default <= desc.max, "{}", desc.key());
    }
}

#[test]
fn effective_value_always_within_bounds() {
    for desc in builtin::registry().descriptors() {
        for raw in probes(desc.min, desc.default, desc.max) {
            let res = resolve(desc, Some(&raw));
            assert!(desc.contains(res.value), "{} with {}", desc.key(), raw);
        }
    }
}

#[test]
fn absent_value_yields_default() {
    for desc in builtin::registry().descriptors() {
        let res = resolve(desc, None);
        assert_eq!((res.value, res.outcome), (desc.default, Outcome::UsedDefault));
        assert!(res.supplied.is_none());
    }
}

#[test]
fn resolving_an_effective_value_is_stable() {
    for desc in builtin::registry().descriptors() {
        for raw in probes(desc.min, desc.default, desc.max) {
            let first = resolve(desc, Some(&raw));
            let second = resolve(desc, Some(&RawValue::Integer(first.value)));
            assert_eq!(second.value, first.value, "{} with {}", desc.key(), raw);
            assert_eq!(second.outcome, Outcome::UsedSuppliedValue);
        }
    }
}

#[tokio::test]
async fn concurrent_readers_share_the_registry() {
    let resolver = Arc::new(Resolver::builtin(quiet_logger()));
    let mut handles = Vec::new();
    for worker in 0..8i64 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            let raw = RawValue::Integer(worker * 10);
            resolver
                .resolve("remote", "worker_pool", Some(raw))
                .map(|res| res.value)
        }));
    }
    let mut values = Vec::new();
    for handle in handles {
        values.push(handle.await.expect("task").expect("resolved"));
    }
    assert_eq!(values, vec![1, 10, 16, 16, 16, 16, 16, 16]);
}
