//! Integration tests for outcome pipelines
//!
//! End-to-end chains mixing construction, accumulation, transformation,
//! and async stages, the way application code composes them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clearwater::{assert_error_messages, assert_failure, assert_success};
use clearwater::{Error, Outcome, Reason, Success};

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: u64,
    total_cents: i64,
}

fn parse_order(raw: &str) -> Outcome<Order> {
    let mut parts = raw.split(':');
    let id = parts.next().and_then(|s| s.parse().ok());
    let total = parts.next().and_then(|s| s.parse().ok());
    match (id, total) {
        (Some(id), Some(total_cents)) => Outcome::ok(Order { id, total_cents })
            .with_success(Success::new("parsed").with_meta("id", id as i64)),
        _ => Outcome::fail(Error::new("malformed order").with_meta("raw", raw)),
    }
}

fn check_total(order: Order) -> Outcome<Order> {
    if order.total_cents > 0 {
        Outcome::ok(order).with_success("total verified")
    } else {
        Outcome::fail("total must be positive")
    }
}

#[test]
fn full_pipeline_happy_path() {
    let outcome = parse_order("7:2500")
        .bind(check_total)
        .map(|order| order.total_cents)
        .with_success("priced");

    assert_success!(outcome);
    assert_eq!(*outcome.value(), 2500);

    let messages: Vec<&str> = outcome.reasons().iter().map(|r| r.message()).collect();
    assert_eq!(messages, vec!["parsed", "total verified", "priced"]);
}

#[test]
fn failure_halts_later_stages_and_keeps_log() {
    let stage_calls = AtomicUsize::new(0);

    let outcome = parse_order("garbage")
        .bind(|order| {
            stage_calls.fetch_add(1, Ordering::SeqCst);
            check_total(order)
        })
        .map(|order| {
            stage_calls.fetch_add(1, Ordering::SeqCst);
            order.id
        });

    assert_failure!(outcome);
    assert_eq!(stage_calls.load(Ordering::SeqCst), 0);
    assert_error_messages!(outcome, ["malformed order"]);
    assert_eq!(outcome.value_opt(), None);
}

#[test]
fn reasons_from_every_stage_accumulate_in_order() {
    let outcome = parse_order("1:100")
        .bind(check_total)
        .bind(|_| Outcome::<Order>::fail("inventory empty"))
        .bind(check_total);

    assert_failure!(outcome);
    let messages: Vec<&str> = outcome.reasons().iter().map(|r| r.message()).collect();
    assert_eq!(messages, vec!["parsed", "total verified", "inventory empty"]);
}

#[test]
fn error_rewriting_preserves_successes() {
    let outcome = parse_order("1:0")
        .bind(check_total)
        .map_errors(|e| Error::new(format!("order rejected: {}", e.message())));

    assert_error_messages!(outcome, ["order rejected: total must be positive"]);
    assert_eq!(outcome.successes().len(), 1);
}

#[test]
fn transformations_leave_clones_untouched_across_threads() {
    let source = Arc::new(parse_order("9:900").bind(check_total));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&source);
            std::thread::spawn(move || {
                let local = (*shared)
                    .clone()
                    .with_error(format!("thread {} failure", i));
                assert!(local.is_failed());
                local.reasons().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }

    // The shared source saw none of the per-thread mutations.
    assert!(source.is_success());
    assert_eq!(source.reasons().len(), 2);
}

#[test]
fn transcript_renders_every_reason() {
    let outcome = parse_order("1:100")
        .bind(check_total)
        .with_error(Error::new("late failure").caused_by("disk full"));

    let text = outcome.to_string();
    assert!(text.starts_with("failed with 3 reason(s):"));
    assert!(text.contains("parsed"));
    assert!(text.contains("total verified"));
    assert!(text.contains("late failure"));
    assert!(text.contains("caused by: disk full"));
}

#[tokio::test]
async fn async_pipeline_mixes_with_sync_stages() {
    async fn fetch_discount(order: Order) -> Outcome<i64> {
        Outcome::ok(order.total_cents / 10).with_success("discount applied")
    }

    let outcome = parse_order("3:1000")
        .bind(check_total)
        .bind_async(fetch_discount)
        .await
        .map_async(|discount| async move { discount * 2 })
        .await;

    assert_success!(outcome);
    assert_eq!(*outcome.value(), 200);
    let messages: Vec<&str> = outcome.reasons().iter().map(|r| r.message()).collect();
    assert_eq!(messages, vec!["parsed", "total verified", "discount applied"]);
}

#[tokio::test]
async fn async_short_circuit_never_awaits_producer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_stage = Arc::clone(&calls);

    let outcome = parse_order("nope")
        .bind_async(move |order: Order| {
            let calls = Arc::clone(&calls_in_stage);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Outcome::ok(order.id)
            }
        })
        .await;

    assert_failure!(outcome);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn join_collects_independent_outcomes() {
    let merged = Outcome::join((1..=3).map(|id| async move {
        parse_order(&format!("{}:100", id)).map(|order| order.id)
    }))
    .await;

    assert_success!(merged);
    assert_eq!(merged.into_value(), Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn join_surfaces_every_failure() {
    let merged = Outcome::join(["1:100", "bad", "also bad"].into_iter().map(|raw| async move {
        parse_order(raw).map(|order| order.id)
    }))
    .await;

    assert_failure!(merged);
    assert_error_messages!(merged, ["malformed order", "malformed order"]);
}
