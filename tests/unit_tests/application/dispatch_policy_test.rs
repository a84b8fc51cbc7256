use std::time::Duration;

use docrelay::application::services::{DispatchPolicy, ExecutionMode};

const MB: u64 = 1024 * 1024;

fn policy() -> DispatchPolicy {
    DispatchPolicy::new(20 * MB, 0.5, Duration::from_secs(25))
}

#[test]
fn given_small_document_when_deciding_then_runs_inline() {
    assert_eq!(policy().decide(Some(5 * MB)), ExecutionMode::Sync);
}

#[test]
fn given_size_at_threshold_when_deciding_then_runs_as_job() {
    assert_eq!(policy().decide(Some(20 * MB)), ExecutionMode::Async);
    assert_eq!(policy().decide(Some(20 * MB - 1)), ExecutionMode::Sync);
}

#[test]
fn given_unknown_size_when_deciding_then_runs_as_job() {
    assert_eq!(policy().decide(None), ExecutionMode::Async);
}

#[test]
fn given_slow_cost_model_when_small_document_exceeds_budget_then_runs_as_job() {
    let slow = DispatchPolicy::new(20 * MB, 10.0, Duration::from_secs(25));

    assert_eq!(slow.decide(Some(3 * MB)), ExecutionMode::Async);
    assert_eq!(slow.decide(Some(2 * MB)), ExecutionMode::Sync);
}

#[test]
fn given_size_when_estimating_then_scales_linearly() {
    assert_eq!(policy().estimated_duration(10 * MB), Duration::from_secs(5));
}
