//! Unit tests for the daily call budget

use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tickerpulse::services::rate_limit::CallBudget;

fn manual_clock(start: DateTime<Utc>) -> (Arc<Mutex<DateTime<Utc>>>, CallBudget) {
    let now = Arc::new(Mutex::new(start));
    let handle = now.clone();
    let budget = CallBudget::with_clock(2, Box::new(move || *handle.lock().unwrap()));
    (now, budget)
}

#[test]
fn test_budget_exhausts_at_limit() {
    let budget = CallBudget::new(2);
    assert!(budget.try_acquire());
    assert!(budget.try_acquire());
    assert!(!budget.try_acquire());
    assert_eq!(budget.remaining(), 0);
}

#[test]
fn test_budget_counts_down() {
    let budget = CallBudget::new(3);
    assert_eq!(budget.remaining(), 3);
    budget.try_acquire();
    assert_eq!(budget.remaining(), 2);
}

#[test]
fn test_budget_resets_on_day_rollover() {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap();
    let (now, budget) = manual_clock(start);

    assert!(budget.try_acquire());
    assert!(budget.try_acquire());
    assert!(!budget.try_acquire());

    // Advance the injected clock past midnight.
    *now.lock().unwrap() = Utc.with_ymd_and_hms(2026, 3, 2, 0, 5, 0).unwrap();
    assert_eq!(budget.remaining(), 2);
    assert!(budget.try_acquire());
}

#[test]
fn test_zero_budget_blocks_immediately() {
    let budget = CallBudget::new(0);
    assert!(!budget.try_acquire());
}
