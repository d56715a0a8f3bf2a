//! Unit tests for perf module.

use draggable::perf::{ScopedTimer, measure};

#[test]
fn test_scoped_timer_drops_quietly_under_budget() {
    // High threshold: dropping must not warn or panic
    let timer = ScopedTimer::new("test_op", 1000.0);
    drop(timer);
}

#[test]
fn test_slow_scope_still_drops() {
    // Zero threshold always reports; the drop must not panic
    let _timer = ScopedTimer::new("always_slow", 0.0);
    std::thread::sleep(std::time::Duration::from_millis(1));
}

#[test]
fn test_nested_timers() {
    let _outer = ScopedTimer::new("outer", 1000.0);
    {
        let _inner = ScopedTimer::for_profiling("inner");
    }
    let _sibling = ScopedTimer::new("sibling", 1000.0);
}

#[test]
fn test_measure_returns_result_and_time() {
    let (value, elapsed_ms) = measure(|| (1..=10).sum::<i32>());
    assert_eq!(value, 55);
    assert!(elapsed_ms >= 0.0);
}

#[test]
fn test_profile_scope_macro_compiles_in_functions() {
    fn handler() -> u32 {
        draggable::profile_scope!("handler");
        draggable::profile_scope!("handler_tight", 0.5);
        7
    }
    assert_eq!(handler(), 7);
}
