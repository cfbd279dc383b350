//! Scheduler lifecycle: periodic firing and prompt, joined shutdown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use zentrix_core::scheduler::Scheduler;

#[test]
fn tasks_fire_repeatedly() {
    let counter = Arc::new(AtomicUsize::new(0));
    let task_counter = Arc::clone(&counter);

    let mut scheduler = Scheduler::new();
    scheduler.spawn("ticker", Duration::from_millis(5), move || {
        task_counter.fetch_add(1, Ordering::SeqCst);
        Duration::from_millis(5)
    });

    std::thread::sleep(Duration::from_millis(100));
    scheduler.stop();
    assert!(counter.load(Ordering::SeqCst) >= 2, "ticker should have fired repeatedly");
}

/// Stopping during a long initial delay returns promptly without the
/// task ever running.
#[test]
fn stop_interrupts_the_sleep() {
    let counter = Arc::new(AtomicUsize::new(0));
    let task_counter = Arc::clone(&counter);

    let mut scheduler = Scheduler::new();
    scheduler.spawn("sleeper", Duration::from_secs(3600), move || {
        task_counter.fetch_add(1, Ordering::SeqCst);
        Duration::from_secs(3600)
    });

    let started = Instant::now();
    scheduler.stop();
    assert!(started.elapsed() < Duration::from_secs(5), "stop must not wait out the hour");
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

/// Several workers shut down together.
#[test]
fn stop_joins_all_workers() {
    let mut scheduler = Scheduler::new();
    for name in ["a", "b", "c"] {
        scheduler.spawn(name, Duration::from_millis(10), || Duration::from_millis(10));
    }
    std::thread::sleep(Duration::from_millis(30));
    scheduler.stop();
}
