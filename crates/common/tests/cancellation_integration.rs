//! Integration tests for cancellation tokens shared across threads

use std::thread;
use std::time::{Duration, Instant};

use regwapi_common::sync::CancellationToken;

/// A worker loop sleeping on the token stops promptly after cancel
#[test]
fn test_worker_loop_stops_on_cancel() {
    let token = CancellationToken::new();
    let worker_token = token.clone();

    let worker = thread::spawn(move || {
        let mut iterations = 0u32;
        while !worker_token.wait_timeout(Duration::from_millis(10)) {
            iterations += 1;
            if iterations > 10_000 {
                break;
            }
        }
        iterations
    });

    thread::sleep(Duration::from_millis(50));
    let cancelled_at = Instant::now();
    token.cancel();

    let iterations = worker.join().unwrap();
    assert!(iterations < 10_000);
    assert!(cancelled_at.elapsed() < Duration::from_secs(5));
}

/// Cancelling twice is harmless and every clone reports it
#[test]
fn test_cancel_is_idempotent() {
    let token = CancellationToken::new();
    let clones: Vec<_> = (0..4).map(|_| token.clone()).collect();

    token.cancel();
    token.cancel();

    assert!(clones.iter().all(CancellationToken::is_cancelled));
}

/// An oversized timeout does not overflow and still wakes on cancel
#[test]
fn test_unbounded_wait_wakes_on_cancel() {
    let token = CancellationToken::new();
    let waiter = token.clone();
    let handle = thread::spawn(move || waiter.wait_timeout(Duration::MAX));

    thread::sleep(Duration::from_millis(20));
    token.cancel();

    assert!(handle.join().unwrap());
}
