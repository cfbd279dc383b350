//! Delivery retry envelope: backoff schedule, rate-limit-only
//! retries, and exhaustion.

use std::time::Duration;
use zentrix_core::{
    delivery::{send_with_retry, Backoff, SendError, Transport},
    error::EconError,
};

/// Scripted transport: pops one result per send and records payloads.
struct FakeTransport {
    script: Vec<Result<(), SendError>>,
    sent: Vec<String>,
}

impl FakeTransport {
    fn new(script: Vec<Result<(), SendError>>) -> Self {
        Self { script, sent: Vec::new() }
    }
}

impl Transport for FakeTransport {
    fn send(&mut self, payload: &str) -> Result<(), SendError> {
        self.sent.push(payload.to_string());
        self.script.remove(0)
    }
}

#[derive(Default)]
struct RecordingBackoff {
    waits: Vec<Duration>,
}

impl Backoff for RecordingBackoff {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

fn rate_limited() -> Result<(), SendError> {
    Err(SendError { rate_limited: true, message: "429".to_string() })
}

#[test]
fn first_attempt_success_never_waits() {
    let mut transport = FakeTransport::new(vec![Ok(())]);
    let mut backoff = RecordingBackoff::default();

    send_with_retry(&mut transport, &mut backoff, "hello").expect("clean send");
    assert_eq!(transport.sent.len(), 1);
    assert!(backoff.waits.is_empty());
}

/// Two rate limits then success: waits of 5 s and 10 s, three sends.
#[test]
fn rate_limits_retry_with_doubling_delay() {
    let mut transport = FakeTransport::new(vec![rate_limited(), rate_limited(), Ok(())]);
    let mut backoff = RecordingBackoff::default();

    send_with_retry(&mut transport, &mut backoff, "surge notice").expect("third try");
    assert_eq!(transport.sent.len(), 3);
    assert_eq!(backoff.waits, [Duration::from_secs(5), Duration::from_secs(10)]);
}

/// Anything other than a rate limit propagates on the spot.
#[test]
fn hard_failures_do_not_retry() {
    let mut transport = FakeTransport::new(vec![Err(SendError {
        rate_limited: false,
        message: "channel deleted".to_string(),
    })]);
    let mut backoff = RecordingBackoff::default();

    let err = send_with_retry(&mut transport, &mut backoff, "x").expect_err("hard failure");
    assert!(matches!(err, EconError::Transport(_)));
    assert_eq!(transport.sent.len(), 1);
    assert!(backoff.waits.is_empty());
}

/// Three rate limits exhaust the envelope.
#[test]
fn exhausted_retries_surface_delivery_error() {
    let mut transport =
        FakeTransport::new(vec![rate_limited(), rate_limited(), rate_limited()]);
    let mut backoff = RecordingBackoff::default();

    let err = send_with_retry(&mut transport, &mut backoff, "x").expect_err("exhausted");
    assert!(matches!(err, EconError::Delivery { attempts: 3 }));
    assert_eq!(transport.sent.len(), 3);
    assert_eq!(backoff.waits.len(), 2, "no wait after the final attempt");
}
