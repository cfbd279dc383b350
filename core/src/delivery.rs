//! Outward delivery with a bounded retry envelope.
//!
//! RULE: Only rate limiting is retried. Any other transport failure
//! propagates on the first attempt; exhausting the retries surfaces a
//! delivery error with the attempt count.

use crate::error::{EconError, EconResult};
use std::time::Duration;

const MAX_ATTEMPTS: u32 = 3;
const INITIAL_DELAY_SECS: u64 = 5;

/// A failed send, classified by whether waiting could help.
#[derive(Debug, Clone)]
pub struct SendError {
    pub rate_limited: bool,
    pub message: String,
}

/// The outward channel (a chat API, a webhook, a test fake).
pub trait Transport {
    fn send(&mut self, payload: &str) -> Result<(), SendError>;
}

/// How to wait between attempts. Production sleeps the thread; tests
/// record the requested delays instead.
pub trait Backoff {
    fn wait(&mut self, duration: Duration);
}

pub struct ThreadBackoff;

impl Backoff for ThreadBackoff {
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Send `payload`, retrying rate-limited failures up to three attempts
/// with delays of 5 then 10 seconds.
pub fn send_with_retry(
    transport: &mut dyn Transport,
    backoff: &mut dyn Backoff,
    payload: &str,
) -> EconResult<()> {
    let mut delay = INITIAL_DELAY_SECS;
    for attempt in 1..=MAX_ATTEMPTS {
        match transport.send(payload) {
            Ok(()) => return Ok(()),
            Err(e) if !e.rate_limited => return Err(EconError::Transport(e.message)),
            Err(e) if attempt < MAX_ATTEMPTS => {
                log::warn!(
                    "delivery rate limited (attempt {attempt}/{MAX_ATTEMPTS}), \
                     retrying in {delay}s: {}",
                    e.message
                );
                backoff.wait(Duration::from_secs(delay));
                delay *= 2;
            }
            Err(_) => {}
        }
    }
    Err(EconError::Delivery { attempts: MAX_ATTEMPTS })
}
