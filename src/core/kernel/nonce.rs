use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing nonce source shared by every private call of a client
///
/// Values are wall-clock microseconds, bumped by one whenever two calls land
/// in the same microsecond or the clock steps backwards. The last issued value
/// lives in an atomic, so concurrent callers always receive distinct values
/// ordered by the moment they hit the atomic.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Generator whose first value is strictly greater than `floor`
    pub const fn starting_after(floor: u64) -> Self {
        Self {
            last: AtomicU64::new(floor),
        }
    }

    pub fn next(&self) -> u64 {
        let now = now_micros();
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(next_after(prev, now))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        next_after(prev, now)
    }

    pub fn last(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

const fn next_after(prev: u64, now: u64) -> u64 {
    if now > prev {
        now
    } else {
        prev + 1
    }
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or_default()
}
