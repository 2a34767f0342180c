//! Snowflake ID Generator
//!
//! Twitter-style unique ID generation, used as the suffix of the prefixed
//! string identifiers (`thread-…`, `comment-…`) stored in the database.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default custom epoch (2025-01-01T00:00:00.000Z)
pub const DEFAULT_EPOCH: u64 = 1735689600000;

const MACHINE_ID_BITS: u64 = 10;
const SEQUENCE_BITS: u64 = 12;
const MACHINE_ID_MASK: u64 = (1 << MACHINE_ID_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Snowflake ID generator
///
/// Layout: 41 bits of milliseconds since `epoch`, 10 bits of machine id and
/// 12 bits of sequence. The timestamp and sequence are packed into a single
/// atomic so concurrent callers never observe the same value.
pub struct SnowflakeGenerator {
    machine_id: u64,
    epoch: u64,
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64, epoch: u64) -> Self {
        Self {
            machine_id: machine_id & MACHINE_ID_MASK,
            epoch,
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let now = self.elapsed_millis();
        let previous = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |state| {
                Some(advance(state, now))
            })
            .unwrap_or_else(|state| state);
        let next = advance(previous, now);

        let timestamp = next >> SEQUENCE_BITS;
        let sequence = next & SEQUENCE_MASK;

        ((timestamp << (MACHINE_ID_BITS + SEQUENCE_BITS))
            | (self.machine_id << SEQUENCE_BITS)
            | sequence) as i64
    }

    /// Generate a prefixed string identifier, e.g. `comment-1234567890`.
    pub fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.generate())
    }

    /// Milliseconds elapsed since the configured epoch
    fn elapsed_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
            .saturating_sub(self.epoch)
    }
}

/// Next packed state. A sequence overflow carries into the timestamp bits,
/// keeping ids monotonic within one process.
fn advance(state: u64, now: u64) -> u64 {
    let last = state >> SEQUENCE_BITS;
    if now > last {
        now << SEQUENCE_BITS
    } else {
        state + 1
    }
}

/// Extract the unix timestamp (milliseconds) from a snowflake ID
pub fn extract_timestamp(snowflake: i64, epoch: u64) -> u64 {
    ((snowflake as u64) >> (MACHINE_ID_BITS + SEQUENCE_BITS)) + epoch
}
