//! # Core Domain Entities
//!
//! The unit-increment counter message and its simulated timestamp.
//!
//! Every message a producer emits carries `value = UNIT_VALUE` and a
//! timestamp strictly later than the previous one, so the stream's
//! timestamps form a duplicate-free monotonic sequence. Duplicates
//! introduced downstream repeat the *same* timestamp, which is what the
//! aggregator's monotonic filter keys on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// The fixed increment carried by every produced message.
pub const UNIT_VALUE: u64 = 1;

/// A simulated instant, in milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The minimum possible instant. Aggregation starts from here so the
    /// first genuine message is always accepted.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create from raw milliseconds since the epoch.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw milliseconds since the epoch.
    #[must_use]
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// The current wall-clock instant.
    ///
    /// # Panics
    ///
    /// This function will NOT panic. If the system clock is before
    /// UNIX_EPOCH (which should never happen on any sane system), it
    /// returns [`Timestamp::ZERO`].
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    /// This instant advanced by `millis`, saturating at the maximum.
    #[must_use]
    pub fn advanced_by(&self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// The increment counter message carried through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The amount folded into the aggregate when this message is accepted.
    pub value: u64,
    /// When this message was emitted; unique per distinct message.
    pub timestamp: Timestamp,
}

impl Message {
    /// A unit-increment message at `timestamp`.
    #[must_use]
    pub fn unit(timestamp: Timestamp) -> Self {
        Self {
            value: UNIT_VALUE,
            timestamp,
        }
    }
}
