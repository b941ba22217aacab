//! Final aggregation result returned once the inbound queue drains.

use serde::{Deserialize, Serialize};

/// The aggregator's terminal state for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunSummary {
    /// Sum of the values of every distinct accepted message.
    pub final_sum: u64,
    /// Raw count of messages observed, duplicates included.
    pub total_observed: u64,
}

impl RunSummary {
    /// How many observed messages were rejected as duplicates.
    #[must_use]
    pub fn duplicates_discarded(&self) -> u64 {
        self.total_observed.saturating_sub(self.final_sum)
    }
}
