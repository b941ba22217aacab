//! # Duplication Policy
//!
//! Decides, one trial at a time, whether the relay emits an extra copy.
//! The policy is a capability passed into the relay; randomness is seeded
//! explicitly so duplication patterns are reproducible in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One extra-copy decision per call.
pub trait DuplicationPolicy: Send {
    /// Decide a single independent duplication trial.
    fn should_duplicate(&mut self) -> bool;
}

/// Independent Bernoulli trials from an explicitly seeded RNG.
pub struct BernoulliPolicy {
    probability: f64,
    rng: StdRng,
}

impl BernoulliPolicy {
    /// Create a policy succeeding with `probability` per trial.
    ///
    /// The probability is clamped to `[0, 1]`. The seed fully determines
    /// the trial sequence.
    #[must_use]
    pub fn new(probability: f64, seed: u64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DuplicationPolicy for BernoulliPolicy {
    fn should_duplicate(&mut self) -> bool {
        // Exact edges short-circuit: p <= 0 never duplicates, p >= 1
        // always does.
        if self.probability <= 0.0 {
            return false;
        }
        if self.probability >= 1.0 {
            return true;
        }
        self.rng.gen_bool(self.probability)
    }
}
