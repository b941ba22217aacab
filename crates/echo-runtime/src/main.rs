//! # EchoRelay Experiment Driver
//!
//! Sweeps the relay's duplication probability from 0.0 towards 0.9 and
//! runs one full pipeline per step, printing the aggregate and timing
//! for each run.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration (defaults + environment overrides)
//! 3. Run the sweep
//!
//! ## Environment Overrides
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `ECHO_MESSAGE_COUNT` | Distinct messages per run |
//! | `ECHO_MAX_EXTRA_COPIES` | Extra-copy cap at the relay |
//! | `ECHO_SEED` | Base RNG seed (reproducible sweeps) |

use anyhow::Result;
use echo_runtime::{run_experiment, RuntimeConfig};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Probability step between sweep runs.
const SWEEP_STEP: f64 = 0.1;

/// Number of sweep runs (probabilities `0.0, 0.1, .., 0.8`).
const SWEEP_RUNS: u32 = 9;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = load_config();
    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!(
        message_count = config.message_count,
        max_extra_copies = config.max_extra_copies,
        base_seed,
        "starting duplication sweep"
    );

    for step in 0..SWEEP_RUNS {
        let probability = f64::from(step) * SWEEP_STEP;
        // Derive a distinct, reproducible seed per run.
        let seed = base_seed.wrapping_add(u64::from(step));

        let report = run_experiment(
            config.message_count,
            probability,
            config.max_extra_copies,
            seed,
        )
        .await?;

        println!(
            "\tMessages sent {}, Messages observed {}, Final state {}, Total time(nanoseconds) {}",
            config.message_count,
            report.summary.total_observed,
            report.summary.final_sum,
            report.elapsed.as_nanos()
        );
    }

    info!("sweep complete");
    Ok(())
}

/// Load configuration from defaults and environment overrides.
fn load_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    if let Ok(count) = std::env::var("ECHO_MESSAGE_COUNT") {
        match count.parse() {
            Ok(c) => config.message_count = c,
            Err(_) => warn!("ECHO_MESSAGE_COUNT must be a non-negative integer"),
        }
    }
    if let Ok(cap) = std::env::var("ECHO_MAX_EXTRA_COPIES") {
        match cap.parse() {
            Ok(k) => config.max_extra_copies = k,
            Err(_) => warn!("ECHO_MAX_EXTRA_COPIES must be a non-negative integer"),
        }
    }
    if let Ok(seed) = std::env::var("ECHO_SEED") {
        match seed.parse() {
            Ok(s) => config.seed = Some(s),
            Err(_) => warn!("ECHO_SEED must be a 64-bit unsigned integer"),
        }
    }

    config
}
