//! Seeded reproducibility check.
//!
//! Runs the simulation several times from the same seed and compares
//! BLAKE3 fingerprints of the bincode-encoded results.

use tracing::{debug, info, warn};

use crate::engine::rng::SimRng;
use crate::error::{SimError, SimResult};
use crate::model::{simulate, SimulationParameters};

/// Outcome of a successful reproducibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReproducibilityReport {
    pub seed: u64,
    pub runs: usize,
    /// Fingerprint shared by every run.
    pub fingerprint: String,
}

/// Simulate `runs` times from `seed` and require identical results.
///
/// # Errors
///
/// Returns `Config` if `runs` is zero and `ReproducibilityMismatch` on the
/// first run whose fingerprint differs from the first one.
pub fn verify_reproducibility(
    params: &SimulationParameters,
    seed: u64,
    runs: usize,
) -> SimResult<ReproducibilityReport> {
    if runs == 0 {
        return Err(SimError::config("verification needs at least one run"));
    }

    let mut reference: Option<String> = None;
    for run in 0..runs {
        let hash = simulate(params, &mut SimRng::new(seed)).fingerprint()?;
        debug!(run, %hash, "run fingerprint");
        match &reference {
            None => reference = Some(hash),
            Some(expected) if *expected != hash => {
                warn!(run, %expected, found = %hash, "reproducibility mismatch");
                return Err(SimError::ReproducibilityMismatch {
                    run,
                    expected: expected.clone(),
                    found: hash,
                });
            }
            Some(_) => {}
        }
    }

    let fingerprint = reference.unwrap_or_default();
    info!(seed, runs, %fingerprint, "runs reproducible");
    Ok(ReproducibilityReport {
        seed,
        runs,
        fingerprint,
    })
}
