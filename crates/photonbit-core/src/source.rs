//! Raw bit acquisition sources.
//!
//! The pipeline normally synthesizes its raw bits, but acquisition is a
//! trait seam so a hardware front end (serial photodetector rig, external
//! QRNG) can slot in behind the same `sequence of raw bits` contract. A
//! failing hardware source degrades to the simulated path instead of
//! aborting — and a failed acquisition is discarded whole, never spliced
//! into the stream as unmarked partial data.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::channel::simulate_detectors;
use crate::discriminator::{DEFAULT_COINCIDENCE_THRESHOLD, discriminate};
use crate::emitter::emit_outcomes;

/// Why a source failed to deliver bits.
#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    /// The source cannot operate on this machine at all.
    #[error("source unavailable: {0}")]
    Unavailable(String),
    /// A single acquisition attempt failed.
    #[error("acquisition failed: {0}")]
    Failed(String),
}

/// Metadata about a bit source.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    /// Unique identifier (e.g. `"simulated_polarization"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
}

/// Contract for anything that can deliver raw (pre-extraction) bits.
pub trait BitSource {
    /// Source metadata.
    fn info(&self) -> &SourceInfo;

    /// Check whether this source can operate right now.
    fn is_available(&self) -> bool;

    /// Deliver exactly `n` raw bits (values 0/1), or fail as a whole.
    fn acquire(&mut self, n: usize) -> Result<Vec<u8>, AcquireError>;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }
}

/// Simulated polarization-measurement source.
///
/// Runs emit → simulate → discriminate in batches until the requested number
/// of raw bits exists. Seeded construction reproduces the exact stream.
pub struct SimulatedSource {
    info: SourceInfo,
    rng: StdRng,
    threshold: f64,
}

impl SimulatedSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_threshold(seed, DEFAULT_COINCIDENCE_THRESHOLD)
    }

    pub fn with_threshold(seed: Option<u64>, threshold: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            info: SourceInfo {
                name: "simulated_polarization",
                description: "single-photon polarization measurement simulation",
            },
            rng,
            threshold,
        }
    }
}

impl BitSource for SimulatedSource {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn is_available(&self) -> bool {
        true
    }

    fn acquire(&mut self, n: usize) -> Result<Vec<u8>, AcquireError> {
        let mut bits = Vec::with_capacity(n);
        while bits.len() < n {
            // Oversample slightly: headroom for coincidence rejection at
            // wider-than-default thresholds.
            let deficit = n - bits.len();
            let batch_trials = deficit + deficit / 8 + 8;
            let outcomes = emit_outcomes(batch_trials, &mut self.rng);
            let readings = simulate_detectors(&outcomes, &mut self.rng);
            let batch = discriminate(&readings, self.threshold)
                .map_err(|err| AcquireError::Failed(err.to_string()))?;
            if batch.is_empty() {
                // A threshold wide enough to reject a whole batch would have
                // this loop replenish forever. Fail the acquisition instead.
                return Err(AcquireError::Failed(format!(
                    "coincidence threshold {} rejected all {batch_trials} trials",
                    self.threshold
                )));
            }
            bits.extend(batch);
        }
        bits.truncate(n);
        Ok(bits)
    }
}

/// Primary source with a mandatory simulated fallback.
///
/// When the primary is unavailable or an acquisition fails, the request is
/// served by the simulated source instead; the failure is logged and never
/// propagated. The failed batch is discarded whole, so the output stream is
/// always one source's bits, not a silent mixture of partial reads.
pub struct FallbackSource {
    primary: Box<dyn BitSource>,
    fallback: SimulatedSource,
}

impl FallbackSource {
    pub fn new(primary: Box<dyn BitSource>, fallback: SimulatedSource) -> Self {
        Self { primary, fallback }
    }
}

impl BitSource for FallbackSource {
    fn info(&self) -> &SourceInfo {
        self.primary.info()
    }

    fn is_available(&self) -> bool {
        // The simulated fallback always works.
        true
    }

    fn acquire(&mut self, n: usize) -> Result<Vec<u8>, AcquireError> {
        if self.primary.is_available() {
            match self.primary.acquire(n) {
                Ok(bits) if bits.len() == n => return Ok(bits),
                Ok(bits) => log::warn!(
                    "{}: short acquisition ({}/{} bits), falling back to simulation",
                    self.primary.name(),
                    bits.len(),
                    n
                ),
                Err(err) => log::warn!(
                    "{}: acquisition failed ({err}), falling back to simulation",
                    self.primary.name()
                ),
            }
        } else {
            log::debug!(
                "{}: unavailable, using simulated source",
                self.primary.name()
            );
        }
        self.fallback.acquire(n)
    }
}
