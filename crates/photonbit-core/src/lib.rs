//! # photonbit-core
//!
//! **Turn a simulated single-photon measurement into a usable random bitstream.**
//!
//! `photonbit-core` models a photon-polarization QRNG end to end: a source
//! emits photons in one of two polarization states, two competing photodiode
//! channels produce noisy analog readings, a threshold discriminator converts
//! each reading pair into a raw bit while rejecting ambiguous coincidence
//! events, and a Von Neumann extractor removes first-order bias from the raw
//! stream. Windowed Shannon entropy quantifies both streams.
//!
//! ## Quick Start
//!
//! ```
//! use photonbit_core::{PipelineConfig, run_pipeline};
//!
//! let config = PipelineConfig {
//!     trials: 1000,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let run = run_pipeline(&config).unwrap();
//!
//! // Coincidence rejection drops a few trials; extraction keeps ~1/4.
//! assert!(run.raw_bits.len() <= 1000);
//! assert!(run.post_bits.len() <= run.raw_bits.len() / 2);
//! ```
//!
//! ## Architecture
//!
//! Emitter → Channel Simulator → Discriminator → (raw bits) → Extractor → (post bits)
//!
//! The entropy estimator applies independently to both bitstreams. Every
//! stage is a pure transform over slices; stochastic stages take an explicit
//! `&mut impl Rng`, so a fixed seed reproduces a run exactly. The core
//! contains no delays, no I/O, and no presentation state — front ends consume
//! the plain sequences in [`PipelineRun`] at their own pace.
//!
//! A hardware front end can supply raw bits directly through the
//! [`BitSource`] trait; [`FallbackSource`] degrades to the simulated path
//! when acquisition fails.

pub mod analysis;
pub mod channel;
pub mod discriminator;
pub mod emitter;
pub mod entropy;
pub mod error;
pub mod extractor;
pub mod persist;
pub mod pipeline;
pub mod source;

pub use analysis::{BitstreamAnalysis, RunsSummary, analyze_bits};
pub use channel::{ChannelReading, simulate_detectors};
pub use discriminator::{DEFAULT_COINCIDENCE_THRESHOLD, discriminate};
pub use emitter::{Polarization, emit_outcomes, parse_trial_count};
pub use entropy::{DEFAULT_ENTROPY_WINDOW, shannon_bits, windowed_shannon};
pub use error::{Error, Result};
pub use extractor::von_neumann;
pub use persist::{load_bits, save_bits};
pub use pipeline::{PipelineConfig, PipelineRun, run_pipeline};
pub use source::{AcquireError, BitSource, FallbackSource, SimulatedSource, SourceInfo};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
