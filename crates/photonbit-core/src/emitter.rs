//! Photon polarization source.
//!
//! Each simulated trial prepares a single photon in one of two polarization
//! states, chosen independently and uniformly. This is the ideal, noise-free
//! outcome that the detector channels then blur into analog readings.

use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};

/// Polarization state of one simulated photon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Polarization {
    /// S-polarized: detector 0 sees the strong signal.
    S,
    /// P-polarized: detector 1 sees the strong signal.
    P,
}

impl Polarization {
    /// The raw bit this state maps to under ideal, noise-free measurement.
    pub fn bit(self) -> u8 {
        match self {
            Self::S => 0,
            Self::P => 1,
        }
    }
}

impl std::fmt::Display for Polarization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::S => write!(f, "S"),
            Self::P => write!(f, "P"),
        }
    }
}

/// Draw `n` independent, uniform polarization outcomes.
///
/// `n = 0` yields an empty vector, not an error.
pub fn emit_outcomes<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Polarization> {
    (0..n)
        .map(|_| {
            if rng.random::<bool>() {
                Polarization::P
            } else {
                Polarization::S
            }
        })
        .collect()
}

/// Parse a trial count from untrusted text.
///
/// Non-numeric and negative input is rejected with [`Error::InvalidCount`].
/// Substituting a default is the caller's decision, never made here.
pub fn parse_trial_count(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n as usize),
        _ => Err(Error::InvalidCount(trimmed.to_string())),
    }
}
