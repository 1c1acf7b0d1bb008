//! Photodiode channel simulation.
//!
//! For each polarization outcome, the two competing detectors produce analog
//! signal strengths: the detector matching the photon's state draws from the
//! high band `[0.8, 1.0)`, the other from the low band `[0.0, 0.2)`. The
//! bands are disjoint by construction; handling of near-tie readings is the
//! discriminator's general policy, not a special case here.

use std::ops::Range;

use rand::Rng;
use serde::Serialize;

use crate::emitter::Polarization;
use crate::error::{Error, Result};

/// Signal band for the detector matching the photon's polarization.
pub const HIGH_BAND: Range<f64> = 0.8..1.0;
/// Signal band for the opposite detector.
pub const LOW_BAND: Range<f64> = 0.0..0.2;

/// One trial's pair of detector signal strengths, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelReading {
    /// Signal strength at detector 0 (the S-polarization arm).
    pub d0: f64,
    /// Signal strength at detector 1 (the P-polarization arm).
    pub d1: f64,
}

impl ChannelReading {
    /// Reject detector values outside `[0.0, 1.0]`.
    ///
    /// Out-of-range values are an error, never clamped — a reading like that
    /// means the channel model upstream is broken.
    pub fn validate(&self, index: usize) -> Result<()> {
        for value in [self.d0, self.d1] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidChannelReading { index, value });
            }
        }
        Ok(())
    }
}

/// Simulate detector readings for each outcome, preserving length and order.
///
/// Draws are independent across trials and across the two detectors. This is
/// a stochastic function: two calls with identical input differ unless the
/// caller seeds `rng`.
pub fn simulate_detectors<R: Rng + ?Sized>(
    outcomes: &[Polarization],
    rng: &mut R,
) -> Vec<ChannelReading> {
    outcomes
        .iter()
        .map(|outcome| {
            let strong = rng.random_range(HIGH_BAND);
            let weak = rng.random_range(LOW_BAND);
            match outcome {
                Polarization::S => ChannelReading {
                    d0: strong,
                    d1: weak,
                },
                Polarization::P => ChannelReading {
                    d0: weak,
                    d1: strong,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::emit_outcomes;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn simulate_preserves_length_and_order() {
        let mut rng = StdRng::seed_from_u64(11);
        let outcomes = emit_outcomes(500, &mut rng);
        let readings = simulate_detectors(&outcomes, &mut rng);
        assert_eq!(readings.len(), outcomes.len());
        // The strong arm matches the outcome for every trial.
        for (outcome, reading) in outcomes.iter().zip(&readings) {
            match outcome {
                Polarization::S => assert!(reading.d0 > reading.d1),
                Polarization::P => assert!(reading.d1 > reading.d0),
            }
        }
    }

    #[test]
    fn simulate_respects_bands() {
        let mut rng = StdRng::seed_from_u64(12);
        let outcomes = emit_outcomes(1000, &mut rng);
        for reading in simulate_detectors(&outcomes, &mut rng) {
            let (strong, weak) = if reading.d0 > reading.d1 {
                (reading.d0, reading.d1)
            } else {
                (reading.d1, reading.d0)
            };
            assert!(HIGH_BAND.contains(&strong), "strong = {strong}");
            assert!(LOW_BAND.contains(&weak), "weak = {weak}");
        }
    }

    #[test]
    fn simulate_empty_input() {
        let mut rng = StdRng::seed_from_u64(13);
        assert!(simulate_detectors(&[], &mut rng).is_empty());
    }

    #[test]
    fn simulate_is_deterministic_under_fixed_seed() {
        let outcomes = emit_outcomes(100, &mut StdRng::seed_from_u64(14));
        let a = simulate_detectors(&outcomes, &mut StdRng::seed_from_u64(15));
        let b = simulate_detectors(&outcomes, &mut StdRng::seed_from_u64(15));
        assert_eq!(a, b);
    }

    #[test]
    fn validate_accepts_in_range() {
        let reading = ChannelReading { d0: 0.0, d1: 1.0 };
        assert!(reading.validate(0).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let reading = ChannelReading { d0: 1.2, d1: 0.1 };
        match reading.validate(7) {
            Err(Error::InvalidChannelReading { index, value }) => {
                assert_eq!(index, 7);
                assert!((value - 1.2).abs() < f64::EPSILON);
            }
            other => panic!("expected InvalidChannelReading, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_negative() {
        let reading = ChannelReading { d0: 0.5, d1: -0.01 };
        assert!(reading.validate(0).is_err());
    }
}
