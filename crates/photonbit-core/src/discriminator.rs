//! Threshold discrimination of analog channel pairs into raw bits.
//!
//! A reading whose two detector values are closer than the coincidence
//! threshold is ambiguous and dropped entirely, modelling the dead zone of a
//! real photodetector pair. Surviving readings become one bit each, in
//! emission order, with the gaps closed up.

use crate::channel::ChannelReading;
use crate::error::Result;

/// Default coincidence rejection threshold.
pub const DEFAULT_COINCIDENCE_THRESHOLD: f64 = 0.05;

/// Convert channel readings into raw bits, dropping coincidences.
///
/// A reading with `|d0 - d1| < threshold` produces nothing. Otherwise the
/// bit is `0` when `d0 > d1`, else `1`; with `threshold = 0.0` nothing is
/// dropped and an exact tie deterministically emits `1`. Every reading is
/// range-validated first — an out-of-range value aborts the whole call with
/// [`Error::InvalidChannelReading`](crate::Error::InvalidChannelReading)
/// rather than being clamped.
pub fn discriminate(readings: &[ChannelReading], threshold: f64) -> Result<Vec<u8>> {
    let mut bits = Vec::with_capacity(readings.len());
    for (index, reading) in readings.iter().enumerate() {
        reading.validate(index)?;
        if (reading.d0 - reading.d1).abs() < threshold {
            // Coincidence: both detectors too close to call.
            continue;
        }
        bits.push(if reading.d0 > reading.d1 { 0 } else { 1 });
    }
    Ok(bits)
}
