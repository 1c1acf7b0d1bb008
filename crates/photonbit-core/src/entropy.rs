//! Windowed Shannon entropy estimation for bitstreams.
//!
//! The stream is partitioned into consecutive non-overlapping windows of a
//! fixed size; a trailing partial window is dropped, not padded. Each window
//! yields one empirical binary entropy value in `[0, 1]`.

use crate::error::{Error, Result};

/// Default entropy window size in bits.
pub const DEFAULT_ENTROPY_WINDOW: usize = 100;

/// Shannon entropy of a whole bitstream, in bits per bit.
///
/// Returns `0.0` for empty or single-valued input.
pub fn shannon_bits(bits: &[u8]) -> f64 {
    if bits.is_empty() {
        return 0.0;
    }
    let ones = bits.iter().filter(|&&b| b == 1).count();
    binary_entropy(ones as f64 / bits.len() as f64)
}

/// Per-window Shannon entropy over non-overlapping complete windows.
///
/// Produces exactly `bits.len() / window` values, each in `[0, 1]`. A window
/// containing only one symbol has entropy `0.0` by convention — `log2(0)` is
/// undefined and the boundary is defined away deliberately. `window == 0` is
/// rejected with [`Error::InvalidWindow`]; a stream shorter than one window
/// yields an empty vector.
pub fn windowed_shannon(bits: &[u8], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidWindow(window));
    }
    Ok(bits
        .chunks_exact(window)
        .map(|segment| {
            let ones = segment.iter().filter(|&&b| b == 1).count();
            binary_entropy(ones as f64 / window as f64)
        })
        .collect())
}

/// Binary entropy of a Bernoulli(p1) source, `0.0` at either boundary.
fn binary_entropy(p1: f64) -> f64 {
    let p0 = 1.0 - p1;
    if p0 <= 0.0 || p1 <= 0.0 {
        return 0.0;
    }
    -(p0 * p0.log2() + p1 * p1.log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_count_is_floor_of_len_over_window() {
        let bits = vec![0u8; 250];
        let values = windowed_shannon(&bits, 100).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn trailing_partial_window_is_dropped() {
        let bits = vec![1u8; 99];
        assert!(windowed_shannon(&bits, 100).unwrap().is_empty());
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let bits: Vec<u8> = (0..1000).map(|i| ((i * 7 + 3) % 5 == 0) as u8).collect();
        for h in windowed_shannon(&bits, 50).unwrap() {
            assert!((0.0..=1.0).contains(&h), "h = {h}");
        }
    }

    #[test]
    fn single_valued_window_has_zero_entropy() {
        let zeros = vec![0u8; 100];
        assert_eq!(windowed_shannon(&zeros, 100).unwrap(), vec![0.0]);
        let ones = vec![1u8; 100];
        assert_eq!(windowed_shannon(&ones, 100).unwrap(), vec![0.0]);
    }

    #[test]
    fn balanced_window_has_unit_entropy() {
        let bits: Vec<u8> = (0..100).map(|i| (i % 2) as u8).collect();
        let values = windowed_shannon(&bits, 100).unwrap();
        assert_eq!(values.len(), 1);
        assert!((values[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            windowed_shannon(&[0, 1], 0),
            Err(Error::InvalidWindow(0))
        ));
    }

    #[test]
    fn empty_stream_is_not_an_error() {
        assert!(windowed_shannon(&[], 100).unwrap().is_empty());
    }

    #[test]
    fn shannon_bits_whole_stream() {
        assert_eq!(shannon_bits(&[]), 0.0);
        assert_eq!(shannon_bits(&[0, 0, 0]), 0.0);
        let balanced: Vec<u8> = (0..64).map(|i| (i % 2) as u8).collect();
        assert!((shannon_bits(&balanced) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_ones_window_matches_closed_form() {
        // H(0.25) = -(0.75 log2 0.75 + 0.25 log2 0.25) ≈ 0.8113
        let mut bits = vec![0u8; 75];
        bits.extend(vec![1u8; 25]);
        let values = windowed_shannon(&bits, 100).unwrap();
        assert!((values[0] - 0.8112781244591328).abs() < 1e-12);
    }
}
