//! Descriptive statistics for bitstreams.
//!
//! Binary-alphabet cousins of the classical byte-level randomness
//! diagnostics: symbol bias, runs structure, and a windowed entropy summary.
//! These are descriptive only — pass/fail testing with p-values lives in the
//! `photonbit-tests` battery.

use serde::Serialize;

use crate::entropy::{shannon_bits, windowed_shannon};
use crate::error::Result;

/// Runs structure of a bitstream.
#[derive(Debug, Clone, Serialize)]
pub struct RunsSummary {
    /// Number of maximal runs of identical bits.
    pub total_runs: usize,
    /// Expected run count for an unbiased stream: `1 + (n - 1) / 2`.
    pub expected_runs: f64,
    /// Longest run of identical bits.
    pub longest_run: usize,
    /// Expected longest run for an unbiased stream, roughly `log2(n)`.
    pub expected_longest_run: f64,
}

/// Full descriptive analysis of one bitstream.
#[derive(Debug, Clone, Serialize)]
pub struct BitstreamAnalysis {
    pub len: usize,
    pub ones: usize,
    /// Empirical probability of `1`.
    pub ones_fraction: f64,
    /// Absolute deviation of `ones_fraction` from 0.5.
    pub bias: f64,
    /// Whole-stream Shannon entropy in bits per bit.
    pub shannon: f64,
    pub runs: RunsSummary,
    /// Window size used for the per-window entropy sequence.
    pub window: usize,
    /// Per-window Shannon entropy, one value per complete window.
    pub windowed_entropy: Vec<f64>,
    pub mean_window_entropy: f64,
    pub min_window_entropy: f64,
}

/// Analyze a bitstream with the given entropy window.
pub fn analyze_bits(bits: &[u8], window: usize) -> Result<BitstreamAnalysis> {
    let windowed_entropy = windowed_shannon(bits, window)?;
    let (mean_window_entropy, min_window_entropy) = if windowed_entropy.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = windowed_entropy.iter().sum();
        let min = windowed_entropy.iter().copied().fold(f64::INFINITY, f64::min);
        (sum / windowed_entropy.len() as f64, min)
    };

    let ones = bits.iter().filter(|&&b| b == 1).count();
    let ones_fraction = if bits.is_empty() {
        0.0
    } else {
        ones as f64 / bits.len() as f64
    };

    Ok(BitstreamAnalysis {
        len: bits.len(),
        ones,
        ones_fraction,
        bias: (ones_fraction - 0.5).abs(),
        shannon: shannon_bits(bits),
        runs: runs_summary(bits),
        window,
        windowed_entropy,
        mean_window_entropy,
        min_window_entropy,
    })
}

fn runs_summary(bits: &[u8]) -> RunsSummary {
    if bits.is_empty() {
        return RunsSummary {
            total_runs: 0,
            expected_runs: 0.0,
            longest_run: 0,
            expected_longest_run: 0.0,
        };
    }

    let mut total_runs = 1usize;
    let mut longest = 1usize;
    let mut current = 1usize;
    for pair in bits.windows(2) {
        if pair[0] == pair[1] {
            current += 1;
            if current > longest {
                longest = current;
            }
        } else {
            total_runs += 1;
            current = 1;
        }
    }

    let n = bits.len() as f64;
    RunsSummary {
        total_runs,
        expected_runs: 1.0 + (n - 1.0) / 2.0,
        longest_run: longest,
        expected_longest_run: n.log2().max(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn all_zeros_is_maximally_biased() {
        let analysis = analyze_bits(&[0u8; 200], 100).unwrap();
        assert_eq!(analysis.ones, 0);
        assert!((analysis.bias - 0.5).abs() < f64::EPSILON);
        assert_eq!(analysis.shannon, 0.0);
        assert_eq!(analysis.runs.total_runs, 1);
        assert_eq!(analysis.runs.longest_run, 200);
        assert_eq!(analysis.windowed_entropy, vec![0.0, 0.0]);
    }

    #[test]
    fn alternating_stream_has_maximal_runs() {
        let bits: Vec<u8> = (0..100).map(|i| (i % 2) as u8).collect();
        let analysis = analyze_bits(&bits, 50).unwrap();
        assert_eq!(analysis.runs.total_runs, 100);
        assert_eq!(analysis.runs.longest_run, 1);
        assert!((analysis.mean_window_entropy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn random_stream_looks_unbiased() {
        let mut rng = StdRng::seed_from_u64(31);
        let bits: Vec<u8> = (0..10_000).map(|_| rng.random_range(0..2u8)).collect();
        let analysis = analyze_bits(&bits, 100).unwrap();
        assert!(analysis.bias < 0.02, "bias = {}", analysis.bias);
        assert!(analysis.shannon > 0.99);
        assert!(analysis.mean_window_entropy > 0.9);
        // Run count lands near expectation for unbiased bits.
        let rel = (analysis.runs.total_runs as f64 - analysis.runs.expected_runs).abs()
            / analysis.runs.expected_runs;
        assert!(rel < 0.05, "relative run deviation = {rel}");
    }

    #[test]
    fn empty_stream_analysis() {
        let analysis = analyze_bits(&[], 100).unwrap();
        assert_eq!(analysis.len, 0);
        assert_eq!(analysis.runs.total_runs, 0);
        assert!(analysis.windowed_entropy.is_empty());
        assert_eq!(analysis.mean_window_entropy, 0.0);
    }

    #[test]
    fn analysis_serializes_to_json() {
        let analysis = analyze_bits(&[0, 1, 1, 0], 2).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"ones_fraction\""));
        assert!(json.contains("\"windowed_entropy\""));
    }
}
