pub mod analyze;
pub mod report;
pub mod run;

use std::path::Path;

use photonbit_core::{PipelineConfig, Result, load_bits, run_pipeline};

/// clap value parser for trial counts: reject, never default silently.
pub fn parse_trials(raw: &str) -> std::result::Result<usize, String> {
    photonbit_core::parse_trial_count(raw).map_err(|err| err.to_string())
}

/// Load a saved bitstream, or simulate a fresh post-extraction stream.
///
/// Returns the bits plus a human-readable description of where they came from.
pub fn load_or_simulate(
    input: Option<&Path>,
    trials: usize,
    seed: Option<u64>,
) -> Result<(Vec<u8>, String)> {
    match input {
        Some(path) => {
            let bits = load_bits(path)?;
            Ok((bits, path.display().to_string()))
        }
        None => {
            let run = run_pipeline(&PipelineConfig {
                trials,
                seed,
                ..Default::default()
            })?;
            Ok((run.post_bits, format!("simulated ({trials} trials)")))
        }
    }
}

/// First 80 bits of a stream as a `0`/`1` string for terminal previews.
pub fn preview(bits: &[u8]) -> String {
    let mut text: String = bits
        .iter()
        .take(80)
        .map(|&b| if b == 0 { '0' } else { '1' })
        .collect();
    if bits.len() > 80 {
        text.push_str("...");
    }
    text
}
