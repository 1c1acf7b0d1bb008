use std::fs;
use std::path::Path;

use photonbit_core::{Result, analyze_bits};

pub fn run(
    input: Option<&Path>,
    trials: usize,
    seed: Option<u64>,
    window: usize,
    output: Option<&Path>,
) -> Result<()> {
    let (bits, origin) = super::load_or_simulate(input, trials, seed)?;
    let analysis = analyze_bits(&bits, window)?;

    println!("Bitstream: {origin}");
    println!("  length:          {}", analysis.len);
    println!(
        "  ones fraction:   {:.4} (bias {:.4})",
        analysis.ones_fraction, analysis.bias
    );
    println!("  Shannon entropy: {:.4} bits/bit", analysis.shannon);
    println!(
        "  runs:            {} (expected {:.0}), longest {} (expected {:.1})",
        analysis.runs.total_runs,
        analysis.runs.expected_runs,
        analysis.runs.longest_run,
        analysis.runs.expected_longest_run
    );
    println!(
        "  windowed H:      {} windows of {} bits, mean {:.4}, min {:.4}",
        analysis.windowed_entropy.len(),
        analysis.window,
        analysis.mean_window_entropy,
        analysis.min_window_entropy
    );

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&analysis).map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        println!("\nFull analysis written to {}", path.display());
    }
    Ok(())
}
