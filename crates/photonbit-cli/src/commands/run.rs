use std::fs;
use std::path::Path;

use photonbit_core::{PipelineConfig, Result, run_pipeline, save_bits};

#[allow(clippy::too_many_arguments)]
pub fn run(
    trials: usize,
    threshold: f64,
    window: usize,
    seed: Option<u64>,
    save: Option<&Path>,
    save_raw: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let config = PipelineConfig {
        trials,
        coincidence_threshold: threshold,
        entropy_window: window,
        seed,
    };
    println!("Simulating {trials} photon trials (threshold {threshold}, window {window})...");
    let run = run_pipeline(&config)?;

    println!(
        "\nRaw bits:  {} ({} coincidences rejected)",
        run.raw_bits.len(),
        run.coincidences
    );
    println!("  {}", super::preview(&run.raw_bits));
    println!(
        "Post bits: {} (extraction yield {:.1}%)",
        run.post_bits.len(),
        run.extraction_yield() * 100.0
    );
    println!("  {}", super::preview(&run.post_bits));

    print_entropy_line("raw", &run.raw_entropy);
    print_entropy_line("post", &run.post_entropy);

    if let Some(path) = save_raw {
        save_bits(path, &run.raw_bits)?;
        println!("\nRaw bitstream saved to {}", path.display());
    }
    if let Some(path) = save {
        save_bits(path, &run.post_bits)?;
        println!("Post bitstream saved to {}", path.display());
    }
    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&run).map_err(std::io::Error::other)?;
        fs::write(path, json)?;
        println!("Full run written to {}", path.display());
    }
    Ok(())
}

fn print_entropy_line(label: &str, entropy: &[f64]) {
    if entropy.is_empty() {
        println!("\nEntropy ({label}): no complete window");
        return;
    }
    let mean: f64 = entropy.iter().sum::<f64>() / entropy.len() as f64;
    let min = entropy.iter().copied().fold(f64::INFINITY, f64::min);
    println!(
        "\nEntropy ({label}): {} windows, mean {mean:.4}, min {min:.4}",
        entropy.len()
    );
}
