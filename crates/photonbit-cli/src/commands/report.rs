use std::path::Path;

use photonbit_core::Result;
use photonbit_tests::{quality_score, run_battery};

pub fn run(input: Option<&Path>, trials: usize, seed: Option<u64>) -> Result<()> {
    let (bits, origin) = super::load_or_simulate(input, trials, seed)?;
    println!("Testing {} bits from {origin}\n", bits.len());

    let results = run_battery(&bits);
    println!(
        "  {:<22} {:>4} {:>5} {:>10}  {}",
        "Test", "OK", "Grade", "p-value", "Details"
    );
    println!("  {}", "-".repeat(70));
    for result in &results {
        let ok = if result.passed { "✓" } else { "✗" };
        let p = match result.p_value {
            Some(p) => format!("{p:.4}"),
            None => "-".to_string(),
        };
        println!(
            "  {:<22} {:>4} {:>5} {:>10}  {}",
            result.name, ok, result.grade, p, result.details
        );
    }

    println!(
        "\nQuality score: {:.0}/100 ({} of {} tests passed)",
        quality_score(&results),
        results.iter().filter(|r| r.passed).count(),
        results.len()
    );
    Ok(())
}
