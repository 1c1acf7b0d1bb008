//! CLI for photonbit — simulated photon-polarization randomness.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "photonbit")]
#[command(about = "photonbit — simulated photon-polarization randomness, debiased and measured")]
#[command(version = photonbit_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation pipeline and report both bitstreams
    Run {
        /// Number of simulated photon trials
        #[arg(long, default_value = "1000", value_parser = commands::parse_trials)]
        trials: usize,

        /// Coincidence rejection threshold for the discriminator
        #[arg(long, default_value_t = photonbit_core::DEFAULT_COINCIDENCE_THRESHOLD)]
        threshold: f64,

        /// Entropy window size in bits
        #[arg(long, default_value_t = photonbit_core::DEFAULT_ENTROPY_WINDOW)]
        window: usize,

        /// Fixed seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Write the post-extraction bitstream as flat text
        #[arg(long)]
        save: Option<PathBuf>,

        /// Write the raw (pre-extraction) bitstream as flat text
        #[arg(long)]
        save_raw: Option<PathBuf>,

        /// Write the full run as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Descriptive statistics for a bitstream: bias, runs, windowed entropy
    Analyze {
        /// Analyze a saved bitstream instead of simulating a fresh one
        #[arg(long)]
        input: Option<PathBuf>,

        /// Trials to simulate when no input file is given
        #[arg(long, default_value = "10000", value_parser = commands::parse_trials)]
        trials: usize,

        /// Fixed seed for the simulated stream
        #[arg(long)]
        seed: Option<u64>,

        /// Entropy window size in bits
        #[arg(long, default_value_t = photonbit_core::DEFAULT_ENTROPY_WINDOW)]
        window: usize,

        /// Write the full analysis as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the randomness test battery with pass/fail and p-values
    Report {
        /// Test a saved bitstream instead of simulating a fresh one
        #[arg(long)]
        input: Option<PathBuf>,

        /// Trials to simulate when no input file is given
        #[arg(long, default_value = "100000", value_parser = commands::parse_trials)]
        trials: usize,

        /// Fixed seed for the simulated stream
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            trials,
            threshold,
            window,
            seed,
            save,
            save_raw,
            output,
        } => commands::run::run(
            trials,
            threshold,
            window,
            seed,
            save.as_deref(),
            save_raw.as_deref(),
            output.as_deref(),
        ),
        Commands::Analyze {
            input,
            trials,
            seed,
            window,
            output,
        } => commands::analyze::run(input.as_deref(), trials, seed, window, output.as_deref()),
        Commands::Report {
            input,
            trials,
            seed,
        } => commands::report::run(input.as_deref(), trials, seed),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
