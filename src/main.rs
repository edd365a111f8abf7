use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use moth_sampler::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use moth_sampler::{run, RunConfig};

/// Draw one recording per hour of day for every AudioMoth device that
/// recorded around the clock.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Source catalogue (CSV).
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Destination of the stratified sample (CSV). Parent directories are
    /// created as needed.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seed for the random draw; a fresh one is picked when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = RunConfig {
        input: cli.input,
        output: cli.output,
        seed: cli.seed,
    };

    match run(&config) {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(text) => println!("{text}"),
                    Err(e) => log::error!("cannot render summary: {e}"),
                }
            }
            for warning in &summary.warnings {
                eprintln!("Warning: {warning}");
            }
            println!("Sampling successful: true");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An error occurred: {e}");
            println!("Sampling successful: false");
            ExitCode::FAILURE
        }
    }
}
