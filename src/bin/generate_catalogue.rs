use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use moth_sampler::data::synthetic::{generate, CatalogueSpec, DeviceProfile};
use moth_sampler::data::writer::write_catalogue;

/// Write a synthetic AudioMoth catalogue for trying out the sampler.
#[derive(Debug, Parser)]
#[command(about)]
struct Args {
    #[arg(long, default_value = "sample_catalogue.csv")]
    output: PathBuf,

    /// Devices recording around the clock.
    #[arg(long, value_delimiter = ',', default_values_t = ["1".to_string(), "5".to_string(), "21".to_string()])]
    devices: Vec<String>,

    /// Devices recording only between 06:00 and 15:59.
    #[arg(long, value_delimiter = ',', default_values_t = ["7".to_string()])]
    incomplete: Vec<String>,

    /// Recordings per device and hour.
    #[arg(long, default_value_t = 3)]
    per_hour: usize,

    /// Truncated recordings per device.
    #[arg(long, default_value_t = 2)]
    faulty: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut devices: Vec<DeviceProfile> = args
        .devices
        .iter()
        .map(|id| DeviceProfile::full_day(id.as_str(), args.per_hour))
        .collect();
    devices.extend(
        args.incomplete
            .iter()
            .map(|id| DeviceProfile::partial(id.as_str(), 6..16)),
    );

    let mut spec = CatalogueSpec::new(devices);
    spec.faulty_per_device = args.faulty;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let catalogue = generate(&spec, &mut rng);
    write_catalogue(&args.output, &catalogue)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} recordings from {} devices to {}",
        catalogue.len(),
        spec.devices.len(),
        args.output.display()
    );
    Ok(())
}
