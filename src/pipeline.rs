use std::fmt;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{FilterCriteria, RunConfig};
use crate::data::filter::{filter_with_report, FilterReport};
use crate::data::loader::load_catalogue;
use crate::data::model::Catalogue;
use crate::data::sampler::{device_coverage, sample_recordings, DeviceCoverage};
use crate::data::writer::write_catalogue;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// In-memory core: filter + stratified draw
// ---------------------------------------------------------------------------

/// Result of filtering and sampling one catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Sampled rows, with the source catalogue's header.
    pub catalogue: Catalogue,
    pub filter: FilterReport,
    /// Hour coverage of every device that had filtered recordings.
    pub coverage: Vec<DeviceCoverage>,
}

/// Filter `catalogue` with `criteria`, then draw one recording per hour for
/// each device covering the whole day.
pub fn select<R: Rng + ?Sized>(
    catalogue: &Catalogue,
    criteria: &FilterCriteria,
    rng: &mut R,
) -> Selection {
    let (candidates, filter) = filter_with_report(&catalogue.recordings, criteria);
    log::info!(
        "{} of {} recordings pass the quality filter ({} wrong duration, {} wrong size, {} excluded device)",
        filter.retained,
        catalogue.len(),
        filter.wrong_duration,
        filter.wrong_file_size,
        filter.excluded_device
    );

    let coverage = device_coverage(&candidates);
    for dev in &coverage {
        log::debug!(
            "device {}: {} recordings over {} hours",
            dev.device_id,
            dev.recordings,
            dev.hours.len()
        );
    }

    let sampled = sample_recordings(&candidates, rng);
    Selection {
        catalogue: catalogue.with_recordings(sampled),
        filter,
        coverage,
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Non-fatal conditions noticed during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// Nothing was sampled; an empty (header-only) file was still written.
    EmptyResult { candidates: usize, devices: usize },
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::EmptyResult { candidates: 0, .. } => {
                write!(f, "empty sample: no recording passed the quality filter")
            }
            RunWarning::EmptyResult {
                candidates,
                devices,
            } => write!(
                f,
                "empty sample: none of {devices} devices ({candidates} candidate recordings) covers all 24 hours"
            ),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Seed of the random draw, when the run was seeded through [`run`].
    pub seed: Option<u64>,
    pub rows_loaded: usize,
    pub filter: FilterReport,
    pub devices_sampled: Vec<String>,
    pub devices_incomplete: Vec<String>,
    pub rows_written: usize,
    pub warnings: Vec<RunWarning>,
}

impl RunSummary {
    fn new(config: &RunConfig, rows_loaded: usize, selection: &Selection) -> Self {
        let (sampled, incomplete): (Vec<&DeviceCoverage>, Vec<&DeviceCoverage>) =
            selection.coverage.iter().partition(|c| c.is_eligible());

        let mut warnings = Vec::new();
        if selection.catalogue.is_empty() {
            warnings.push(RunWarning::EmptyResult {
                candidates: selection.filter.retained,
                devices: selection.coverage.len(),
            });
        }

        RunSummary {
            input: config.input.clone(),
            output: config.output.clone(),
            seed: config.seed,
            rows_loaded,
            filter: selection.filter,
            devices_sampled: sampled.iter().map(|c| c.device_id.clone()).collect(),
            devices_incomplete: incomplete.iter().map(|c| c.device_id.clone()).collect(),
            rows_written: selection.catalogue.len(),
            warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry-points
// ---------------------------------------------------------------------------

/// Load `config.input`, select with the fixed [`FilterCriteria`], write the
/// sample to `config.output`. Nothing is written if loading fails.
pub fn stratified_sample<R: Rng + ?Sized>(
    config: &RunConfig,
    rng: &mut R,
) -> Result<RunSummary, PipelineError> {
    let catalogue = load_catalogue(&config.input)?;
    let selection = select(&catalogue, &FilterCriteria::default(), rng);
    write_catalogue(&config.output, &selection.catalogue)?;

    let summary = RunSummary::new(config, catalogue.len(), &selection);
    for warning in &summary.warnings {
        log::warn!("{warning}");
    }
    log::info!(
        "sampled {} rows from {} devices ({} devices lacked full coverage)",
        summary.rows_written,
        summary.devices_sampled.len(),
        summary.devices_incomplete.len()
    );
    Ok(summary)
}

/// As [`stratified_sample`] with a `StdRng` seeded from `config.seed`, or
/// from OS entropy when unset. The seed used is recorded in the summary.
pub fn run(config: &RunConfig) -> Result<RunSummary, PipelineError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    log::debug!("sampling with seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut summary = stratified_sample(config, &mut rng)?;
    summary.seed = Some(seed);
    Ok(summary)
}
