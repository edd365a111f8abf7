use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "docs/Peru_2019_AudioMoth_Data_Full.csv";
pub const DEFAULT_OUTPUT: &str = "docs/Peru_2019_Stratified_Sample.csv";

/// Devices known to have misbehaved in the field.
pub const EXCLUDED_DEVICES: &[&str] = &["21", "19", "8", "28"];

/// Quality thresholds a recording must meet to be a sampling candidate.
///
/// These are fixed properties of the deployment; the pipeline always uses
/// [`FilterCriteria::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub duration_seconds: f64,
    pub target_size_mb: f64,
    /// Inclusive: `|size - target| <= tolerance` passes.
    pub size_tolerance_mb: f64,
    pub excluded_devices: &'static [&'static str],
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            duration_seconds: 60.0,
            target_size_mb: 46.1,
            size_tolerance_mb: 0.1,
            excluded_devices: EXCLUDED_DEVICES,
        }
    }
}

/// Where to read from, where to write to, and how to seed the draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// `None` lets the caller pick a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
        }
    }
}
