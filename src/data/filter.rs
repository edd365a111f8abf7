use serde::Serialize;

use super::model::Recording;
use crate::config::FilterCriteria;

// ---------------------------------------------------------------------------
// Rejection reasons
// ---------------------------------------------------------------------------

/// The first quality predicate a recording fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Duration,
    FileSize,
    ExcludedDevice,
}

/// Per-reason counts of recordings dropped by the filter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub retained: usize,
    pub wrong_duration: usize,
    pub wrong_file_size: usize,
    pub excluded_device: usize,
}

impl FilterReport {
    pub fn rejected(&self) -> usize {
        self.wrong_duration + self.wrong_file_size + self.excluded_device
    }

    fn count(&mut self, rejection: Option<Rejection>) {
        match rejection {
            None => self.retained += 1,
            Some(Rejection::Duration) => self.wrong_duration += 1,
            Some(Rejection::FileSize) => self.wrong_file_size += 1,
            Some(Rejection::ExcludedDevice) => self.excluded_device += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Slack absorbing binary representation error in the megabyte comparison,
/// so that e.g. 46.2 MB sits on the inclusive boundary of 46.1 ± 0.1.
const TOLERANCE_SLACK_MB: f64 = 1e-9;

impl FilterCriteria {
    /// Return the first predicate `rec` violates, or `None` if it passes all.
    ///
    /// A recording passes when:
    /// * its duration is exactly the required number of seconds
    /// * its size in MB is within the inclusive tolerance of the target
    /// * its device id (compared as text) is not excluded
    pub fn rejection(&self, rec: &Recording) -> Option<Rejection> {
        if rec.duration_seconds != self.duration_seconds {
            return Some(Rejection::Duration);
        }
        let diff = (rec.file_size_mb() - self.target_size_mb).abs();
        if diff > self.size_tolerance_mb + TOLERANCE_SLACK_MB {
            return Some(Rejection::FileSize);
        }
        if self.excluded_devices.iter().any(|d| *d == rec.device_id) {
            return Some(Rejection::ExcludedDevice);
        }
        None
    }

    pub fn accepts(&self, rec: &Recording) -> bool {
        self.rejection(rec).is_none()
    }
}

// ---------------------------------------------------------------------------
// Filter stage
// ---------------------------------------------------------------------------

/// Keep the recordings passing every predicate, in input order.
pub fn filter_recordings(records: &[Recording], criteria: &FilterCriteria) -> Vec<Recording> {
    filter_with_report(records, criteria).0
}

/// As [`filter_recordings`], also counting why rows were dropped.
pub fn filter_with_report(
    records: &[Recording],
    criteria: &FilterCriteria,
) -> (Vec<Recording>, FilterReport) {
    let mut report = FilterReport::default();
    let kept = records
        .iter()
        .filter(|rec| {
            let rejection = criteria.rejection(rec);
            if let Some(reason) = rejection {
                log::trace!(
                    "dropping device {} at {}: {reason:?}",
                    rec.device_id,
                    rec.start
                );
            }
            report.count(rejection);
            rejection.is_none()
        })
        .cloned()
        .collect();
    (kept, report)
}
