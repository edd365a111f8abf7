use std::collections::BTreeSet;

use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use super::model::{Recording, HOURS_PER_DAY};

// ---------------------------------------------------------------------------
// Device coverage
// ---------------------------------------------------------------------------

/// Which hours of the day a device has candidate recordings for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCoverage {
    pub device_id: String,
    pub recordings: usize,
    pub hours: BTreeSet<u32>,
}

impl DeviceCoverage {
    /// A device is sampled only when every hour `0..24` is covered.
    pub fn is_eligible(&self) -> bool {
        self.hours.len() == HOURS_PER_DAY
    }

    pub fn missing_hours(&self) -> Vec<u32> {
        (0..HOURS_PER_DAY as u32)
            .filter(|h| !self.hours.contains(h))
            .collect()
    }
}

/// Bucket recordings by exact device id, devices in order of first appearance.
fn group_by_device(records: &[Recording]) -> IndexMap<&str, Vec<&Recording>> {
    let mut groups: IndexMap<&str, Vec<&Recording>> = IndexMap::new();
    for rec in records {
        groups.entry(rec.device_id.as_str()).or_default().push(rec);
    }
    groups
}

/// Per-device hour coverage, devices in order of first appearance.
pub fn device_coverage(records: &[Recording]) -> Vec<DeviceCoverage> {
    group_by_device(records)
        .into_iter()
        .map(|(device_id, bucket)| DeviceCoverage {
            device_id: device_id.to_string(),
            recordings: bucket.len(),
            hours: bucket.iter().map(|r| r.hour_of_day()).collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Stratified draw
// ---------------------------------------------------------------------------

/// Draw one recording per hour of day for every device covering all 24 hours.
///
/// Devices are visited in order of first appearance and, within a device,
/// hours ascend from 0 to 23, so the output is `24 × eligible devices` rows
/// and is reproducible for a given `rng` state. Devices missing any hour
/// contribute nothing. Ties within an hour are broken uniformly at random.
pub fn sample_recordings<R: Rng + ?Sized>(records: &[Recording], rng: &mut R) -> Vec<Recording> {
    let mut sampled = Vec::new();

    for (device_id, bucket) in group_by_device(records) {
        let mut by_hour: [Vec<&Recording>; HOURS_PER_DAY] = std::array::from_fn(|_| Vec::new());
        for rec in bucket {
            by_hour[rec.hour_of_day() as usize].push(rec);
        }

        let covered = by_hour.iter().filter(|c| !c.is_empty()).count();
        if covered < HOURS_PER_DAY {
            log::debug!("skipping device {device_id}: only {covered}/{HOURS_PER_DAY} hours covered");
            continue;
        }

        for candidates in &by_hour {
            if let Some(pick) = candidates.choose(&mut *rng) {
                sampled.push((*pick).clone());
            }
        }
    }

    sampled
}
