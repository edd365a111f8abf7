//! Synthetic AudioMoth catalogues for demos and tests.

use chrono::{Days, NaiveDate};
use csv::StringRecord;
use rand::Rng;

use super::model::{Catalogue, Recording, BYTES_PER_MB, TIMESTAMP_FORMAT};

pub const HEADERS: [&str; 6] = [
    "FileName",
    "AudioMothID",
    "StartDateTime",
    "Duration",
    "FileSize",
    "Site",
];

/// Nominal size of a 60 s recording at the deployment's sample rate.
const NOMINAL_SIZE_MB: f64 = 46.1;
/// Spread of generated sizes around the nominal size; stays inside the
/// quality filter's tolerance.
const SIZE_JITTER_MB: f64 = 0.05;

/// Recording schedule of one simulated device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub device_id: String,
    /// Hours of day with recordings; values outside `0..24` are ignored.
    pub hours: Vec<u32>,
    /// Recordings per listed hour, each on a successive day.
    pub per_hour: usize,
}

impl DeviceProfile {
    pub fn full_day(device_id: impl Into<String>, per_hour: usize) -> Self {
        Self {
            device_id: device_id.into(),
            hours: (0..24).collect(),
            per_hour,
        }
    }

    pub fn partial(device_id: impl Into<String>, hours: impl IntoIterator<Item = u32>) -> Self {
        Self {
            device_id: device_id.into(),
            hours: hours.into_iter().collect(),
            per_hour: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueSpec {
    pub devices: Vec<DeviceProfile>,
    /// First recording day.
    pub start_date: NaiveDate,
    pub site: String,
    /// Extra truncated (30 s) recordings per device, which the quality
    /// filter must drop.
    pub faulty_per_device: usize,
}

impl CatalogueSpec {
    pub fn new(devices: Vec<DeviceProfile>) -> Self {
        Self {
            devices,
            start_date: NaiveDate::from_ymd_opt(2019, 7, 1).unwrap_or_default(),
            site: "Peru".to_string(),
            faulty_per_device: 0,
        }
    }
}

/// Build a catalogue following `spec`. Minutes and file sizes are drawn
/// from `rng`.
pub fn generate<R: Rng + ?Sized>(spec: &CatalogueSpec, rng: &mut R) -> Catalogue {
    let mut recordings = Vec::new();

    for device in &spec.devices {
        for &hour in &device.hours {
            for day in 0..device.per_hour {
                let size_mb = NOMINAL_SIZE_MB + rng.random_range(-SIZE_JITTER_MB..=SIZE_JITTER_MB);
                if let Some(rec) = make_recording(spec, device, day, hour, 60, size_mb, rng) {
                    recordings.push(rec);
                }
            }
        }
        for n in 0..spec.faulty_per_device {
            let hour = rng.random_range(0..24);
            let day = device.per_hour + n;
            if let Some(rec) = make_recording(spec, device, day, hour, 30, NOMINAL_SIZE_MB / 2.0, rng)
            {
                recordings.push(rec);
            }
        }
    }

    Catalogue {
        headers: StringRecord::from(HEADERS.to_vec()),
        recordings,
    }
}

fn make_recording<R: Rng + ?Sized>(
    spec: &CatalogueSpec,
    device: &DeviceProfile,
    day: usize,
    hour: u32,
    duration: u32,
    size_mb: f64,
    rng: &mut R,
) -> Option<Recording> {
    let minute = rng.random_range(0..60);
    let start = spec
        .start_date
        .checked_add_days(Days::new(day as u64))?
        .and_hms_opt(hour, minute, 0);
    let Some(start) = start else {
        log::warn!("device {}: ignoring invalid hour {hour}", device.device_id);
        return None;
    };

    let bytes = (size_mb * BYTES_PER_MB).round();
    let file_name = format!("{}_{}.WAV", device.device_id, start.format("%Y%m%d_%H%M%S"));
    let row = StringRecord::from(vec![
        file_name,
        device.device_id.clone(),
        start.format(TIMESTAMP_FORMAT).to_string(),
        duration.to_string(),
        format!("{bytes:.0}"),
        spec.site.clone(),
    ]);

    Some(Recording {
        device_id: device.device_id.clone(),
        start,
        duration_seconds: f64::from(duration),
        file_size_bytes: bytes,
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterCriteria;
    use crate::data::filter::filter_recordings;
    use crate::data::sampler::device_coverage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_rows_pass_the_quality_filter() {
        let spec = CatalogueSpec::new(vec![
            DeviceProfile::full_day("5", 3),
            DeviceProfile::partial("7", 0..10),
        ]);
        let cat = generate(&spec, &mut StdRng::seed_from_u64(3));
        assert_eq!(cat.len(), 24 * 3 + 10);

        let kept = filter_recordings(&cat.recordings, &FilterCriteria::default());
        assert_eq!(kept.len(), cat.len());

        let coverage = device_coverage(&kept);
        assert!(coverage[0].is_eligible());
        assert!(!coverage[1].is_eligible());
    }

    #[test]
    fn faulty_rows_are_filtered_out() {
        let mut spec = CatalogueSpec::new(vec![DeviceProfile::full_day("5", 1)]);
        spec.faulty_per_device = 4;
        let cat = generate(&spec, &mut StdRng::seed_from_u64(3));
        assert_eq!(cat.len(), 28);

        let kept = filter_recordings(&cat.recordings, &FilterCriteria::default());
        assert_eq!(kept.len(), 24);
    }

    #[test]
    fn rows_reparse_to_the_same_recordings() {
        let spec = CatalogueSpec::new(vec![DeviceProfile::full_day("05", 2)]);
        let cat = generate(&spec, &mut StdRng::seed_from_u64(11));

        let mut buf = Vec::new();
        {
            let mut w = csv::Writer::from_writer(&mut buf);
            w.write_record(&cat.headers).unwrap();
            for rec in &cat.recordings {
                w.write_record(&rec.row).unwrap();
            }
            w.flush().unwrap();
        }
        let reparsed = Catalogue::from_reader(buf.as_slice()).unwrap();
        assert_eq!(reparsed, cat);
    }

    #[test]
    fn invalid_hours_are_skipped() {
        let spec = CatalogueSpec::new(vec![DeviceProfile::partial("5", [1, 24, 99])]);
        let cat = generate(&spec, &mut StdRng::seed_from_u64(0));
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.recordings[0].hour_of_day(), 1);
    }
}
