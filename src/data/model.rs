use chrono::{NaiveDateTime, Timelike};
use csv::StringRecord;

// ---------------------------------------------------------------------------
// Column names and formats of the AudioMoth catalogue
// ---------------------------------------------------------------------------

pub const DEVICE_COLUMN: &str = "AudioMothID";
pub const START_COLUMN: &str = "StartDateTime";
pub const DURATION_COLUMN: &str = "Duration";
pub const FILE_SIZE_COLUMN: &str = "FileSize";

/// `chrono` format of the `StartDateTime` column, e.g. `01.07.2019 13:00`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Number of hour-of-day strata a device must cover.
pub const HOURS_PER_DAY: usize = 24;

// ---------------------------------------------------------------------------
// Recording – one row of the catalogue
// ---------------------------------------------------------------------------

/// A single audio recording (one row of the source CSV).
///
/// The typed fields are parsed copies of the required columns; `row` is the
/// untouched source row and is what gets written back out.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// Device identifier, verbatim (`"05"` and `"5"` are different devices).
    pub device_id: String,
    pub start: NaiveDateTime,
    pub duration_seconds: f64,
    pub file_size_bytes: f64,
    /// Every column of the source row, in header order.
    pub row: StringRecord,
}

impl Recording {
    /// Hour component of the start timestamp, in `0..24`.
    pub fn hour_of_day(&self) -> u32 {
        self.start.hour()
    }

    pub fn file_size_mb(&self) -> f64 {
        self.file_size_bytes / BYTES_PER_MB
    }
}

// ---------------------------------------------------------------------------
// Catalogue – header plus rows
// ---------------------------------------------------------------------------

/// A loaded catalogue: the header row and all recordings in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    pub headers: StringRecord,
    pub recordings: Vec<Recording>,
}

impl Catalogue {
    /// Same header, different rows. Used to carry the column layout through
    /// each stage.
    pub fn with_recordings(&self, recordings: Vec<Recording>) -> Self {
        Catalogue {
            headers: self.headers.clone(),
            recordings,
        }
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }
}
