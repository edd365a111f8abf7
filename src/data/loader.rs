use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;

use super::model::{
    Catalogue, Recording, DEVICE_COLUMN, DURATION_COLUMN, FILE_SIZE_COLUMN, START_COLUMN,
    TIMESTAMP_FORMAT,
};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an AudioMoth catalogue from a CSV file with a header row.
///
/// Required columns: `AudioMothID`, `StartDateTime`, `Duration`, `FileSize`.
/// Any other column is carried through untouched. A single unparseable row
/// fails the whole load.
pub fn load_catalogue(path: &Path) -> Result<Catalogue, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalogue = Catalogue::from_reader(file)?;
    log::info!(
        "loaded {} recordings ({} columns) from {}",
        catalogue.len(),
        catalogue.headers.len(),
        path.display()
    );
    Ok(catalogue)
}

impl Catalogue {
    /// Parse a catalogue from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::locate(&headers)?;

        let mut recordings = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let row = result?;
            recordings.push(columns.parse_row(row, i + 1)?);
        }

        Ok(Catalogue {
            headers,
            recordings,
        })
    }
}

// ---------------------------------------------------------------------------
// Column lookup and row parsing
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    device: usize,
    start: usize,
    duration: usize,
    file_size: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            device: find(DEVICE_COLUMN)?,
            start: find(START_COLUMN)?,
            duration: find(DURATION_COLUMN)?,
            file_size: find(FILE_SIZE_COLUMN)?,
        })
    }

    /// `row_no` is 1-based and counts data rows only (header excluded).
    fn parse_row(&self, row: StringRecord, row_no: usize) -> Result<Recording, LoadError> {
        // The csv reader rejects ragged rows, so every index is in bounds.
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let device_id = field(self.device).to_string();

        let raw_start = field(self.start);
        let start = NaiveDateTime::parse_from_str(raw_start.trim(), TIMESTAMP_FORMAT).map_err(
            |_| LoadError::InvalidTimestamp {
                row: row_no,
                value: raw_start.to_string(),
            },
        )?;

        let duration_seconds = parse_number(field(self.duration), row_no, DURATION_COLUMN)?;
        let file_size_bytes = parse_number(field(self.file_size), row_no, FILE_SIZE_COLUMN)?;

        Ok(Recording {
            device_id,
            start,
            duration_seconds,
            file_size_bytes,
            row,
        })
    }
}

fn parse_number(s: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidNumber {
            row,
            column,
            value: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "FileName,AudioMothID,StartDateTime,Duration,FileSize,Site\n";

    fn parse(body: &str) -> Result<Catalogue, LoadError> {
        Catalogue::from_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn parses_required_and_keeps_passthrough() {
        let cat = parse("a.wav,05,01.07.2019 13:00,60,48338370,North\n").unwrap();
        assert_eq!(cat.len(), 1);

        let rec = &cat.recordings[0];
        assert_eq!(rec.device_id, "05");
        assert_eq!(rec.hour_of_day(), 13);
        assert_eq!(rec.duration_seconds, 60.0);
        assert_eq!(rec.file_size_bytes, 48_338_370.0);
        assert_eq!(
            rec.row,
            StringRecord::from(vec!["a.wav", "05", "01.07.2019 13:00", "60", "48338370", "North"])
        );
        assert_eq!(cat.headers.len(), 6);
    }

    #[test]
    fn accepts_float_formatted_numbers() {
        let cat = parse("a.wav,5,01.07.2019 00:15,60.0,4.8338370e7,North\n").unwrap();
        assert_eq!(cat.recordings[0].duration_seconds, 60.0);
        assert_eq!(cat.recordings[0].file_size_bytes, 48_338_370.0);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = Catalogue::from_reader("AudioMothID,StartDateTime,Duration\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("FileSize")));
    }

    #[test]
    fn malformed_timestamp_fails_the_load() {
        let err = parse(
            "a.wav,5,01.07.2019 13:00,60,1,North\n\
             b.wav,5,2019-07-01 14:00,60,1,North\n",
        )
        .unwrap_err();
        match err {
            LoadError::InvalidTimestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "2019-07-01 14:00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_and_empty_sizes_fail() {
        let err = parse("a.wav,5,01.07.2019 13:00,sixty,1,North\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidNumber { column: "Duration", row: 1, .. }
        ));

        let err = parse("a.wav,5,01.07.2019 13:00,60,,North\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { column: "FileSize", .. }));

        let err = parse("a.wav,5,01.07.2019 13:00,NaN,1,North\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { column: "Duration", .. }));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let err = parse("a.wav,5,01.07.2019 13:00,60\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_catalogue(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
