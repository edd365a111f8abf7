use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::model::Catalogue;
use crate::error::WriteError;

/// Write `catalogue` as CSV to `path`, header first, rows verbatim.
///
/// The parent directory is created if needed. Rows go to a temporary file
/// next to `path` which is renamed into place only once fully flushed, so a
/// failed write never leaves a truncated file behind.
pub fn write_catalogue(path: &Path, catalogue: &Catalogue) -> Result<(), WriteError> {
    let dir = ensure_parent_dir(path)?;

    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    let mut writer = csv::Writer::from_writer(tmp);
    writer.write_record(&catalogue.headers).map_err(csv_err)?;
    for rec in &catalogue.recordings {
        writer.write_record(&rec.row).map_err(csv_err)?;
    }

    let mut tmp = writer
        .into_inner()
        .map_err(|e| io_err(e.into_error()))?;
    tmp.flush().map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::info!("wrote {} rows to {}", catalogue.len(), path.display());
    Ok(())
}

/// Create the directory `path` lives in, returning it. A bare file name
/// resolves to the current directory.
fn ensure_parent_dir(path: &Path) -> Result<PathBuf, WriteError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            Ok(dir.to_path_buf())
        }
        _ => Ok(PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "FileName,AudioMothID,StartDateTime,Duration,FileSize,Site\n\
                       a.wav,05,01.07.2019 13:00,60,48338370,\"North, upper\"\n\
                       b.wav,5,01.07.2019 14:00,60.0,48338370,South\n";

    #[test]
    fn round_trips_rows_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.csv");
        let cat = Catalogue::from_reader(CSV.as_bytes()).unwrap();

        write_catalogue(&path, &cat).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, CSV);
    }

    #[test]
    fn empty_selection_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let cat = Catalogue::from_reader(CSV.as_bytes()).unwrap();

        write_catalogue(&path, &cat.with_recordings(Vec::new())).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "FileName,AudioMothID,StartDateTime,Duration,FileSize,Site\n");
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale contents that are longer than the new file\n".repeat(50)).unwrap();
        let cat = Catalogue::from_reader(CSV.as_bytes()).unwrap();

        write_catalogue(&path, &cat).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
    }

    #[test]
    fn parent_that_is_a_file_is_a_create_dir_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let cat = Catalogue::from_reader(CSV.as_bytes()).unwrap();

        let err = write_catalogue(&blocker.join("out.csv"), &cat).unwrap_err();
        assert!(matches!(err, WriteError::CreateDir { .. }));
    }
}
