//! Consistency checks for a corpus directory.
//!
//! A corpus of N articles holds exactly N raw-text files and N metadata files
//! numbered 1..=N, and no file in it is empty.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, DatasetError, InconsistencyReason, Result};
use crate::storage::local::{META_SUFFIX, RAW_SUFFIX};

/// Extract the numeric id from a file name by dropping every non-digit.
pub fn id_from_path(path: &Path) -> std::result::Result<usize, DatasetError> {
    let digits: String = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    digits
        .parse()
        .map_err(|_| DatasetError::Inconsistent(InconsistencyReason::MissingId))
}

/// Validate a corpus directory before it is opened for annotation.
pub fn validate_dataset(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(DatasetError::NotFound(path.to_path_buf()).into());
        }
        Err(e) => return Err(AppError::Io(e)),
    };
    if !metadata.is_dir() {
        return Err(DatasetError::NotADirectory(path.to_path_buf()).into());
    }

    let entries = fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    if entries.is_empty() {
        return Err(DatasetError::EmptyDirectory(path.to_path_buf()).into());
    }

    // Empty files are reported before any naming problem.
    for entry in &entries {
        if fs::metadata(entry)?.len() == 0 {
            return Err(inconsistent(InconsistencyReason::EmptyFile));
        }
    }

    let mut meta_ids = Vec::new();
    let mut raw_ids = Vec::new();
    for entry in &entries {
        let name = entry.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if name.ends_with(META_SUFFIX) {
            meta_ids.push(id_from_path(entry)?);
        } else if name.ends_with(RAW_SUFFIX) {
            raw_ids.push(id_from_path(entry)?);
        }
    }

    if !is_contiguous(&mut meta_ids) {
        return Err(inconsistent(InconsistencyReason::MetaNumbering));
    }
    if !is_contiguous(&mut raw_ids) {
        return Err(inconsistent(InconsistencyReason::RawNumbering));
    }
    if meta_ids.len() != raw_ids.len() {
        return Err(inconsistent(InconsistencyReason::UnevenCounts));
    }

    log::debug!(
        "Dataset {} is consistent: {} articles",
        path.display(),
        raw_ids.len()
    );
    Ok(())
}

/// Whether the ids, once sorted, are exactly 1..=len.
fn is_contiguous(ids: &mut [usize]) -> bool {
    ids.sort_unstable();
    ids.iter().enumerate().all(|(idx, id)| *id == idx + 1)
}

fn inconsistent(reason: InconsistencyReason) -> AppError {
    DatasetError::Inconsistent(reason).into()
}
