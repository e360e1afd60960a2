//! Moves image files into their per-date subdirectories.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;

use crate::record::ImageRecord;

/// Bucket for files whose capture date could not be determined.
pub const NO_DATE_DIR: &str = "nodate";

/// Dated buckets are named like `20230305`.
const DATE_DIR_FORMAT: &str = "%Y%m%d";

/// Subdirectory a record belongs in, relative to the source directory.
pub fn target_directory(root: &Path, date: Option<NaiveDate>) -> PathBuf {
    match date {
        Some(date) => root.join(date.format(DATE_DIR_FORMAT).to_string()),
        None => root.join(NO_DATE_DIR),
    }
}

/// A relocation that could not be carried out.
#[derive(Debug)]
pub enum RelocateError {
    /// The target subdirectory could not be created.
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    /// The target subdirectory exists but does not accept new entries.
    Unwritable { dir: PathBuf },
    /// The rename itself failed.
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for RelocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelocateError::CreateDir { dir, source } => {
                write!(f, "cannot create directory {}: {}", dir.display(), source)
            }
            RelocateError::Unwritable { dir } => {
                write!(f, "directory {} is not writable", dir.display())
            }
            RelocateError::MoveFailed { from, to, source } => {
                write!(
                    f,
                    "cannot move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for RelocateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelocateError::CreateDir { source, .. } => Some(source),
            RelocateError::Unwritable { .. } => None,
            RelocateError::MoveFailed { source, .. } => Some(source),
        }
    }
}

/// Move a record's file into the given subdirectory.
///
/// Creates the subdirectory on first use. If the target name is taken,
/// probes `stem_1.ext`, `stem_2.ext`, ... until a free name is found.
/// Returns the path the file ends up at.
pub fn move_into(record: &ImageRecord, dir: &Path) -> Result<PathBuf, RelocateError> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|err| RelocateError::CreateDir {
            dir: dir.to_path_buf(),
            source: err,
        })?;
        info!("created {}", dir.display());
    }

    let writable = fs::metadata(dir)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false);
    if !writable {
        return Err(RelocateError::Unwritable {
            dir: dir.to_path_buf(),
        });
    }

    let file_name = record
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let destination = next_free_path(dir, &file_name);

    fs::rename(&record.path, &destination).map_err(|err| RelocateError::MoveFailed {
        from: record.path.clone(),
        to: destination.clone(),
        source: err,
    })?;
    Ok(destination)
}

/// First path under `dir` for `file_name` that no existing entry occupies.
///
/// The counter goes before the last extension: `photo.jpg` becomes
/// `photo_1.jpg`, then `photo_2.jpg`. A name without a dot gets the
/// counter appended at the end.
fn next_free_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rfind('.') {
        Some(pos) => file_name.split_at(pos),
        None => (file_name, ""),
    };

    let mut counter: u32 = 1;
    loop {
        let candidate = dir.join(format!("{}_{}{}", stem, counter, ext));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
