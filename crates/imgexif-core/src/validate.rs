//! Pre-flight checks on the source directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Why the source directory cannot be organized.
#[derive(Debug)]
pub enum ValidateError {
    /// The path does not exist.
    NotFound { dir: PathBuf },
    /// The path exists but is not a directory.
    NotADirectory { dir: PathBuf },
    /// The directory cannot be listed.
    NotReadable {
        dir: PathBuf,
        source: std::io::Error,
    },
    /// The directory does not accept new entries.
    NotWritable { dir: PathBuf },
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateError::NotFound { dir } => {
                write!(f, "directory does not exist: {}", dir.display())
            }
            ValidateError::NotADirectory { dir } => {
                write!(f, "not a directory: {}", dir.display())
            }
            ValidateError::NotReadable { dir, .. } => {
                write!(f, "directory is not readable: {}", dir.display())
            }
            ValidateError::NotWritable { dir } => {
                write!(f, "directory is not writable: {}", dir.display())
            }
        }
    }
}

impl std::error::Error for ValidateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidateError::NotReadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Check that `dir` exists, is a directory, and is readable and writable.
/// Runs before any file is touched.
pub fn validate_source_dir(dir: &Path) -> Result<(), ValidateError> {
    let meta = match fs::metadata(dir) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidateError::NotFound {
                dir: dir.to_path_buf(),
            });
        }
        Err(err) => {
            return Err(ValidateError::NotReadable {
                dir: dir.to_path_buf(),
                source: err,
            });
        }
    };

    if !meta.is_dir() {
        return Err(ValidateError::NotADirectory {
            dir: dir.to_path_buf(),
        });
    }

    fs::read_dir(dir).map_err(|err| ValidateError::NotReadable {
        dir: dir.to_path_buf(),
        source: err,
    })?;

    if meta.permissions().readonly() {
        return Err(ValidateError::NotWritable {
            dir: dir.to_path_buf(),
        });
    }

    Ok(())
}
