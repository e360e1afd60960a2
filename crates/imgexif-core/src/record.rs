use std::path::PathBuf;

use chrono::NaiveDate;

/// Capture date recovered (or not) from a file's metadata container.
/// `Missing` and `Unreadable` both route the file to the no-date bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureDate {
    /// Calendar date taken from a datetime tag.
    Dated(NaiveDate),
    /// Container was readable but held no usable timestamp.
    Missing,
    /// Container could not be decoded.
    Unreadable,
}

impl CaptureDate {
    /// Collapse to the optional calendar date used for routing.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CaptureDate::Dated(date) => Some(*date),
            CaptureDate::Missing | CaptureDate::Unreadable => None,
        }
    }
}

/// One image file under the source directory, paired with its capture date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Location of the file at extraction time.
    pub path: PathBuf,
    /// Outcome of the metadata query.
    pub capture_date: CaptureDate,
}

impl ImageRecord {
    pub fn new(path: PathBuf, capture_date: CaptureDate) -> Self {
        Self { path, capture_date }
    }
}
