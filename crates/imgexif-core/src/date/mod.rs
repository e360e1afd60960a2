//! Capture-date extraction from image metadata.

pub mod exif;

use std::path::Path;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use log::{debug, warn};

use crate::record::{CaptureDate, ImageRecord};

/// A capture timestamp as recorded in the metadata container. Most cameras
/// write wall-clock time with no zone; newer ones add an offset companion
/// tag that pins the moment on the UTC timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Wall-clock time with no known zone.
    Naive(NaiveDateTime),
    /// Zone-qualified moment.
    Instant(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Reduce to the calendar date used for grouping. Naive times are taken
    /// at face value; instants are converted into `tz` first.
    pub fn to_calendar_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        match self {
            Timestamp::Naive(dt) => dt.date(),
            Timestamp::Instant(dt) => dt.with_timezone(tz).date_naive(),
        }
    }
}

/// Reads capture dates out of image files.
///
/// Generic over the timezone used to localize zone-qualified timestamps;
/// defaults to the system zone.
#[derive(Debug, Clone)]
pub struct MetadataExtractor<Tz: TimeZone = Local> {
    timezone: Tz,
}

impl MetadataExtractor<Local> {
    pub fn new() -> Self {
        Self { timezone: Local }
    }
}

impl Default for MetadataExtractor<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> MetadataExtractor<Tz> {
    /// Use a fixed zone instead of the system one.
    pub fn with_timezone<Tz2: TimeZone>(self, timezone: Tz2) -> MetadataExtractor<Tz2> {
        MetadataExtractor { timezone }
    }

    /// Query one file and pair it with the outcome. Extraction failures are
    /// recorded, never propagated; a file whose metadata cannot be decoded
    /// still gets organized, just without a date.
    pub fn extract(&self, path: &Path) -> ImageRecord {
        let capture_date = match exif::read_timestamp(path) {
            Ok(Some(timestamp)) => {
                let date = timestamp.to_calendar_date(&self.timezone);
                debug!("{}: capture date {}", path.display(), date);
                CaptureDate::Dated(date)
            }
            Ok(None) => {
                debug!("{}: no capture date in metadata", path.display());
                CaptureDate::Missing
            }
            Err(err) => {
                warn!("{}: unreadable metadata: {}", path.display(), err);
                CaptureDate::Unreadable
            }
        };
        ImageRecord::new(path.to_path_buf(), capture_date)
    }
}

#[cfg(test)]
mod tests {
    use super::{MetadataExtractor, Timestamp};
    use crate::record::CaptureDate;
    use crate::testutil;
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
    use exif::Tag;
    use tempfile::tempdir;

    #[test]
    fn test_naive_calendar_date() {
        let dt = NaiveDateTime::parse_from_str("2023-03-05 23:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let ts = Timestamp::Naive(dt);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(ts.to_calendar_date(&tokyo), dt.date());
    }

    #[test]
    fn test_instant_localized() {
        // 23:30 at UTC-5 is already March 6 in Tokyo.
        let dt = NaiveDateTime::parse_from_str("2023-03-05 23:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_local_timezone(FixedOffset::west_opt(5 * 3600).unwrap())
            .unwrap();
        let ts = Timestamp::Instant(dt);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(
            ts.to_calendar_date(&tokyo),
            NaiveDate::from_ymd_opt(2023, 3, 6).unwrap()
        );
    }

    #[test]
    fn test_extract_classification() {
        let dir = tempdir().unwrap();
        let extractor = MetadataExtractor::new();

        let dated = dir.path().join("dated.jpg");
        testutil::write_jpeg_with_exif(&dated, &[(Tag::DateTimeOriginal, "2023:03:05 10:20:30")]);
        let missing = dir.path().join("missing.jpg");
        testutil::write_jpeg_without_exif(&missing);
        let unreadable = dir.path().join("unreadable.jpg");
        std::fs::write(&unreadable, b"not an image").unwrap();

        assert_eq!(
            extractor.extract(&dated).capture_date,
            CaptureDate::Dated(NaiveDate::from_ymd_opt(2023, 3, 5).unwrap())
        );
        assert_eq!(extractor.extract(&missing).capture_date, CaptureDate::Missing);
        assert_eq!(
            extractor.extract(&unreadable).capture_date,
            CaptureDate::Unreadable
        );
    }
}
