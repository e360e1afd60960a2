//! Core engine for sorting photos into per-capture-date directories:
//! `photo.jpg` taken on 2023-03-05 moves to `20230305/photo.jpg`, files
//! without a recoverable date move to `nodate/`.

pub mod date;
pub mod mover;
pub mod record;
pub mod validate;

#[cfg(test)]
mod testutil;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use log::{debug, info, warn};

pub use date::{MetadataExtractor, Timestamp};
pub use mover::{RelocateError, NO_DATE_DIR};
pub use record::{CaptureDate, ImageRecord};
pub use validate::{validate_source_dir, ValidateError};

/// Counters for one organizer run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeReport {
    /// Files moved into a subdirectory.
    pub relocated: u64,
    /// Files that could not be moved and stay where they were.
    pub failed: u64,
    /// Files routed to the no-date bucket because no timestamp was found.
    pub undated: u64,
    /// Files routed to the no-date bucket because their metadata could
    /// not be decoded.
    pub unreadable: u64,
}

/// Sorts the image files of one directory into per-date subdirectories.
///
/// Generic over the timezone used to localize zone-qualified capture
/// timestamps; defaults to the system zone.
#[derive(Debug, Clone)]
pub struct Organizer<Tz: TimeZone = Local> {
    root: PathBuf,
    extractor: MetadataExtractor<Tz>,
}

impl Organizer<Local> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extractor: MetadataExtractor::new(),
        }
    }
}

impl<Tz: TimeZone> Organizer<Tz> {
    /// Localize capture instants in a fixed zone instead of the system one.
    pub fn with_timezone<Tz2: TimeZone>(self, timezone: Tz2) -> Organizer<Tz2> {
        Organizer {
            root: self.root,
            extractor: self.extractor.with_timezone(timezone),
        }
    }

    /// Organize every image file directly under the source directory.
    ///
    /// Per-file problems are counted and logged, not propagated; only a
    /// failure to list the directory itself aborts the run.
    pub fn run(&self) -> Result<OrganizeReport> {
        let candidates = self.scan_candidates()?;
        info!(
            "found {} image files under {}",
            candidates.len(),
            self.root.display()
        );

        let report = candidates
            .into_iter()
            .map(|path| self.extractor.extract(&path))
            .fold(OrganizeReport::default(), |report, record| {
                self.organize_one(report, record)
            });
        Ok(report)
    }

    /// Snapshot of the image files to process, taken before any move;
    /// entries created by the moves themselves are never candidates.
    fn scan_candidates(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("cannot list {}", self.root.display()))?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {}", self.root.display(), err);
                    continue;
                }
            };
            let path = entry.path();
            if !has_jpeg_extension(&path) {
                continue;
            }
            if !path.is_file() {
                debug!("{}: not a regular file, skipped", path.display());
                continue;
            }
            candidates.push(path);
        }
        candidates.sort();
        Ok(candidates)
    }

    fn organize_one(&self, mut report: OrganizeReport, record: ImageRecord) -> OrganizeReport {
        let dir = mover::target_directory(&self.root, record.capture_date.date());
        match mover::move_into(&record, &dir) {
            Ok(destination) => {
                info!("moved {} -> {}", record.path.display(), destination.display());
                report.relocated += 1;
                match record.capture_date {
                    CaptureDate::Dated(_) => {}
                    CaptureDate::Missing => report.undated += 1,
                    CaptureDate::Unreadable => report.unreadable += 1,
                }
            }
            Err(err) => {
                warn!("{}: {}", record.path.display(), err);
                report.failed += 1;
            }
        }
        report
    }
}

/// True for `.jpg` and `.jpeg` in any letter case.
fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}
