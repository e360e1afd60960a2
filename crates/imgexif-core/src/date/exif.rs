use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{FixedOffset, NaiveDateTime};
use exif::{Error as ExifError, Field, In, Reader, Tag, Value};

use crate::date::Timestamp;

/// Datetime tags in priority order, each with its Exif 2.31 offset
/// companion. The first two live in the camera sub-IFD, the last in the
/// primary IFD.
const DATE_TAGS: &[(Tag, Tag)] = &[
    (Tag::DateTimeOriginal, Tag::OffsetTimeOriginal),
    (Tag::DateTimeDigitized, Tag::OffsetTimeDigitized),
    (Tag::DateTime, Tag::OffsetTime),
];

/// Read the capture timestamp from a file's metadata container.
///
/// `Ok(None)` means the container was readable but carried no usable
/// datetime tag; a file without any Exif block counts as that too. `Err`
/// means the container itself could not be decoded.
pub fn read_timestamp(path: &Path) -> anyhow::Result<Option<Timestamp>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(ExifError::NotFound(_)) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    for (datetime_tag, offset_tag) in DATE_TAGS {
        let Some(field) = exif.get_field(*datetime_tag, In::PRIMARY) else {
            continue;
        };
        let Some(naive) = parse_exif_datetime(&field.display_value().to_string()) else {
            continue;
        };
        let offset = exif
            .get_field(*offset_tag, In::PRIMARY)
            .and_then(parse_utc_offset);
        let timestamp = match offset.and_then(|o| naive.and_local_timezone(o).single()) {
            Some(instant) => Timestamp::Instant(instant),
            None => Timestamp::Naive(naive),
        };
        return Ok(Some(timestamp));
    }

    Ok(None)
}

/// Parse an Exif datetime display string such as "2023:03:05 10:20:30".
/// Separators vary between cameras; normalize them all to `:`.
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let cleaned = s
        .trim()
        .trim_matches('"')
        .replace('-', ":")
        .replace('/', ":")
        .replace('\\', ":")
        .replace('.', ":");

    if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }

    // Date-only values fall back to midnight.
    if let Ok(d) = chrono::NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d") {
        return Some(d.and_hms_opt(0, 0, 0)?);
    }

    None
}

/// Parse an offset companion value such as "+09:00" into a fixed offset.
fn parse_utc_offset(field: &Field) -> Option<FixedOffset> {
    let Value::Ascii(ref text) = field.value else {
        return None;
    };
    let raw = std::str::from_utf8(text.first()?).ok()?;
    raw.trim_matches(char::from(0)).trim().parse::<FixedOffset>().ok()
}
