//! Builders for the tiny image fixtures used across the test suite.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};

/// Write a minimal JPEG whose Exif block holds the given ASCII fields.
pub fn write_jpeg_with_exif(path: &Path, fields: &[(Tag, &str)]) {
    let fields: Vec<Field> = fields
        .iter()
        .map(|(tag, text)| Field {
            tag: *tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![text.as_bytes().to_vec()]),
        })
        .collect();

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut cursor = Cursor::new(Vec::new());
    writer.write(&mut cursor, false).unwrap();

    fs::write(path, wrap_in_jpeg(&cursor.into_inner())).unwrap();
}

/// Write a syntactically valid JPEG that carries no Exif block at all.
pub fn write_jpeg_without_exif(path: &Path) {
    fs::write(path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
}

/// Wrap a TIFF blob in a JPEG shell as an Exif APP1 segment.
fn wrap_in_jpeg(tiff: &[u8]) -> Vec<u8> {
    let payload_len = (tiff.len() + 8) as u16;
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&payload_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
