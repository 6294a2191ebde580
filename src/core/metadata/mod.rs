//! # Metadata Module
//!
//! Extracts the capture timestamp embedded in media files.
//!
//! ## Lookup Order
//! - `DateTimeOriginal` (when the shutter was pressed)
//! - `DateTime` (last write by the camera or editor)
//!
//! A file that opens but has no usable timestamp yields [`CaptureTime::Absent`]
//! rather than an error. Screenshots, exported images and non-photo files
//! routinely lack this metadata. Only failures to open or read the file are
//! reported as [`TimestampError`].

#[doc(hidden)]
pub mod fixture;

use crate::error::TimestampError;
use chrono::{NaiveDate, NaiveDateTime};
use exif::{Exif, In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Seek};
use std::path::Path;

/// Tags consulted for the capture time, highest priority first
const CAPTURE_TAGS: [Tag; 2] = [Tag::DateTimeOriginal, Tag::DateTime];

/// Outcome of a capture-time lookup on a readable file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureTime {
    /// Wall-clock time recorded by the device
    Found(NaiveDateTime),
    /// The file has no usable capture time
    Absent(Absence),
}

impl CaptureTime {
    pub fn found(&self) -> Option<NaiveDateTime> {
        match self {
            CaptureTime::Found(t) => Some(*t),
            CaptureTime::Absent(_) => None,
        }
    }
}

/// Why a readable file has no capture time
///
/// True absence and corrupt metadata are kept apart even though both are
/// currently skipped the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Absence {
    /// The container carries no metadata block at all
    NoMetadata,
    /// A metadata block is present but could not be decoded
    Undecodable(String),
    /// Metadata decoded but none of the timestamp tags are present
    MissingTag,
    /// A timestamp tag is present but its value is not a valid date
    InvalidValue(String),
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::NoMetadata => write!(f, "no embedded metadata"),
            Absence::Undecodable(reason) => write!(f, "metadata could not be decoded ({})", reason),
            Absence::MissingTag => write!(f, "metadata has no capture time"),
            Absence::InvalidValue(value) => write!(f, "capture time {:?} is not a valid date", value),
        }
    }
}

/// Trait for capture-time extractors
///
/// Implement this trait to read timestamps from other metadata formats
/// (or to stub them in tests).
pub trait TimestampExtractor: Send + Sync {
    /// Look up the capture time of the file at `path`
    fn extract_capture_time(&self, path: &Path) -> Result<CaptureTime, TimestampError>;
}

/// Reads capture times from EXIF metadata using kamadak-exif
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTimestampExtractor;

impl ExifTimestampExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Decode EXIF from an already-open container and read its capture time.
    ///
    /// Returns an I/O error only for genuine read failures; a truncated or
    /// unrecognised container is reported as [`Absence::Undecodable`].
    pub fn extract_from_reader<R: BufRead + Seek>(
        &self,
        reader: &mut R,
    ) -> std::io::Result<CaptureTime> {
        match Reader::new().read_from_container(reader) {
            Ok(exif) => Ok(capture_time(&exif)),
            Err(exif::Error::NotFound(_)) => Ok(CaptureTime::Absent(Absence::NoMetadata)),
            Err(exif::Error::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => Ok(
                CaptureTime::Absent(Absence::Undecodable("unexpected end of file".to_string())),
            ),
            Err(exif::Error::Io(e)) => Err(e),
            Err(e) => Ok(CaptureTime::Absent(Absence::Undecodable(e.to_string()))),
        }
    }
}

impl TimestampExtractor for ExifTimestampExtractor {
    fn extract_capture_time(&self, path: &Path) -> Result<CaptureTime, TimestampError> {
        let file = File::open(path).map_err(|source| TimestampError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        self.extract_from_reader(&mut reader)
            .map_err(|source| TimestampError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Read the capture time out of decoded EXIF fields
pub fn capture_time(exif: &Exif) -> CaptureTime {
    let mut invalid = None;

    for tag in CAPTURE_TAGS {
        let Some(field) = exif.get_field(tag, In::PRIMARY) else {
            continue;
        };

        let Value::Ascii(ref values) = field.value else {
            invalid.get_or_insert_with(|| field.display_value().to_string());
            continue;
        };

        match values.first().and_then(|bytes| parse_exif_datetime(bytes)) {
            Some(datetime) => return CaptureTime::Found(datetime),
            None => {
                invalid.get_or_insert_with(|| field.display_value().to_string());
            }
        }
    }

    match invalid {
        Some(value) => CaptureTime::Absent(Absence::InvalidValue(value)),
        None => CaptureTime::Absent(Absence::MissingTag),
    }
}

/// Parse an EXIF date/time value.
///
/// The standard form is `YYYY:MM:DD HH:MM:SS`; some writers use dashes in
/// the date part. All-zero and blank placeholder values are rejected.
pub fn parse_exif_datetime(bytes: &[u8]) -> Option<NaiveDateTime> {
    if let Ok(dt) = exif::DateTime::from_ascii(bytes) {
        return NaiveDate::from_ymd_opt(dt.year.into(), dt.month.into(), dt.day.into())?
            .and_hms_opt(dt.hour.into(), dt.minute.into(), dt.second.into());
    }

    let text = std::str::from_utf8(bytes).ok()?;
    let text = text.trim_matches(|c: char| c == '\0' || c == '"' || c.is_whitespace());

    ["%Y-%m-%d %H:%M:%S", "%Y:%m:%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
