//! Lenient timestamp parsing for archive cells.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::core::zone::{local_to_utc, start_of_day};

/// Formats with an explicit offset.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Wall-clock formats, interpreted in the dataset zone.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parses a timestamp cell into UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f][±HH:MM]`, `YYYY-MM-DD HH:MM`,
/// `DD/MM/YYYY HH:MM[:SS]` and bare `YYYY-MM-DD` (start of day). Values
/// without an offset are read in `zone`. Anything else, including an empty
/// cell, yields `None`.
///
/// # Example
///
/// ```
/// use postsift::dataset::parse_timestamp;
/// use postsift::core::zone::{parse_utc_offset, utc};
///
/// # fn main() -> postsift::Result<()> {
/// let art = parse_utc_offset("-03:00")?;
/// let ts = parse_timestamp("2023-12-11 09:00:00", art).unwrap();
/// assert_eq!(ts.to_rfc3339(), "2023-12-11T12:00:00+00:00");
///
/// assert!(parse_timestamp("ayer", utc()).is_none());
/// # Ok(())
/// # }
/// ```
pub fn parse_timestamp(raw: &str, zone: FixedOffset) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_utc());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.to_utc());
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_utc(naive, zone);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| start_of_day(date, zone))
}
