//! Fixed-zone helpers for date bounds and month buckets.
//!
//! Timestamps are stored in UTC. Calendar questions ("which day", "which
//! month") are answered in one fixed offset chosen by the caller, so that a
//! post published at 23:30 local time is not counted in the next day.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeDelta, Utc};

use crate::error::PostsiftError;

/// The UTC offset, as a [`FixedOffset`].
pub fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parses an offset such as `+00:00`, `-03:00`, `-0300`, `+5` or `Z`.
///
/// # Example
///
/// ```
/// use postsift::core::zone::parse_utc_offset;
///
/// let art = parse_utc_offset("-03:00")?;
/// assert_eq!(art.local_minus_utc(), -3 * 3600);
/// # Ok::<(), postsift::PostsiftError>(())
/// ```
pub fn parse_utc_offset(input: &str) -> Result<FixedOffset, PostsiftError> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }

    let err = || PostsiftError::invalid_offset(input);

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(err()),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().map_err(|_| err())?;
    let minutes: i32 = minutes.parse().map_err(|_| err())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(err());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(err)
}

/// Interprets a wall-clock time in `zone` and returns the UTC instant.
///
/// Returns `None` when the instant falls outside the range chrono can
/// represent.
pub fn local_to_utc(naive: NaiveDateTime, zone: FixedOffset) -> Option<DateTime<Utc>> {
    naive
        .checked_sub_signed(TimeDelta::seconds(i64::from(zone.local_minus_utc())))
        .map(|utc| utc.and_utc())
}

/// First instant of `date` in `zone`, if representable.
pub fn start_of_day(date: NaiveDate, zone: FixedOffset) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_time(chrono::NaiveTime::MIN), zone)
}

/// Calendar month of `ts` in `zone`, as `YYYY-MM`.
pub fn month_label(ts: DateTime<Utc>, zone: FixedOffset) -> String {
    let local = ts.with_timezone(&zone);
    format!("{:04}-{:02}", local.year(), local.month())
}

/// Serde adapter storing a [`FixedOffset`] as seconds east of UTC.
///
/// ```
/// # use chrono::FixedOffset;
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Settings {
///     #[serde(with = "postsift::core::zone::offset_seconds")]
///     zone: FixedOffset,
/// }
/// ```
pub mod offset_seconds {
    use chrono::FixedOffset;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(zone: &FixedOffset, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(zone.local_minus_utc())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FixedOffset, D::Error> {
        let secs = i32::deserialize(deserializer)?;
        FixedOffset::east_opt(secs)
            .ok_or_else(|| de::Error::custom(format!("UTC offset out of range: {secs}s")))
    }
}
