//! Monthly volume counts and filter statistics.
//!
//! [`monthly_volume`] produces the series behind "posts per month" and
//! "reposts per month" views: one row per calendar month that has at least
//! one dated post, in ascending order.

use std::collections::BTreeMap;

use chrono::FixedOffset;
use serde::Serialize;

use super::zone::month_label;
use crate::Post;
use crate::post::MessageType;

/// Post counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyVolume {
    /// Month as `YYYY-MM`.
    pub month: String,
    /// Number of original posts (`T`).
    pub originals: usize,
    /// Number of reposts (`R`).
    pub reposts: usize,
}

impl MonthlyVolume {
    pub fn total(&self) -> usize {
        self.originals + self.reposts
    }

    /// Count for one message type.
    pub fn count(&self, message_type: MessageType) -> usize {
        match message_type {
            MessageType::Original => self.originals,
            MessageType::Repost => self.reposts,
        }
    }
}

/// Groups dated posts by month (in `zone`) and counts each message type.
///
/// Posts without a timestamp are not counted.
///
/// # Example
///
/// ```
/// use postsift::core::stats::monthly_volume;
/// use postsift::core::zone::utc;
/// use postsift::Post;
/// use chrono::{TimeZone, Utc};
///
/// let posts = vec![
///     Post::new("a").with_timestamp(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()),
///     Post::repost("b").with_timestamp(Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap()),
///     Post::new("c").with_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
/// ];
///
/// let volume = monthly_volume(&posts, utc());
/// assert_eq!(volume.len(), 2);
/// assert_eq!(volume[0].month, "2024-01");
/// assert_eq!((volume[0].originals, volume[0].reposts), (1, 1));
/// ```
pub fn monthly_volume(posts: &[Post], zone: FixedOffset) -> Vec<MonthlyVolume> {
    let mut buckets: BTreeMap<String, (usize, usize)> = BTreeMap::new();

    for post in posts {
        let Some(ts) = post.timestamp else { continue };
        let entry = buckets.entry(month_label(ts, zone)).or_default();
        match post.message_type {
            MessageType::Original => entry.0 += 1,
            MessageType::Repost => entry.1 += 1,
        }
    }

    buckets
        .into_iter()
        .map(|(month, (originals, reposts))| MonthlyVolume {
            month,
            originals,
            reposts,
        })
        .collect()
}

/// How many posts survived each filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterStats {
    /// Posts before filtering.
    pub total: usize,
    /// Posts left after sender, type and date filters.
    pub after_base: usize,
    /// Posts left after the text filter.
    pub after_text: usize,
}

impl FilterStats {
    pub fn new(total: usize, after_base: usize, after_text: usize) -> Self {
        Self {
            total,
            after_base,
            after_text,
        }
    }

    /// Percentage of the input that was kept.
    pub fn retention(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.after_text as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::zone::{parse_utc_offset, utc};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_monthly_volume_sorted_and_split() {
        let posts = vec![
            Post::new("mar").with_timestamp(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()),
            Post::repost("dec").with_timestamp(Utc.with_ymd_and_hms(2023, 12, 11, 10, 0, 0).unwrap()),
            Post::repost("mar2").with_timestamp(Utc.with_ymd_and_hms(2024, 3, 20, 10, 0, 0).unwrap()),
            Post::new("undated"),
        ];

        let volume = monthly_volume(&posts, utc());
        let months: Vec<_> = volume.iter().map(|v| v.month.as_str()).collect();
        assert_eq!(months, ["2023-12", "2024-03"]);
        assert_eq!(volume[0].count(MessageType::Repost), 1);
        assert_eq!(volume[1].originals, 1);
        assert_eq!(volume[1].reposts, 1);
        assert_eq!(volume[1].total(), 2);
    }

    #[test]
    fn test_monthly_volume_in_zone() {
        let posts =
            vec![Post::new("x").with_timestamp(Utc.with_ymd_and_hms(2024, 2, 1, 2, 0, 0).unwrap())];
        let art = parse_utc_offset("-03:00").unwrap();
        assert_eq!(monthly_volume(&posts, art)[0].month, "2024-01");
    }

    #[test]
    fn test_monthly_volume_empty() {
        assert!(monthly_volume(&[], utc()).is_empty());
    }

    #[test]
    fn test_retention() {
        assert!((FilterStats::new(200, 100, 50).retention() - 25.0).abs() < f64::EPSILON);
        assert!(FilterStats::default().retention().abs() < f64::EPSILON);
    }
}
