//! Filter posts by sender, message type, date range and text.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering post collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Posts from any of the listed accounts |
//! | Type | [`with_message_type`](FilterConfig::with_message_type) | Originals, reposts, or both |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Posts on or after a day |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Posts on or before a day |
//! | Text | [`with_query`](FilterConfig::with_query) | Posts whose text matches a query |
//!
//! # Examples
//!
//! ```
//! use postsift::core::filter::{FilterConfig, apply_filters};
//! use postsift::core::matcher::MatchMode;
//! use postsift::{MessageType, Post};
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> postsift::Result<()> {
//! let posts = vec![
//!     Post::new("Viva la libertad").with_timestamp(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()),
//!     Post::repost("La libertad avanza").with_timestamp(Utc.with_ymd_and_hms(2024, 1, 11, 12, 0, 0).unwrap()),
//!     Post::new("Otra cosa").with_timestamp(Utc.with_ymd_and_hms(2024, 1, 12, 12, 0, 0).unwrap()),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_message_type(MessageType::Original)
//!     .with_date_from("2024-01-01")?
//!     .with_query("libertad", MatchMode::ExactWord);
//!
//! let filtered = apply_filters(posts, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text(), Some("Viva la libertad"));
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Empty sender and type lists mean "no restriction"
//! - Posts without a sender are excluded while a sender filter is active
//! - Posts without a timestamp are excluded while a date bound is active
//! - Date bounds are whole days in the configured zone
//! - The text filter runs last, on the already reduced set
//! - All filters are combined with AND logic

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use log::debug;

use super::matcher::{MatchMode, build_matcher, filter_with};
use super::stats::FilterStats;
use super::zone::{start_of_day, utc};
use crate::Post;
use crate::error::PostsiftError;
use crate::post::MessageType;

/// Configuration for filtering posts.
///
/// A post must match all active filters to be included in the result.
/// The default configuration lets everything through.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Accepted senders (ASCII case-insensitive). Empty accepts all.
    pub senders: Vec<String>,

    /// Accepted message types. Empty accepts all.
    pub message_types: Vec<MessageType>,

    /// First day included.
    pub date_from: Option<NaiveDate>,

    /// Last day included.
    pub date_to: Option<NaiveDate>,

    /// Zone in which the date bounds are interpreted.
    pub zone: FixedOffset,

    /// Text query, `|`-separated alternatives.
    pub query: String,

    /// How query terms must appear.
    pub mode: MatchMode,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            senders: Vec::new(),
            message_types: Vec::new(),
            date_from: None,
            date_to: None,
            zone: utc(),
            query: String::new(),
            mode: MatchMode::default(),
        }
    }
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first included day (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`PostsiftError::InvalidDate`] if the format is invalid or
    /// the day has no representable start in the current zone.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, PostsiftError> {
        self.date_from = Some(parse_date(date_str, self.zone)?);
        Ok(self)
    }

    /// Sets the last included day (`YYYY-MM-DD`). The whole day is included.
    ///
    /// # Errors
    ///
    /// Returns [`PostsiftError::InvalidDate`] if the format is invalid or
    /// the day has no representable start in the current zone.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, PostsiftError> {
        self.date_to = Some(parse_date(date_str, self.zone)?);
        Ok(self)
    }

    /// Sets both date bounds from already parsed dates.
    #[must_use]
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Sets the zone used to interpret date bounds.
    #[must_use]
    pub fn with_zone(mut self, zone: FixedOffset) -> Self {
        self.zone = zone;
        self
    }

    /// Adds an accepted sender.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.senders.push(sender.into());
        self
    }

    /// Adds several accepted senders.
    #[must_use]
    pub fn with_senders<I, S>(mut self, senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senders.extend(senders.into_iter().map(Into::into));
        self
    }

    /// Adds an accepted message type.
    #[must_use]
    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        if !self.message_types.contains(&message_type) {
            self.message_types.push(message_type);
        }
        self
    }

    /// Sets the text query and its match mode.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>, mode: MatchMode) -> Self {
        self.query = query.into();
        self.mode = mode;
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_base_filter() || self.has_text_filter()
    }

    /// Returns `true` if a sender, type or date filter is active.
    pub fn has_base_filter(&self) -> bool {
        !self.senders.is_empty() || !self.message_types.is_empty() || self.has_date_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Returns `true` if the text query has content.
    ///
    /// A query made only of blanks and delimiters still matches everything;
    /// this only checks for non-blank input.
    pub fn has_text_filter(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Inclusive lower and exclusive upper UTC instants of the date range.
    fn date_window(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let after = self
            .date_from
            .map(|d| saturating_start_of_day(d, self.zone));
        let before = self
            .date_to
            .and_then(|d| d.succ_opt())
            .map(|d| saturating_start_of_day(d, self.zone));
        (after, before)
    }

    /// Tests the sender, type and date filters for one post.
    pub fn accepts_base(&self, post: &Post) -> bool {
        let (after, before) = self.date_window();
        self.accepts_base_in(post, after, before)
    }

    fn accepts_base_in(
        &self,
        post: &Post,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> bool {
        if !self.senders.is_empty() {
            match post.sender() {
                Some(sender) if self.senders.iter().any(|s| s.eq_ignore_ascii_case(sender)) => {}
                _ => return false,
            }
        }

        if !self.message_types.is_empty() && !self.message_types.contains(&post.message_type) {
            return false;
        }

        if self.has_date_filter() {
            let Some(ts) = post.timestamp else {
                // No timestamp - exclude from date-bounded results
                return false;
            };
            if after.is_some_and(|after| ts < after) {
                return false;
            }
            if before.is_some_and(|before| ts >= before) {
                return false;
            }
        }

        true
    }
}

/// Parse a date string in YYYY-MM-DD format whose start exists in `zone`.
fn parse_date(date_str: &str, zone: FixedOffset) -> Result<NaiveDate, PostsiftError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .ok()
        .filter(|date| start_of_day(*date, zone).is_some())
        .ok_or_else(|| PostsiftError::invalid_date(date_str))
}

/// Start of `date` in `zone`, clamped to the representable UTC range.
///
/// Dates set before a zone change may fall off either end of the range.
fn saturating_start_of_day(date: NaiveDate, zone: FixedOffset) -> DateTime<Utc> {
    start_of_day(date, zone).unwrap_or(if date.year() < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Applies only the sender, type and date filters.
pub fn apply_base_filters(posts: Vec<Post>, config: &FilterConfig) -> Vec<Post> {
    if !config.has_base_filter() {
        return posts;
    }

    let (after, before) = config.date_window();
    posts
        .into_iter()
        .filter(|post| config.accepts_base_in(post, after, before))
        .collect()
}

/// Filters a collection of posts based on the provided configuration.
///
/// Returns the posts that match all active filters, in their original
/// order. If no filters are active, returns the input unchanged.
pub fn apply_filters(posts: Vec<Post>, config: &FilterConfig) -> Vec<Post> {
    apply_filters_with_stats(posts, config).0
}

/// Like [`apply_filters`], also reporting how many posts each stage kept.
pub fn apply_filters_with_stats(posts: Vec<Post>, config: &FilterConfig) -> (Vec<Post>, FilterStats) {
    let total = posts.len();

    let base = apply_base_filters(posts, config);
    let after_base = base.len();
    debug!("Base filters kept {} of {} posts", after_base, total);

    let matcher = build_matcher(&config.query, config.mode);
    let filtered = filter_with(base, &matcher);
    debug!(
        "Text filter ({} terms, {}) kept {} of {} posts",
        matcher.terms().len(),
        config.mode,
        filtered.len(),
        after_base
    );

    let stats = FilterStats::new(total, after_base, filtered.len());
    (filtered, stats)
}
