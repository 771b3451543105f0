//! The post record shared by every part of the pipeline.
//!
//! A [`Post`] is one row of the archive: who sent it, whether it is an
//! original post or a repost, when it was sent, and its text. Every field
//! except the message type may be missing in the source data.
//!
//! # Examples
//!
//! ```
//! use postsift::{MessageType, Post};
//! use chrono::{TimeZone, Utc};
//!
//! let post = Post::new("Es un PELOTUDO")
//!     .with_sender("jmilei")
//!     .with_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
//!
//! assert_eq!(post.sender(), Some("jmilei"));
//! assert_eq!(post.message_type(), MessageType::Original);
//! assert!(post.timestamp().is_some());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of post in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MessageType {
    /// Authored text content (`T`).
    #[default]
    #[serde(rename = "T", alias = "t")]
    Original,

    /// Reshare of someone else's post (`R`).
    #[serde(rename = "R", alias = "r")]
    Repost,
}

impl MessageType {
    /// Returns the single-letter code used in the archive.
    pub fn code(&self) -> &'static str {
        match self {
            MessageType::Original => "T",
            MessageType::Repost => "R",
        }
    }

    /// Returns all message types.
    pub fn all() -> &'static [MessageType] {
        &[MessageType::Original, MessageType::Repost]
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "t" | "tweet" | "post" | "original" => Ok(MessageType::Original),
            "r" | "retweet" | "repost" => Ok(MessageType::Repost),
            _ => Err(format!(
                "Unknown message type: '{}'. Expected one of: T, R",
                s
            )),
        }
    }
}

/// One post of the archive.
///
/// Optional fields are omitted from JSON when `None`. Timestamps are always
/// stored in UTC; conversion to a display zone happens at the edges.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Post {
    /// Account that published the post, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Original post or repost.
    #[serde(rename = "type")]
    #[serde(default)]
    pub message_type: MessageType,

    /// When the post was published. `None` if the source value was missing
    /// or could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Raw post text. May contain URLs and diacritics.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub text: Option<String>,
}

impl Post {
    /// Creates an original post with the given text and no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates a repost with the given text.
    pub fn repost(text: impl Into<String>) -> Self {
        Self::new(text).with_message_type(MessageType::Repost)
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    #[must_use]
    pub fn with_message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Removes the text, as for a row whose text cell was empty.
    #[must_use]
    pub fn without_text(mut self) -> Self {
        self.text = None;
        self
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns `true` for reposts.
    pub fn is_repost(&self) -> bool {
        self.message_type == MessageType::Repost
    }
}
