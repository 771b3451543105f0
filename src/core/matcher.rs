//! Turning a search query into a text predicate.
//!
//! A query is a list of alternatives separated by [`QUERY_DELIMITER`]
//! (`pelotudo|perio|burro`). A post matches when any alternative occurs in
//! its [normalized](crate::core::text::normalize) text. [`MatchMode`] decides
//! what "occurs" means:
//!
//! | Mode | Pattern | `perio` vs `periodismo` |
//! |------|---------|-------------------------|
//! | [`ExactWord`](MatchMode::ExactWord) | term must not touch another word character | no match |
//! | [`Contains`](MatchMode::Contains) | term anywhere, catches roots and deformations | match |
//!
//! Terms are always escaped, so `a.b*` searches for the four characters
//! `a.b*`. Any string is a valid query: a query with no usable terms
//! (empty, blanks, `|||`) matches everything.
//!
//! # Example
//!
//! ```
//! use postsift::core::matcher::{MatchMode, build_matcher};
//!
//! let exact = build_matcher("perio", MatchMode::ExactWord);
//! assert!(exact.matches_text(Some("habla de perio")));
//! assert!(!exact.matches_text(Some("periodismo")));
//!
//! let root = build_matcher("perio", MatchMode::Contains);
//! assert!(root.matches_text(Some("periodismo")));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::text::normalize;
use crate::Post;

/// Separator between alternative terms in a query.
pub const QUERY_DELIMITER: char = '|';

/// Compiled pattern size limit. Queries that exceed it use a literal scan.
const REGEX_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// How a query term has to appear in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The term must stand as a complete word.
    #[default]
    ExactWord,

    /// The term may appear anywhere, including inside longer words.
    Contains,
}

impl MatchMode {
    /// Returns all supported mode names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &["exact", "word", "exact_word", "contains", "root", "substring"]
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::ExactWord => write!(f, "exact word"),
            MatchMode::Contains => write!(f, "contains"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" | "word" | "exact_word" => Ok(MatchMode::ExactWord),
            "contains" | "root" | "substring" => Ok(MatchMode::Contains),
            _ => Err(format!(
                "Unknown match mode: '{}'. Expected one of: {}",
                s,
                MatchMode::all_names().join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone)]
enum Engine {
    /// No usable terms.
    All,
    Regex(Regex),
    /// Literal scan, used when the regex engine rejects the pattern.
    Scan,
}

/// A compiled text predicate.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    mode: MatchMode,
    terms: Vec<String>,
    engine: Engine,
}

impl Matcher {
    /// A matcher that accepts every post, including posts without text.
    pub fn all() -> Self {
        Self {
            mode: MatchMode::default(),
            terms: Vec::new(),
            engine: Engine::All,
        }
    }

    /// Returns `true` if this matcher accepts everything.
    pub fn matches_all(&self) -> bool {
        matches!(self.engine, Engine::All)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// The normalized terms, in query order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The regular expression in use, if any.
    pub fn pattern(&self) -> Option<&str> {
        match &self.engine {
            Engine::Regex(re) => Some(re.as_str()),
            Engine::All | Engine::Scan => None,
        }
    }

    /// Tests text that has already been through [`normalize`].
    pub fn is_match(&self, normalized: &str) -> bool {
        match &self.engine {
            Engine::All => true,
            Engine::Regex(re) => re.is_match(normalized),
            Engine::Scan => self.scan(normalized),
        }
    }

    /// Normalizes `text` and tests it.
    ///
    /// Missing text never matches, unless the matcher accepts everything.
    pub fn matches_text(&self, text: Option<&str>) -> bool {
        if self.matches_all() {
            return true;
        }
        match text {
            Some(t) => self.is_match(&normalize(t)),
            None => false,
        }
    }

    /// Tests a post's text.
    pub fn matches_post(&self, post: &Post) -> bool {
        self.matches_text(post.text())
    }

    fn scan(&self, haystack: &str) -> bool {
        self.terms.iter().any(|term| match self.mode {
            MatchMode::Contains => haystack.contains(term.as_str()),
            MatchMode::ExactWord => scan_word(haystack, term),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::all()
    }
}

/// Finds `term` with no word character on either side.
///
/// Occurrences may overlap, so after a rejected hit the search resumes one
/// character later rather than past the whole occurrence.
fn scan_word(haystack: &str, term: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(term) {
        let start = from + pos;
        let end = start + term.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// A single Unicode `\w` character, the class behind the regex boundaries.
static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\w\z").expect("word class pattern is valid"));

fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// Splits a raw query into normalized, non-empty terms.
///
/// The query goes through the same [`normalize`] as post text, then is split
/// on [`QUERY_DELIMITER`]. Terms are trimmed; empty ones (from leading,
/// trailing or doubled delimiters) are dropped.
pub fn split_terms(query: &str) -> Vec<String> {
    normalize(query)
        .split(QUERY_DELIMITER)
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the regular expression for escaped `terms`.
fn build_pattern(terms: &[String], mode: MatchMode) -> String {
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");

    match mode {
        MatchMode::ExactWord => format!(r"\b{{start-half}}(?:{alternation})\b{{end-half}}"),
        MatchMode::Contains => format!("(?:{alternation})"),
    }
}

/// Builds a matcher for `query` in the given mode.
///
/// Never fails. A query without usable terms yields [`Matcher::all`].
pub fn build_matcher(query: &str, mode: MatchMode) -> Matcher {
    let terms = split_terms(query);
    if terms.is_empty() {
        return Matcher::all();
    }

    let pattern = build_pattern(&terms, mode);
    let engine = match RegexBuilder::new(&pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
    {
        Ok(re) => {
            debug!("Built {} matcher: {}", mode, re.as_str());
            Engine::Regex(re)
        }
        Err(e) => {
            warn!(
                "Query with {} terms is too large for the regex engine ({}); using literal scan",
                terms.len(),
                e
            );
            Engine::Scan
        }
    };

    Matcher {
        mode,
        terms,
        engine,
    }
}

/// Keeps the posts whose text matches `query`, preserving order.
///
/// Each post's text is normalized once. An empty query keeps every post.
///
/// # Example
///
/// ```
/// use postsift::core::matcher::{MatchMode, apply_text_filter};
/// use postsift::Post;
///
/// let posts = vec![
///     Post::new("Pelotudo total"),
///     Post::new("Es un PELOTUDO"),
///     Post::new("no aplica"),
/// ];
///
/// let kept = apply_text_filter(posts, "pelotudo", MatchMode::ExactWord);
/// assert_eq!(kept.len(), 2);
/// ```
pub fn apply_text_filter(posts: Vec<Post>, query: &str, mode: MatchMode) -> Vec<Post> {
    let matcher = build_matcher(query, mode);
    filter_with(posts, &matcher)
}

/// Keeps the posts accepted by an already built matcher.
pub fn filter_with(posts: Vec<Post>, matcher: &Matcher) -> Vec<Post> {
    if matcher.matches_all() {
        return posts;
    }

    posts
        .into_iter()
        .filter(|post| {
            post.text()
                .is_some_and(|text| matcher.is_match(&normalize(text)))
        })
        .collect()
}
