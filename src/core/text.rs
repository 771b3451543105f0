//! Text normalization applied to both post text and search queries.
//!
//! Search must not miss a post because of surface differences: an accent
//! (`canción` vs `cancion`), mixed case, or a tracking link glued into the
//! text. [`normalize`] folds all of those away. The same function is applied
//! to the query and to every row, so a query matches exactly when its folded
//! form appears in the folded text.
//!
//! # Example
//!
//! ```
//! use postsift::core::text::{normalize, strip_urls};
//!
//! assert_eq!(strip_urls("ver http://x.co/abc mas"), "ver  mas");
//! assert_eq!(normalize("CANCIÓN https://t.co/x"), "cancion ");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// HTTP(S) scheme followed by a run of non-whitespace.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("URL pattern is valid"));

/// Removes every `http://` / `https://` URL from `text`.
///
/// A URL extends from the scheme to the next whitespace character. Text
/// around the URL, including the surrounding whitespace, is kept as-is.
/// Input without URLs is returned unchanged.
pub fn strip_urls(text: &str) -> String {
    URL_RE.replace_all(text, "").into_owned()
}

/// Folds `text` for accent- and case-insensitive comparison.
///
/// Steps: lower-case, canonical decomposition (NFD), drop combining marks,
/// strip URLs. URLs are stripped last so that a scheme revealed by the
/// folding (e.g. `HTTP://`) is still removed, which keeps the function
/// idempotent.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    if folded.contains("://") {
        strip_urls(&folded)
    } else {
        folded
    }
}

/// [`normalize`] for values that may be missing. `None` folds to `""`.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
