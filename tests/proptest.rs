//! Property-based tests for the text engine and filters.
//!
//! Most strategies pick from curated fragments (accents, URLs, regex
//! metacharacters, separators). A few properties run on arbitrary strings
//! to cover input the fragments never produce.

use proptest::prelude::*;

use postsift::prelude::*;

fn arb_fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "pelotudo",
        "PELOTUDO",
        "Perio",
        "periodismo",
        "canción",
        "CANCIÓN",
        "Ñandú",
        "casta",
        "a.b*",
        "(x|y)+",
        "$100",
        "https://t.co/abc",
        "http://x.co/a?b=c",
        "libertad!",
        "¿qué?",
        "🎉",
        "",
        " ",
        "\n",
        ",",
    ])
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 0..8).prop_map(|parts| parts.join(" "))
}

fn arb_term() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "pelotudo", "perio", "cancion", "CANCIÓN", "casta", "nandu", "a.b*", "$100", "(x|y)+",
    ])
}

fn arb_mode() -> impl Strategy<Value = MatchMode> {
    prop::sample::select(vec![MatchMode::ExactWord, MatchMode::Contains])
}

/// Posts tagged with their input position in the sender field.
fn arb_posts(max_len: usize) -> impl Strategy<Value = Vec<Post>> {
    prop::collection::vec(arb_text(), 0..max_len).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Post::new(text).with_sender(i.to_string()))
            .collect()
    })
}

fn positions(posts: &[Post]) -> Vec<usize> {
    posts
        .iter()
        .filter_map(|p| p.sender().and_then(|s| s.parse().ok()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // ============================================
    // NORMALIZATION
    // ============================================

    /// Normalizing twice changes nothing
    #[test]
    fn normalize_is_idempotent(text in arb_text()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Idempotence holds for any Unicode input, not just the curated fragments
    #[test]
    fn normalize_is_idempotent_on_any_string(text in any::<String>()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Case never survives normalization
    #[test]
    fn normalize_ignores_case(text in arb_text()) {
        prop_assert_eq!(normalize(&text.to_uppercase()), normalize(&text.to_lowercase()));
    }

    /// No URL survives normalization
    #[test]
    fn normalize_removes_urls(text in arb_text()) {
        let normalized = normalize(&text);
        prop_assert!(!normalized.contains("http://"));
        prop_assert!(!normalized.contains("https://"));
    }

    // ============================================
    // MATCHING
    // ============================================

    /// Filtering keeps a subsequence of the input
    #[test]
    fn filter_preserves_order(posts in arb_posts(20), term in arb_term(), mode in arb_mode()) {
        let total = posts.len();
        let kept = positions(&apply_text_filter(posts, term, mode));
        prop_assert!(kept.len() <= total);
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
    }

    /// Queries without terms keep everything
    #[test]
    fn empty_query_keeps_all(
        posts in arb_posts(20),
        query in prop::sample::select(vec!["", "   ", "|", "|||", " | | "]),
        mode in arb_mode(),
    ) {
        let expected = posts.clone();
        prop_assert_eq!(apply_text_filter(posts, query, mode), expected);
    }

    /// Building and running a matcher never panics, whatever the query and text
    #[test]
    fn matching_is_total(query in any::<String>(), text in any::<String>(), mode in arb_mode()) {
        let matcher = build_matcher(&query, mode);
        let _ = matcher.matches_text(Some(&text));
        let _ = matcher.matches_text(None);
    }

    /// Every exact-word hit is also a substring hit
    #[test]
    fn contains_is_superset_of_exact(text in arb_text(), term in arb_term()) {
        let exact = build_matcher(term, MatchMode::ExactWord);
        let contains = build_matcher(term, MatchMode::Contains);
        if exact.matches_text(Some(&text)) {
            prop_assert!(contains.matches_text(Some(&text)));
        }
    }

    /// `a|b` matches exactly when `a` or `b` does
    #[test]
    fn alternatives_are_or(text in arb_text(), a in arb_term(), b in arb_term(), mode in arb_mode()) {
        let either = build_matcher(&format!("{a}|{b}"), mode).matches_text(Some(&text));
        let left = build_matcher(a, mode).matches_text(Some(&text));
        let right = build_matcher(b, mode).matches_text(Some(&text));
        prop_assert_eq!(either, left || right);
    }

    /// A term embedded between spaces is always found, metacharacters included
    #[test]
    fn embedded_term_is_found(prefix in arb_text(), suffix in arb_text(), term in arb_term()) {
        let text = format!("{prefix} {term} {suffix}");
        let matcher = build_matcher(term, MatchMode::Contains);
        prop_assert!(matcher.matches_text(Some(&text)));
    }

    /// Matching ignores case of the text
    #[test]
    fn matching_ignores_text_case(text in arb_text(), term in arb_term(), mode in arb_mode()) {
        let matcher = build_matcher(term, mode);
        prop_assert_eq!(
            matcher.matches_text(Some(&text.to_uppercase())),
            matcher.matches_text(Some(&text.to_lowercase()))
        );
    }

    // ============================================
    // FILTERS
    // ============================================

    /// A default configuration is the identity
    #[test]
    fn default_filter_is_identity(posts in arb_posts(20)) {
        let expected = posts.clone();
        prop_assert_eq!(apply_filters(posts, &FilterConfig::new()), expected);
    }

    /// Stats agree with the returned posts
    #[test]
    fn stats_are_consistent(posts in arb_posts(20), term in arb_term(), mode in arb_mode()) {
        let total = posts.len();
        let config = FilterConfig::new().with_query(term, mode);
        let (filtered, stats) = apply_filters_with_stats(posts, &config);
        prop_assert_eq!(stats.total, total);
        prop_assert_eq!(stats.after_base, total);
        prop_assert_eq!(stats.after_text, filtered.len());
    }
}
