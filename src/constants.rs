//! Cross-cutting, shared constants.
//!
//! The scoring thresholds are tuned together: a short answer that fails containment must
//! clear [`SHORT_ANSWER_MIN_RATIO`] to score at all, and the final verdict is drawn at
//! [`DEFAULT_HALLUCINATION_THRESHOLD`].

/// Answers with at most this many whitespace-delimited tokens are scored as categorical.
pub const SHORT_ANSWER_MAX_TOKENS: usize = 2;

/// Short answers whose similarity ratio does not exceed this score `0.0`.
pub const SHORT_ANSWER_MIN_RATIO: f64 = 0.6;

/// Minimum title similarity for an encyclopedia search hit to be used.
pub const TITLE_MATCH_MIN_RATIO: f64 = 0.5;

/// Scores below this are reported as a possible hallucination.
pub const DEFAULT_HALLUCINATION_THRESHOLD: f64 = 0.7;

/// Number of sentences requested for an encyclopedia summary.
pub const SUMMARY_SENTENCES: u32 = 2;

/// Number of candidate titles requested from an encyclopedia search.
pub const SEARCH_RESULT_LIMIT: u32 = 10;

/// Reference text returned when every resolver stage comes back empty.
pub const NO_REFERENCE_SENTINEL: &str = "Không có dữ liệu tham chiếu phù hợp.";

/// Default override file, relative to the working directory.
pub const DEFAULT_OVERRIDES_PATH: &str = "faq.json";

/// Default native encyclopedia language.
pub const DEFAULT_NATIVE_LANG: &str = "vi";

/// Default fallback encyclopedia language.
pub const DEFAULT_FALLBACK_LANG: &str = "en";

/// Placeholder substituted with the language code in the encyclopedia endpoint template.
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Log filter used when `RUST_LOG` is unset; keeps watcher notices visible.
pub const DEFAULT_LOG_DIRECTIVE: &str = "refcheck=info";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_ratios() {
        for value in [
            SHORT_ANSWER_MIN_RATIO,
            TITLE_MATCH_MIN_RATIO,
            DEFAULT_HALLUCINATION_THRESHOLD,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_sentinel_is_not_empty() {
        assert!(!NO_REFERENCE_SENTINEL.trim().is_empty());
    }
}
