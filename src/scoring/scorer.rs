use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::constants::{
    DEFAULT_HALLUCINATION_THRESHOLD, SHORT_ANSWER_MAX_TOKENS, SHORT_ANSWER_MIN_RATIO,
};

use super::ratio::similarity_ratio;
use super::types::{AnswerKind, Verdict};

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Scores a candidate answer against reference text.
///
/// Short answers (a name, a number with a unit) are right or wrong: they score `1.0` when
/// contained in the reference and `0.0` unless they are a close near-match. Longer answers
/// get the plain similarity ratio so paraphrases land somewhere in between.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    short_answer_max_tokens: usize,
    short_answer_min_ratio: f64,
    threshold: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            short_answer_max_tokens: SHORT_ANSWER_MAX_TOKENS,
            short_answer_min_ratio: SHORT_ANSWER_MIN_RATIO,
            threshold: DEFAULT_HALLUCINATION_THRESHOLD,
        }
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the verdict threshold.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is outside `[0.0, 1.0]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&threshold),
            "threshold must be between 0.0 and 1.0"
        );
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classifies a trimmed answer by token count.
    pub fn classify(&self, answer: &str) -> AnswerKind {
        if answer.split_whitespace().count() <= self.short_answer_max_tokens {
            AnswerKind::Short
        } else {
            AnswerKind::Long
        }
    }

    /// Returns a confidence in `[0.0, 1.0]` that `answer` agrees with `reference`.
    pub fn score(&self, answer: &str, reference: &str) -> f64 {
        let answer = answer.trim();
        let reference = reference.trim();

        let score = match self.classify(answer) {
            AnswerKind::Short => self.score_short(answer, reference),
            AnswerKind::Long => similarity_ratio(&answer.to_lowercase(), &reference.to_lowercase()),
        };

        debug!(
            answer_len = answer.len(),
            reference_len = reference.len(),
            score,
            "Scored answer"
        );
        score
    }

    /// Scores and labels the answer in one step.
    pub fn verdict(&self, answer: &str, reference: &str) -> (f64, Verdict) {
        let score = self.score(answer, reference);
        (score, Verdict::from_score(score, self.threshold))
    }

    fn score_short(&self, answer: &str, reference: &str) -> f64 {
        // An empty or punctuation-only answer normalizes to "" and is contained everywhere.
        if normalize(reference).contains(&normalize(answer)) {
            return 1.0;
        }

        let ratio = similarity_ratio(&answer.to_lowercase(), &reference.to_lowercase());
        if ratio > self.short_answer_min_ratio {
            ratio
        } else {
            0.0
        }
    }
}

/// Lower-cases and strips every non-word character, whitespace included.
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Scores with the default policy; see [`SimilarityScorer::score`].
pub fn score(answer: &str, reference: &str) -> f64 {
    SimilarityScorer::default().score(answer, reference)
}
