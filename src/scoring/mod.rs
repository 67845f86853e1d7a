//! Answer-vs-reference similarity scoring.
//!
//! [`SimilarityScorer`] turns two strings into a confidence in `[0.0, 1.0]` and
//! [`Verdict`] turns that confidence into the informal label shown to the user.
//!
//! # Short vs. long answers
//!
//! An answer of at most two whitespace-delimited tokens is treated as categorical
//! ("Paris", "100°C"). It scores `1.0` if its normalized form (lower-case, non-word
//! characters removed) appears inside the normalized reference; otherwise it keeps its
//! similarity ratio only when that ratio exceeds `0.6`. Longer answers always receive the
//! raw ratio.
//!
//! Scoring is pure: the same two inputs always give the same score.

pub mod ratio;
pub mod scorer;
pub mod types;


pub use ratio::similarity_ratio;
pub use scorer::{SimilarityScorer, normalize, score};
pub use types::{AnswerKind, Verdict};
