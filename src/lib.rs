//! refcheck library crate (used by the binary and integration tests).
//!
//! # Public API Surface
//!
//! One check cycle resolves a reference text for a question, then scores the candidate
//! answer against it.
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`FactChecker`], [`CheckReport`] - One question/answer cycle
//! - [`KnowledgeResolver`] - Ordered fallback across reference sources
//! - [`SimilarityScorer`], [`Verdict`] - Answer-vs-reference scoring
//!
//! ## Reference Sources
//! - [`KnowledgeSource`] - One resolver stage; empty string means "no result"
//! - [`StructuredFactLookup`] over a [`KnowledgeGraph`] ([`WikidataClient`])
//! - [`EncyclopedicLookup`] over an [`Encyclopedia`] ([`WikipediaClient`])
//! - [`OverrideStore`] - Operator-edited JSON table, refreshed on change
//!
//! ## Change Notifications
//! - [`NotificationSource`], [`WatcherHandle`] - Push refresh of the override table
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod lookup;
pub mod overrides;
pub mod resolver;
pub mod scoring;
pub mod session;
pub mod watcher;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_HALLUCINATION_THRESHOLD, NO_REFERENCE_SENTINEL};
pub use lookup::{
    Encyclopedia, EncyclopedicLookup, KnowledgeGraph, KnowledgeSource, LookupError, LookupResult,
    QuestionShape, StructuredFactLookup, WikidataClient, WikipediaClient,
};
#[cfg(any(test, feature = "mock"))]
pub use lookup::{MockEncyclopedia, MockKnowledgeGraph, MockKnowledgeSource};
pub use overrides::{CacheRecord, OverrideError, OverrideStore, ReferenceMapping};
pub use resolver::KnowledgeResolver;
pub use scoring::{AnswerKind, SimilarityScorer, Verdict, score, similarity_ratio};
pub use session::{CheckReport, FactChecker, run_interactive};
pub use watcher::{NotificationSource, WatchError, WatcherHandle};
