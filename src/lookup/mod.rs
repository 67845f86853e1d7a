//! Reference lookups against external knowledge services.
//!
//! Each resolver stage implements [`KnowledgeSource`]. Internally a stage works with
//! [`LookupResult`] so the reason for a miss (network error, weak title match,
//! disambiguation page, ...) can be logged; at the stage boundary the result is collapsed
//! to an empty string.
//!
//! - [`StructuredFactLookup`]: question shapes answered from a [`KnowledgeGraph`]
//!   ([`WikidataClient`]).
//! - [`EncyclopedicLookup`]: best-matching article summary from an [`Encyclopedia`]
//!   ([`WikipediaClient`]), one instance per language.

pub mod encyclopedic;
pub mod error;
pub mod http;
pub mod source;
pub mod structured;
pub mod wikidata;
pub mod wikipedia;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use encyclopedic::{EncyclopedicLookup, best_title};
pub use error::{LookupError, LookupResult};
pub use source::{KnowledgeSource, collapse};
pub use structured::{QuestionShape, StructuredFactLookup};
pub use wikidata::{KnowledgeGraph, WikidataClient};
pub use wikipedia::{Encyclopedia, WikipediaClient};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEncyclopedia, MockKnowledgeGraph, MockKnowledgeSource};
