//! Ordered fallback across the reference sources.
//!
//! Stages run strictly in this order and the first non-empty answer wins:
//!
//! 1. structured facts from the knowledge graph
//! 2. the operator's override table (exact question match)
//! 3. encyclopedia summary in the native language
//! 4. encyclopedia summary in the fallback language
//!
//! When every stage is empty the resolver answers
//! [`NO_REFERENCE_SENTINEL`](crate::constants::NO_REFERENCE_SENTINEL).

pub mod chain;


pub use chain::KnowledgeResolver;
