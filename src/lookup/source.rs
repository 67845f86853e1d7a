use async_trait::async_trait;
use tracing::debug;

use super::error::LookupResult;

#[async_trait]
/// One stage of the resolver chain.
///
/// `lookup` never fails: an empty string means "nothing here, try the next stage".
pub trait KnowledgeSource: Send + Sync {
    /// Short stage name used in logs.
    fn name(&self) -> &str;

    /// Reference text for `question`, or an empty string.
    async fn lookup(&self, question: &str) -> String;
}

/// Folds a stage's tagged result into the resolver's empty-string convention.
pub fn collapse(stage: &str, result: LookupResult<String>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            debug!(stage, reason = %e, "Stage produced no reference");
            String::new()
        }
    }
}
