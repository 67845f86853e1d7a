use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::error::{LookupError, LookupResult};
use super::source::{KnowledgeSource, collapse};
use super::wikipedia::Encyclopedia;
use crate::constants::{SUMMARY_SENTENCES, TITLE_MATCH_MIN_RATIO};
use crate::scoring::similarity_ratio;

/// Encyclopedia stage pinned to one language edition.
///
/// Picks the search hit whose title is most similar to the question and refuses to answer
/// when even that title is a poor match, so an unrelated article is never used as truth.
pub struct EncyclopedicLookup {
    client: Arc<dyn Encyclopedia>,
    lang: String,
    name: String,
}

impl EncyclopedicLookup {
    pub fn new(client: Arc<dyn Encyclopedia>, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        Self {
            client,
            name: format!("encyclopedia:{lang}"),
            lang,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub async fn try_lookup(&self, question: &str) -> LookupResult<String> {
        let titles = self.client.search(question, &self.lang).await?;

        let (title, ratio) =
            best_title(question, &titles).ok_or_else(|| LookupError::NoSearchResults {
                query: question.to_string(),
            })?;

        if ratio < TITLE_MATCH_MIN_RATIO {
            return Err(LookupError::WeakTitleMatch {
                title: title.to_string(),
                ratio,
            });
        }

        debug!(lang = %self.lang, title, ratio, "Selected article");
        self.client
            .summary(title, &self.lang, SUMMARY_SENTENCES)
            .await
    }
}

/// Title most similar to `question` (case-insensitive); the earliest wins ties.
pub fn best_title<'a>(question: &str, titles: &'a [String]) -> Option<(&'a str, f64)> {
    let question = question.to_lowercase();
    let mut best: Option<(&'a str, f64)> = None;

    for title in titles {
        let ratio = similarity_ratio(&question, &title.to_lowercase());
        if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
            best = Some((title.as_str(), ratio));
        }
    }

    best
}

#[async_trait]
impl KnowledgeSource for EncyclopedicLookup {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, question: &str) -> String {
        collapse(self.name(), self.try_lookup(question).await)
    }
}
