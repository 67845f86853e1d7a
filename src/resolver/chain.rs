use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::constants::NO_REFERENCE_SENTINEL;
use crate::lookup::{
    EncyclopedicLookup, KnowledgeSource, LookupResult, StructuredFactLookup, WikidataClient,
    WikipediaClient,
};
use crate::overrides::OverrideStore;

/// Runs the reference sources in priority order for one question.
///
/// Results are never cached here; each call hits the sources afresh.
pub struct KnowledgeResolver {
    stages: [Arc<dyn KnowledgeSource>; 4],
}

impl KnowledgeResolver {
    /// Creates a resolver with explicit stages, tried in argument order.
    pub fn new(
        structured: Arc<dyn KnowledgeSource>,
        overrides: Arc<dyn KnowledgeSource>,
        native: Arc<dyn KnowledgeSource>,
        fallback: Arc<dyn KnowledgeSource>,
    ) -> Self {
        Self {
            stages: [structured, overrides, native, fallback],
        }
    }

    /// Creates a resolver backed by Wikidata, `overrides`, and two Wikipedia editions.
    pub fn from_config(config: &Config, overrides: Arc<OverrideStore>) -> LookupResult<Self> {
        let graph = Arc::new(WikidataClient::from_config(config)?);
        let encyclopedia = Arc::new(WikipediaClient::from_config(config)?);

        Ok(Self::new(
            Arc::new(StructuredFactLookup::new(graph)),
            overrides,
            Arc::new(EncyclopedicLookup::new(
                encyclopedia.clone(),
                config.native_lang.clone(),
            )),
            Arc::new(EncyclopedicLookup::new(
                encyclopedia,
                config.fallback_lang.clone(),
            )),
        ))
    }

    /// Stage names in the order they are tried.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Reference text for `question`, or [`NO_REFERENCE_SENTINEL`] if no stage has one.
    pub async fn resolve(&self, question: &str) -> String {
        for stage in &self.stages {
            let answer = stage.lookup(question).await;
            if !answer.is_empty() {
                debug!(stage = stage.name(), "Reference resolved");
                return answer;
            }
            debug!(stage = stage.name(), "Stage empty, falling through");
        }

        debug!("No stage produced a reference");
        NO_REFERENCE_SENTINEL.to_string()
    }
}
