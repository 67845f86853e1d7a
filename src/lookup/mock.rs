//! In-memory stand-ins for the external knowledge services.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::{LookupError, LookupResult};
use super::source::KnowledgeSource;
use super::wikidata::KnowledgeGraph;
use super::wikipedia::Encyclopedia;

fn unavailable(service: &'static str) -> LookupError {
    LookupError::Service {
        service,
        code: "unavailable".to_string(),
        info: "mock configured to fail".to_string(),
    }
}

/// Knowledge graph backed by fixed search hits and attribute labels.
#[derive(Default)]
pub struct MockKnowledgeGraph {
    entities: HashMap<String, Vec<String>>,
    attributes: HashMap<(String, String), String>,
    failing: bool,
    calls: AtomicUsize,
}

impl MockKnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for `query` returns `id` (appended after earlier hits).
    pub fn with_entity(mut self, query: &str, id: &str) -> Self {
        self.entities
            .entry(query.to_string())
            .or_default()
            .push(id.to_string());
        self
    }

    /// `entity`'s `property` resolves to `label`.
    pub fn with_attribute(mut self, entity: &str, property: &str, label: &str) -> Self {
        self.attributes
            .insert((entity.to_string(), property.to_string()), label.to_string());
        self
    }

    /// Every call fails as if the service were down.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Total number of calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeGraph for MockKnowledgeGraph {
    async fn search_entities(&self, text: &str, limit: u32) -> LookupResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable("mock-graph"));
        }
        Ok(self
            .entities
            .get(text)
            .map(|ids| ids.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn attribute_label(&self, entity: &str, property: &str) -> LookupResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(unavailable("mock-graph"));
        }
        self.attributes
            .get(&(entity.to_string(), property.to_string()))
            .cloned()
            .ok_or_else(|| LookupError::MissingAttribute {
                entity: entity.to_string(),
                property: property.to_string(),
            })
    }
}

/// Encyclopedia backed by fixed search results and summaries, keyed by language.
#[derive(Default)]
pub struct MockEncyclopedia {
    titles: HashMap<(String, String), Vec<String>>,
    summaries: HashMap<(String, String), String>,
    disambiguation: HashSet<(String, String)>,
    failing: bool,
    summary_requests: Mutex<Vec<(String, String)>>,
}

impl MockEncyclopedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searching `query` in `lang` returns `titles`.
    pub fn with_search(mut self, lang: &str, query: &str, titles: &[&str]) -> Self {
        self.titles.insert(
            (lang.to_string(), query.to_string()),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// The article `title` in `lang` summarizes to `text`.
    pub fn with_summary(mut self, lang: &str, title: &str, text: &str) -> Self {
        self.summaries
            .insert((lang.to_string(), title.to_string()), text.to_string());
        self
    }

    /// The article `title` in `lang` is a disambiguation page.
    pub fn with_disambiguation(mut self, lang: &str, title: &str) -> Self {
        self.disambiguation
            .insert((lang.to_string(), title.to_string()));
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// `(lang, title)` pairs passed to `summary`, in call order.
    pub fn summary_requests(&self) -> Vec<(String, String)> {
        self.summary_requests.lock().clone()
    }
}

#[async_trait]
impl Encyclopedia for MockEncyclopedia {
    async fn search(&self, query: &str, lang: &str) -> LookupResult<Vec<String>> {
        if self.failing {
            return Err(unavailable("mock-encyclopedia"));
        }
        Ok(self
            .titles
            .get(&(lang.to_string(), query.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn summary(&self, title: &str, lang: &str, _sentences: u32) -> LookupResult<String> {
        self.summary_requests
            .lock()
            .push((lang.to_string(), title.to_string()));
        if self.failing {
            return Err(unavailable("mock-encyclopedia"));
        }

        let key = (lang.to_string(), title.to_string());
        if self.disambiguation.contains(&key) {
            return Err(LookupError::Disambiguation {
                title: title.to_string(),
            });
        }
        self.summaries
            .get(&key)
            .cloned()
            .ok_or_else(|| LookupError::PageNotFound {
                title: title.to_string(),
            })
    }
}

/// Resolver stage with a canned answer that counts how often it was asked.
pub struct MockKnowledgeSource {
    name: String,
    answer: String,
    calls: AtomicUsize,
}

impl MockKnowledgeSource {
    pub fn new(name: &str, answer: &str) -> Self {
        Self {
            name: name.to_string(),
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// A stage that never finds anything.
    pub fn empty(name: &str) -> Self {
        Self::new(name, "")
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn was_called(&self) -> bool {
        self.calls() > 0
    }
}

#[async_trait]
impl KnowledgeSource for MockKnowledgeSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, _question: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}
