//! Knowledge-graph access backed by the Wikidata action API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::error::{LookupError, LookupResult};
use super::http::{ApiError, build_client, check_api_error, get_json};
use crate::config::Config;

const SERVICE: &str = "wikidata";
const LABEL_FALLBACK_LANG: &str = "en";

#[async_trait]
/// Entity search plus typed attribute access on a knowledge graph.
pub trait KnowledgeGraph: Send + Sync {
    /// Entity ids matching `text`, best first.
    async fn search_entities(&self, text: &str, limit: u32) -> LookupResult<Vec<String>>;

    /// Label of the entity that `entity`'s `property` points at.
    async fn attribute_label(&self, entity: &str, property: &str) -> LookupResult<String>;
}

/// Wikidata client (`wbsearchentities` / `wbgetentities`).
pub struct WikidataClient {
    http: HttpClient,
    api: String,
    lang: String,
}

impl std::fmt::Debug for WikidataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikidataClient")
            .field("api", &self.api)
            .field("lang", &self.lang)
            .finish()
    }
}

impl WikidataClient {
    /// Creates a client for `api`; search and labels use `lang`.
    pub fn new(
        api: impl Into<String>,
        lang: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> LookupResult<Self> {
        Ok(Self {
            http: build_client(timeout, user_agent)?,
            api: api.into(),
            lang: lang.into(),
        })
    }

    /// Creates a client from the Wikidata endpoint and native language in `config`.
    pub fn from_config(config: &Config) -> LookupResult<Self> {
        Self::new(
            config.wikidata_api.clone(),
            config.native_lang.clone(),
            config.http_timeout,
            &config.user_agent,
        )
    }

    async fn get_entity(&self, id: &str, props: &str) -> LookupResult<Entity> {
        let languages = format!("{}|{}", self.lang, LABEL_FALLBACK_LANG);
        let resp: EntitiesResponse = get_json(
            &self.http,
            &self.api,
            &[
                ("action", "wbgetentities"),
                ("ids", id),
                ("props", props),
                ("languages", &languages),
                ("format", "json"),
            ],
        )
        .await?;
        check_api_error(resp.error, SERVICE)?;

        let mut entities = resp.entities;
        entities
            .remove(id)
            .filter(|entity| entity.missing.is_none())
            .ok_or_else(|| LookupError::EntityNotFound {
                query: id.to_string(),
            })
    }
}

#[async_trait]
impl KnowledgeGraph for WikidataClient {
    async fn search_entities(&self, text: &str, limit: u32) -> LookupResult<Vec<String>> {
        let limit = limit.to_string();
        let resp: SearchResponse = get_json(
            &self.http,
            &self.api,
            &[
                ("action", "wbsearchentities"),
                ("search", text),
                ("language", &self.lang),
                ("uselang", &self.lang),
                ("type", "item"),
                ("limit", &limit),
                ("format", "json"),
            ],
        )
        .await?;
        check_api_error(resp.error, SERVICE)?;

        debug!(query = text, hits = resp.search.len(), "Wikidata entity search");
        Ok(resp.search.into_iter().map(|hit| hit.id).collect())
    }

    async fn attribute_label(&self, entity: &str, property: &str) -> LookupResult<String> {
        let subject = self.get_entity(entity, "claims").await?;

        let target = subject
            .claims
            .get(property)
            .and_then(|claims| select_claim_target(claims))
            .ok_or_else(|| LookupError::MissingAttribute {
                entity: entity.to_string(),
                property: property.to_string(),
            })?;

        let target_entity = self.get_entity(&target, "labels").await?;
        pick_label(&target_entity.labels, &self.lang)
            .ok_or(LookupError::MissingLabel { entity: target })
    }
}

/// Entity id the claim list points at.
///
/// Prefers a `preferred`-rank claim (Wikidata's marker for the current value), then the
/// first claim that is not `deprecated`.
pub fn select_claim_target(claims: &[Claim]) -> Option<String> {
    claims
        .iter()
        .find(|claim| claim.rank == "preferred")
        .and_then(Claim::target_id)
        .or_else(|| {
            claims
                .iter()
                .filter(|claim| claim.rank != "deprecated")
                .find_map(Claim::target_id)
        })
}

/// Label in `lang`, then English, then the alphabetically-first language available.
pub fn pick_label(labels: &HashMap<String, Label>, lang: &str) -> Option<String> {
    labels
        .get(lang)
        .or_else(|| labels.get(LABEL_FALLBACK_LANG))
        .or_else(|| {
            labels
                .iter()
                .min_by(|a, b| a.0.cmp(b.0))
                .map(|(_, label)| label)
        })
        .map(|label| label.value.clone())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct EntitiesResponse {
    #[serde(default)]
    entities: HashMap<String, Entity>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct Entity {
    #[serde(default)]
    claims: HashMap<String, Vec<Claim>>,
    #[serde(default)]
    labels: HashMap<String, Label>,
    missing: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
/// One statement about an entity.
pub struct Claim {
    pub mainsnak: Snak,
    #[serde(default)]
    pub rank: String,
}

impl Claim {
    fn target_id(&self) -> Option<String> {
        let value = &self.mainsnak.datavalue.as_ref()?.value;
        if let Some(id) = value.get("id").and_then(Value::as_str) {
            return Some(id.to_string());
        }
        value
            .get("numeric-id")
            .and_then(Value::as_u64)
            .map(|n| format!("Q{n}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snak {
    pub datavalue: Option<DataValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataValue {
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub value: String,
}
