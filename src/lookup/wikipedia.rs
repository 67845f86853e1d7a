//! Encyclopedia access backed by the MediaWiki action API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{LookupError, LookupResult};
use super::http::{ApiError, build_client, check_api_error, get_json};
use crate::config::Config;
use crate::constants::{LANG_PLACEHOLDER, SEARCH_RESULT_LIMIT};

const SERVICE: &str = "wikipedia";

#[async_trait]
/// Full-text search and article summaries, per language edition.
pub trait Encyclopedia: Send + Sync {
    /// Candidate article titles for `query`, in the service's ranking order.
    async fn search(&self, query: &str, lang: &str) -> LookupResult<Vec<String>>;

    /// First `sentences` sentences of the article titled exactly `title`.
    ///
    /// Does not follow redirects or guess alternative titles.
    async fn summary(&self, title: &str, lang: &str, sentences: u32) -> LookupResult<String>;
}

/// Wikipedia client for any language edition.
pub struct WikipediaClient {
    http: HttpClient,
    api_template: String,
}

impl std::fmt::Debug for WikipediaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikipediaClient")
            .field("api_template", &self.api_template)
            .finish()
    }
}

impl WikipediaClient {
    /// Creates a client; `api_template` must contain `{lang}`.
    pub fn new(
        api_template: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> LookupResult<Self> {
        Ok(Self {
            http: build_client(timeout, user_agent)?,
            api_template: api_template.into(),
        })
    }

    pub fn from_config(config: &Config) -> LookupResult<Self> {
        Self::new(
            config.wikipedia_api.clone(),
            config.http_timeout,
            &config.user_agent,
        )
    }

    fn endpoint(&self, lang: &str) -> String {
        self.api_template.replace(LANG_PLACEHOLDER, lang)
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    async fn search(&self, query: &str, lang: &str) -> LookupResult<Vec<String>> {
        let limit = SEARCH_RESULT_LIMIT.to_string();
        let resp: SearchResponse = get_json(
            &self.http,
            &self.endpoint(lang),
            &[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", &limit),
                ("srprop", ""),
                ("format", "json"),
                ("formatversion", "2"),
            ],
        )
        .await?;
        check_api_error(resp.error, SERVICE)?;

        let titles: Vec<String> = resp
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default();

        debug!(lang, query, hits = titles.len(), "Wikipedia search");
        Ok(titles)
    }

    async fn summary(&self, title: &str, lang: &str, sentences: u32) -> LookupResult<String> {
        let sentences = sentences.to_string();
        let resp: ExtractResponse = get_json(
            &self.http,
            &self.endpoint(lang),
            &[
                ("action", "query"),
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("explaintext", "1"),
                ("exsentences", &sentences),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
            ],
        )
        .await?;
        check_api_error(resp.error, SERVICE)?;

        let page = resp
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| LookupError::PageNotFound {
                title: title.to_string(),
            })?;

        page.into_summary(title)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Default, Deserialize)]
/// A page entry from `prop=extracts|pageprops` (formatversion 2).
pub struct Page {
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    pub extract: Option<String>,
    pub pageprops: Option<Map<String, Value>>,
}

impl Page {
    /// Turns the page into summary text or the reason there is none.
    pub fn into_summary(self, title: &str) -> LookupResult<String> {
        if self.missing || self.invalid {
            return Err(LookupError::PageNotFound {
                title: title.to_string(),
            });
        }

        if self
            .pageprops
            .as_ref()
            .is_some_and(|props| props.contains_key("disambiguation"))
        {
            return Err(LookupError::Disambiguation {
                title: title.to_string(),
            });
        }

        match self.extract.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(LookupError::EmptySummary {
                title: title.to_string(),
            }),
        }
    }
}
