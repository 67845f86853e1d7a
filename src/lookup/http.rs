//! Shared HTTP plumbing for the MediaWiki-family APIs.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::{LookupError, LookupResult};

/// Builds a client with a per-request timeout and an identifying user agent.
///
/// Wikimedia rejects anonymous default agents, so the agent is mandatory.
pub fn build_client(timeout: Duration, user_agent: &str) -> LookupResult<HttpClient> {
    HttpClient::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(LookupError::Client)
}

/// `GET url?params` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(
    http: &HttpClient,
    url: &str,
    params: &[(&str, &str)],
) -> LookupResult<T> {
    let resp = http
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|source| LookupError::Request {
            url: url.to_string(),
            source,
        })?;

    if !resp.status().is_success() {
        return Err(LookupError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    resp.json::<T>().await.map_err(|source| LookupError::Request {
        url: url.to_string(),
        source,
    })
}

/// `{"error": {"code": ..., "info": ...}}` envelope returned with HTTP 200.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl ApiError {
    pub fn into_lookup_error(self, service: &'static str) -> LookupError {
        LookupError::Service {
            service,
            code: self.code,
            info: self.info,
        }
    }
}

/// Fails with the envelope's error when one is present.
pub fn check_api_error(error: Option<ApiError>, service: &'static str) -> LookupResult<()> {
    match error {
        Some(error) => Err(error.into_lookup_error(service)),
        None => Ok(()),
    }
}
