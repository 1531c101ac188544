/**
 * Upstream API Client
 *
 * Thin JSON client effects use to load page data. The visitor's cookie
 * header is forwarded unchanged so the upstream sees the same session.
 *
 * Failures map onto [`EffectError`] and from there onto the request's
 * result code:
 *
 * - non-2xx answer: the upstream status
 * - no answer at all: 502
 * - body that is not the expected JSON: 500
 */

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::backend::render::effects::EffectError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("ssr-render/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the body as `T`
    pub async fn get_json<T>(&self, path: &str, cookie: &str) -> Result<T, EffectError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.http.get(&url);
        if !cookie.is_empty() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "upstream returned an error");
            return Err(EffectError::Upstream {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        tracing::debug!(%url, bytes = body.len(), "upstream response decoded");
        Ok(value)
    }
}
