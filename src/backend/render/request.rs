/**
 * Render Request
 *
 * The parts of an incoming HTTP request a render depends on: the URL being
 * rendered, its query parameters, the raw cookie header and the user agent.
 * Implements `FromRequestParts` so handlers can take it as an argument.
 */

use std::collections::BTreeMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::{header, request::Parts, HeaderMap, StatusCode, Uri};
use serde::Serialize;

use crate::backend::error::BackendError;

/// A query parameter that appeared once or several times
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl QueryValue {
    /// First (or only) value
    pub fn first(&self) -> &str {
        match self {
            Self::Single(value) => value,
            Self::Many(values) => values.first().map(String::as_str).unwrap_or_default(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Many(values) => values.push(value),
            Self::Single(existing) => {
                let first = std::mem::take(existing);
                *self = Self::Many(vec![first, value]);
            }
        }
    }
}

pub type QueryMap = BTreeMap<String, QueryValue>;

/// Group `key=value` pairs, keeping repeated keys as lists
pub fn group_query(pairs: Vec<(String, String)>) -> QueryMap {
    let mut query = QueryMap::new();
    for (key, value) in pairs {
        match query.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                query.insert(key, QueryValue::Single(value));
            }
        }
    }
    query
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Path and query as received
    pub url: String,
    /// Path without the query string
    pub path: String,
    pub query: QueryMap,
    /// Raw `Cookie` header; several headers are joined with `; `
    pub cookie: Option<String>,
    pub user_agent: Option<String>,
}

impl RenderRequest {
    /// Build a request for a URL with no headers
    pub fn new(url: &str) -> Result<Self, BackendError> {
        let uri: Uri = url.parse().map_err(|e| {
            BackendError::handler(StatusCode::BAD_REQUEST, format!("invalid URL {}: {}", url, e))
        })?;
        Self::from_uri_and_headers(&uri, &HeaderMap::new())
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn from_uri_and_headers(uri: &Uri, headers: &HeaderMap) -> Result<Self, BackendError> {
        let url = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).map_err(|e| {
            BackendError::handler(StatusCode::BAD_REQUEST, format!("invalid query string: {}", e))
        })?;

        let cookies: Vec<&str> = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        let cookie = (!cookies.is_empty()).then(|| cookies.join("; "));

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            url,
            path: uri.path().to_string(),
            query: group_query(pairs),
            cookie,
            user_agent,
        })
    }
}

impl<S> FromRequestParts<S> for RenderRequest
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_uri_and_headers(&parts.uri, &parts.headers)
    }
}
