use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use thiserror::Error;

use crate::config::ApiConfig;
use crate::token::TokenStore;

use super::auth::build_auth_header;

/// Errors raised while building HTTP clients.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

#[derive(Clone)]
enum Auth {
    None,
    Bearer(Arc<TokenStore>),
}

/// Builds the two client configurations used by the repositories.
///
/// Both share one connection pool. The token store is a constructor
/// argument so there is no process-wide client to configure later.
pub struct HttpClientFactory {
    client: Client,
    base_url: Url,
    tokens: Arc<TokenStore>,
}

impl HttpClientFactory {
    pub fn new(config: &ApiConfig, tokens: Arc<TokenStore>) -> Result<Self, TransportError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Client for sign-in, sign-up and token refresh.
    pub fn unauthenticated(&self) -> ApiClient {
        ApiClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            auth: Auth::None,
        }
    }

    /// Client that signs every request with the stored access token.
    pub fn authenticated(&self) -> ApiClient {
        ApiClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            auth: Auth::Bearer(Arc::clone(&self.tokens)),
        }
    }

    pub fn token_store(&self) -> &Arc<TokenStore> {
        &self.tokens
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw).map_err(|e| TransportError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(TransportError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

/// HTTP client bound to the backend base URL.
///
/// Endpoint methods live in `crate::api`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    auth: Auth,
}

impl ApiClient {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, Auth::Bearer(_))
    }

    /// Start a request to `path` (relative to the base URL).
    ///
    /// The bearer header is resolved here, once per request, so a token
    /// written after the client was built is picked up.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> RequestBuilder {
        let url = self.endpoint(path, query);
        let mut builder = self.client.request(method, url);

        if let Auth::Bearer(tokens) = &self.auth {
            if let Some((name, value)) = build_auth_header(tokens) {
                builder = builder.header(name, value);
            }
        }

        builder
    }

    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }
}
