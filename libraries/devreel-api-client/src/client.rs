//! Main Devreel API client.

use crate::error::{ApiClientError, Result};
use crate::types::ApiConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Client for the Devreel REST API.
///
/// Implements [`FeedApi`](devreel_core::FeedApi),
/// [`FollowApi`](devreel_core::FollowApi) and
/// [`ProfileApi`](devreel_core::ProfileApi).
///
/// # Example
///
/// ```ignore
/// use devreel_api_client::{ApiClient, ApiConfig};
/// use devreel_core::{FeedApi, FeedList};
///
/// let client = ApiClient::new(ApiConfig::new("https://devreel.dev").with_token("t0k3n"))?;
/// let posts = client.fetch(&FeedList::Home).await?;
/// println!("{} posts", posts.len());
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    access_token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let trimmed = config.base_url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).map_err(|e| ApiClientError::InvalidUrl(e.to_string()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::InvalidUrl(format!("{} cannot be a base URL", trimmed)));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Devreel/{} (Web)", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(base_url = %base_url, "API client ready");

        Ok(Self {
            http,
            base_url,
            access_token: Arc::new(RwLock::new(config.access_token)),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Set the token used for subsequent requests.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.access_token.write().await = Some(token.into());
    }

    /// Clear the stored token (logout).
    pub async fn clear_token(&self) {
        *self.access_token.write().await = None;
        info!("Cleared API token");
    }

    /// Build an endpoint URL from path segments. Segments are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::InvalidUrl("base URL cannot hold a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.http.get(url)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.http.post(url)
    }

    pub(crate) fn patch(&self, url: Url) -> RequestBuilder {
        self.http.patch(url)
    }

    pub(crate) fn delete(&self, url: Url) -> RequestBuilder {
        self.http.delete(url)
    }

    /// Attach the token, send, and turn non-2xx statuses into errors.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.access_token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiClientError::ServerUnreachable(e.to_string())
            } else {
                ApiClientError::Request(e)
            }
        })?;

        check_status(response).await
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| ApiClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let message = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), url = %url, "Request failed");

    match status.as_u16() {
        401 => Err(ApiClientError::AuthRequired),
        403 => Err(ApiClientError::Forbidden(message)),
        404 => Err(ApiClientError::NotFound(url)),
        code => Err(ApiClientError::ServerError {
            status: code,
            message,
        }),
    }
}
