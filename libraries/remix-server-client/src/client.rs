//! Main remix server client.

use crate::config::ClientConfig;
use crate::error::{Result, ServerClientError};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

/// Client for the remix server API.
///
/// Implements [`CatalogService`](remix_core::CatalogService),
/// [`LikesService`](remix_core::LikesService) and
/// [`HistoryService`](remix_core::HistoryService), so it can be handed to a
/// player session as-is.
///
/// # Example
///
/// ```ignore
/// use remix_server_client::{ClientConfig, RemixServerClient};
///
/// let client = RemixServerClient::new(ClientConfig::load()?)?;
/// let remixes = client.get_remixes().await?;
/// println!("Found {} remixes", remixes.len());
/// ```
#[derive(Clone)]
pub struct RemixServerClient {
    http: Client,
    base_url: String,
    access_token: Arc<RwLock<Option<String>>>,
}

impl RemixServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.normalized_url()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("RamRemixHub/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        Ok(Self {
            http,
            base_url,
            access_token: Arc::new(RwLock::new(config.access_token)),
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Set the bearer token (e.g. after the host signs in).
    pub async fn set_access_token(&self, token: impl Into<String>) {
        *self.access_token.write().await = Some(token.into());
    }

    /// Clear the bearer token (logout).
    pub async fn clear_access_token(&self) {
        *self.access_token.write().await = None;
        info!("Cleared access token");
    }

    pub(crate) async fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.endpoint(path))).await
    }

    pub(crate) async fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.endpoint(path))).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.access_token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Send a request and turn non-2xx answers into errors.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ServerClientError::ServerUnreachable(e.to_string())
        } else {
            ServerClientError::Request(e)
        }
    })?;

    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED {
        Err(ServerClientError::AuthRequired)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

/// Decode a JSON body, naming `what` in the parse error.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ServerClientError::ServerUnreachable(e.to_string())
        } else {
            ServerClientError::Request(e)
        }
    })?;

    serde_json::from_str(&body)
        .map_err(|e| ServerClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
