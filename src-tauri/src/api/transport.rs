use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::PortalConfig;
use crate::error::{PortalError, GENERIC_FAILURE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// One call against the REST backend. `path` is relative to the API base.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Sends requests to the backend and hands back the decoded JSON body.
///
/// Implementations map transport failures to `PortalError::Network` and
/// non-2xx responses to `PortalError::Server`, extracting the message with
/// [`error_message`]. Tests substitute a scripted implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, PortalError>;
}

/// reqwest-backed transport used by the running app.
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(config: &PortalConfig) -> Result<Self, PortalError> {
        let base = config.base_url()?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PortalError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, base })
    }

    fn url_for(&self, path: &str) -> Result<Url, PortalError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| PortalError::Config(format!("Invalid request path '{}': {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, PortalError> {
        let url = self.url_for(&request.path)?;
        debug!("{:?} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| PortalError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "{:?} {} returned {}: {}",
                request.method, request.path, status, body
            );
            return Err(PortalError::Server {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pull the human-readable message out of an error body.
///
/// Looks at `detail` first, then `message`. A `detail` list (request
/// validation errors) yields the first entry's `msg`. Anything else gives
/// [`GENERIC_FAILURE`].
pub fn error_message(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return GENERIC_FAILURE.to_string(),
    };

    let from_field = |field: &str| -> Option<String> {
        match value.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string()),
            _ => None,
        }
    };

    from_field("detail")
        .or_else(|| from_field("message"))
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
