//! Production Miro REST client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ApiError, ApiRequest, FileUpload};
use crate::core::config::{ApiConfig, CredentialsConfig};

/// The remote whiteboard API as seen by tool handlers.
///
/// Implementations must be safe to share across concurrent invocations.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Execute one request and return the decoded JSON body.
    ///
    /// An empty success body (e.g. `204 No Content`) decodes to `Value::Null`.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// reqwest-backed [`BoardApi`] authenticating with a bearer token.
///
/// Constructed once at startup and shared through the tool context.
#[derive(Clone)]
pub struct MiroClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for MiroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiroClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl MiroClient {
    /// Build a client from configuration. No network I/O happens here.
    pub fn new(api: &ApiConfig, credentials: &CredentialsConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&api.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", api.base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(api.base_url.clone()));
        }

        let http = Client::builder()
            .user_agent(concat!("mcp-miro/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: credentials.miro_access_token.clone(),
        })
    }

    /// Whether an access token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        Ok(url)
    }

    fn attach_body(
        builder: RequestBuilder,
        request: ApiRequest,
    ) -> Result<RequestBuilder, ApiError> {
        if let Some(FileUpload {
            file_name,
            bytes,
            data,
        }) = request.upload
        {
            let data_part = Part::text(data.to_string()).mime_str("application/json")?;
            let file_part = Part::bytes(bytes).file_name(file_name);
            let form = Form::new().part("data", data_part).part("resource", file_part);
            return Ok(builder.multipart(form));
        }

        Ok(match request.body {
            Some(body) => builder.json(&body),
            None => builder,
        })
    }
}

#[async_trait]
impl BoardApi for MiroClient {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path()))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        let url = self.url_for(&request)?;

        let builder = self
            .http
            .request(request.method.clone(), url)
            .bearer_auth(token)
            .query(&request.query);
        let builder = Self::attach_body(builder, request)?;

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("Miro responded {} ({} bytes)", status, text.len());

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
