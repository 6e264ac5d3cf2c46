//! Remote blob synchronization
//!
//! Both stores mirror their whole state into a JSON bin:
//! - `GET {endpoint}/{bin}/latest` with `X-Master-Key` returns `{"record": ...}`
//! - `PUT {endpoint}/{bin}` with `X-Master-Key` and a JSON body replaces it
//!
//! The HTTP round trip sits behind [`BlobTransport`] so the protocol can be
//! exercised without a network.

use crate::config::SettingsSource;
use crate::error::RemoteError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// Header carrying the bin credential
pub const MASTER_KEY_HEADER: &str = "X-Master-Key";

/// Status line and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP exchange with the document store
///
/// Implementations report connection-level failures as
/// [`RemoteError::Transport`]; any completed exchange, whatever its status,
/// is an `Ok` response.
pub trait BlobTransport {
    fn get(
        &self,
        url: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send;

    fn put(
        &self,
        url: &str,
        api_key: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send;
}

impl<T: BlobTransport> BlobTransport for Arc<T> {
    fn get(
        &self,
        url: &str,
        api_key: &str,
    ) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send {
        (**self).get(url, api_key)
    }

    fn put(
        &self,
        url: &str,
        api_key: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, RemoteError>> + Send {
        (**self).put(url, api_key, body)
    }
}

/// [`BlobTransport`] backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, RemoteError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

impl BlobTransport for HttpTransport {
    async fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse, RemoteError> {
        let response = self
            .client
            .get(url)
            .header(MASTER_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Self::read(response).await
    }

    async fn put(&self, url: &str, api_key: &str, body: String) -> Result<HttpResponse, RemoteError> {
        let response = self
            .client
            .put(url)
            .header(MASTER_KEY_HEADER, api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Self::read(response).await
    }
}

/// A single remote bin plus the way to reach it
#[derive(Debug, Clone)]
pub struct RemoteBlob<T = HttpTransport> {
    transport: T,
    settings: SettingsSource,
}

impl RemoteBlob<HttpTransport> {
    /// Bin reached over HTTP with the given settings
    pub fn http(settings: SettingsSource) -> Self {
        Self::new(HttpTransport::new(), settings)
    }
}

impl<T: BlobTransport> RemoteBlob<T> {
    pub fn new(transport: T, settings: SettingsSource) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Fetch the latest record and decode it
    ///
    /// Settings are checked first; when they are incomplete no request is made.
    pub async fn fetch<R: DeserializeOwned>(&self) -> Result<R, RemoteError> {
        let settings = self.settings.resolve()?;
        let response = self
            .transport
            .get(&settings.latest_url(), &settings.api_key)
            .await?;

        if !response.is_success() {
            return Err(RemoteError::Status {
                status: response.status,
                reason: response.reason,
            });
        }

        let envelope: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|_| RemoteError::InvalidResponse)?;
        // Both stores keep a JSON object; scalars, empty or not, are not a record.
        let record = match envelope.get("record") {
            Some(record) if record.is_object() || record.is_array() => record.clone(),
            _ => return Err(RemoteError::InvalidResponse),
        };

        serde_json::from_value(record).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// Replace the remote record with `state`
    pub async fn replace<S: Serialize>(&self, state: &S) -> Result<(), RemoteError> {
        let settings = self.settings.resolve()?;
        let body = serde_json::to_string(state).map_err(|e| RemoteError::Encode(e.to_string()))?;
        let response = self
            .transport
            .put(&settings.bin_url(), &settings.api_key, body)
            .await?;

        if !response.is_success() {
            return Err(RemoteError::Status {
                status: response.status,
                reason: response.reason,
            });
        }
        Ok(())
    }
}
