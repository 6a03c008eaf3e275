//! HTTP transport shared by the users repository and the demo data source.
//!
//! Successful responses come back as an [`Envelope`]; every failure is turned
//! into a [`TransportError`]. When the server answers with a JSON body that has
//! a string `detail` field, that text becomes the error message.

pub mod test_data;
pub mod users;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::TransportError;

/// Payload of a successful response together with its HTTP status.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub status: u16,
}

/// Thin wrapper over a configured `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send one request. `body`, when present, is sent as JSON.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.api_url(path);
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let result = self.exchange(builder).await;
        match &result {
            Ok(envelope) => tracing::debug!(%method, %url, status = envelope.status, "request succeeded"),
            Err(err) => tracing::warn!(%method, %url, status = err.status, error = %err.message, "request failed"),
        }
        result
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, TransportError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<Envelope<T>, TransportError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, TransportError> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, TransportError> {
        // Connection-level failures carry no status and map to 0.
        let response = builder.send().await?;
        let status = response.status();
        // The timeout also covers the body. A body that never completes is
        // no response at all, whatever the status line said.
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::new(format!("request timed out after {:?}", self.config.timeout), 0)
            } else {
                TransportError::from(e)
            }
        })?;

        if !status.is_success() {
            return Err(http_failure(status, &bytes));
        }

        let data = decode_body(&bytes).map_err(|e| {
            TransportError::new(format!("invalid response body: {e}"), status.as_u16())
        })?;
        Ok(Envelope {
            data,
            status: status.as_u16(),
        })
    }
}

/// An empty body decodes as JSON `null`, so `()` and `Option<_>` accept it.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"null")
    } else {
        serde_json::from_slice(bytes)
    }
}

fn http_failure(status: StatusCode, bytes: &[u8]) -> TransportError {
    let details: Option<serde_json::Value> = serde_json::from_slice(bytes).ok();
    let message = details
        .as_ref()
        .and_then(|body| body.get("detail"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("request failed with status code {}", status.as_u16()));

    let err = TransportError::new(message, status.as_u16());
    match details {
        Some(details) => err.with_details(details),
        None => err,
    }
}
