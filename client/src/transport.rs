//! The network boundary: executes a core `HttpRequest` and returns the raw
//! `HttpResponse`.
//!
//! # Design
//! `Transport` is the only place the facade suspends. Implementations collect
//! the whole body before returning and report connection failures as `Err`;
//! status codes are never treated as errors here, classification belongs to
//! `push_notifications_core::response`.

use std::future::Future;
use std::time::Duration;

use push_notifications_core::{BoxError, ClientConfig, HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    /// Send `request` to the endpoint described by `config`.
    fn send(
        &self,
        config: &ClientConfig,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, BoxError>> + Send;
}

/// Default transport backed by a shared `reqwest::Client`.
///
/// No timeout is applied unless one is configured with `with_timeout`; a
/// stalled connection otherwise waits indefinitely.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Fail requests that take longer than `timeout` with a transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        config: &ClientConfig,
        request: HttpRequest,
    ) -> Result<HttpResponse, BoxError> {
        let url = format!("{}{}", config.base_url(), request.path);
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
