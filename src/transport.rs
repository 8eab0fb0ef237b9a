//! HTTP boundary.
//!
//! The client never talks to `reqwest` directly; it hands a fully built
//! [`TransportRequest`] to a [`Transport`] and interprets the status and
//! body it gets back. Retry policy, TLS and connection handling live here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{PretixError, Result};

const USER_AGENT: &str = concat!("pretixapi/", env!("CARGO_PKG_VERSION"));

/// One HTTP request with a JSON body.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Status, headers and raw body of an HTTP response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends requests to the pretix instance.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send one request and wait for its response.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails. Non-2xx statuses are not
    /// errors at this level.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Default transport backed by a `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(PretixError::HttpError)?;

        Ok(Self { http })
    }

    /// Wrap an already configured `reqwest` client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(PretixError::HttpError)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(PretixError::HttpError)?;

        Ok(TransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
