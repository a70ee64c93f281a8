pub mod reqwest_executor;

use std::fmt::Write;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Method, StatusCode, Url};
use thiserror::Error;

pub use reqwest_executor::ReqwestExecutor;

/// A fully built request, ready to be sent as is.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response with its body already read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// The connection could not be made or the exchange broke off midway.
#[derive(Debug, Error, PartialEq, Clone)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Performs one HTTP round trip.
///
/// Timeouts, TLS and proxying belong to the implementation; the client
/// only hands over a finished request and reads back the response. An
/// implementation shared between tasks must be safe for concurrent use.
#[async_trait]
pub trait HttpExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl ApiRequest {
    /// Request line, headers and body, as they go out.
    pub fn dump(&self) -> String {
        let mut out = format!("{} {} HTTP/1.1\n", self.method, self.url);
        if let Some(host) = self.url.host_str() {
            let _ = writeln!(out, "host: {host}");
        }
        dump_headers(&mut out, &self.headers);
        if let Some(body) = &self.body {
            out.push('\n');
            out.push_str(&String::from_utf8_lossy(body));
        }
        out
    }
}

impl ApiResponse {
    /// Status line, headers and body, as they came in.
    pub fn dump(&self) -> String {
        let mut out = format!("HTTP/1.1 {}\n", self.status);
        dump_headers(&mut out, &self.headers);
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(&self.body));
        out
    }
}

fn dump_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = writeln!(out, "{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
}
