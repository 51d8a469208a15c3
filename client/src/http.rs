//! Transport seam between the request translator and the network.
//!
//! Requests and responses are plain data so the translator can be driven by
//! any [`HttpTransport`]. [`ReqwestTransport`] is the default implementation.

use crate::{ClientConfig, ClientError, Credentials, Result};
use std::{collections::HashMap, fmt};

use futures::future::BoxFuture;

pub static HEADER_CONTENT_TYPE: &'static str = "Content-Type";
pub static HEADER_CONTENT_RANGE: &'static str = "Content-Range";
pub static HEADER_LOCATION: &'static str = "Location";

/// Executes a single HTTP round trip.
///
/// Implementations must hand back non-success responses as `Ok`; only
/// connection-level failures are errors.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: HashMap<String, String>,
    /// Length declared by the server, `None` when not declared (e.g. chunked).
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// A request body together with its media type.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl Content {
    pub fn new<S: Into<String>>(media_type: S, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    pub fn octet_stream(data: Vec<u8>) -> Self {
        Self::new("application/octet-stream", data)
    }
}

/// Inclusive byte range of a chunk within a larger upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
    total: Option<u64>,
}

impl ByteRange {
    pub fn new(start: u64, end: u64, total: Option<u64>) -> Result<Self> {
        if end < start {
            return Err(ClientError::InvalidRange(format!(
                "end {} precedes start {}",
                end, start
            )));
        }
        if let Some(total) = total {
            if end >= total {
                return Err(ClientError::InvalidRange(format!(
                    "end {} outside total length {}",
                    end, total
                )));
            }
        }
        Ok(Self { start, end, total })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Value for the `Content-Range` header, e.g. `bytes 0-999/5000`.
    pub fn header_value(&self) -> String {
        match self.total {
            Some(total) => format!("bytes {}-{}/{}", self.start, self.end, total),
            None => format!("bytes {}-{}/*", self.start, self.end),
        }
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            credentials: config.credentials.clone(),
        })
    }

    /// Wrap an existing client, e.g. one shared with the rest of the process.
    pub fn from_client(client: reqwest::Client, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::GET => reqwest::Method::GET,
                HttpMethod::POST => reqwest::Method::POST,
                HttpMethod::DELETE => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(credentials) = &self.credentials {
                builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let content_length = response.content_length();
            let reason = reason_phrase(&response);
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
            let body = response.bytes().await?.to_vec();

            Ok(HttpResponse {
                status: status.as_u16(),
                reason,
                headers,
                content_length,
                body,
            })
        })
    }
}

/// Reason phrase as sent by the server. hyper only records it when it
/// differs from the canonical phrase for the status.
fn reason_phrase(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
        .or_else(|| response.status().canonical_reason().map(str::to_string))
        .unwrap_or_default()
}
