#![doc = include_str!("../README.md")]

pub use crate::client::{Account, Documents, Inbound, InterfaxClient, Outbound};
pub use crate::config::{ClientConfig, Credentials};
pub use crate::http::{
    ByteRange, Content, HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
};
pub use crate::options::*;
pub use crate::query::{build_query_string, Options, QueryParams};
pub use crate::responses::*;
pub use crate::translator::{to_error, RequestTranslator};

pub mod client;
pub mod config;
pub mod http;
pub mod options;
pub mod query;
pub mod responses;
pub mod translator;

#[cfg(test)]
mod testing;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid byte range: {0}")]
    InvalidRange(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    #[error("API error (HTTP {status}): {error}")]
    Api { status: u16, error: ApiError },
}

impl ClientError {
    /// HTTP status of an API failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured error payload of an API failure, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
