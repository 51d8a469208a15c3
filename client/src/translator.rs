//! Turns logical API calls into HTTP round trips.
//!
//! Every operation issues exactly one request through the injected
//! [`HttpTransport`]. A 2xx response is the success path; any other status
//! becomes [`ClientError::Api`] carrying the payload built by [`to_error`].

use crate::{
    http::{HEADER_CONTENT_RANGE, HEADER_CONTENT_TYPE},
    query::build_query_string,
    ApiError, ByteRange, ClientError, Content, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, Options, Result,
};
use std::{fmt, sync::Arc};

use serde::Deserialize;

static NO_CONTENT_RETURNED: &'static str = "No content returned";

#[derive(Clone)]
pub struct RequestTranslator {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for RequestTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestTranslator")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RequestTranslator {
    pub fn new(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and deserialize the body as `T`.
    pub async fn fetch_resource<T>(&self, path: &str, options: Option<&dyn Options>) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = self.request(HttpMethod::GET, &build_query_string(path, options));
        let response = self.execute(request).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// POST to `path` with an empty body and deserialize the body as `T`.
    pub async fn submit<T>(&self, path: &str, options: Option<&dyn Options>) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.submit_raw(path, options, None).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// POST to `path` and hand back the raw response, e.g. to read `Location`.
    ///
    /// A `None` body is sent as an empty payload.
    pub async fn submit_raw(
        &self,
        path: &str,
        options: Option<&dyn Options>,
        body: Option<Content>,
    ) -> Result<HttpResponse> {
        let mut request = self.request(HttpMethod::POST, &build_query_string(path, options));
        match body {
            Some(content) => {
                request
                    .headers
                    .insert(HEADER_CONTENT_TYPE.to_string(), content.media_type);
                request.body = Some(content.data);
            }
            None => request.body = Some(Vec::new()),
        }
        self.execute(request).await
    }

    /// POST one chunk of a larger payload, tagged with its byte range.
    pub async fn submit_range(
        &self,
        path: &str,
        content: Vec<u8>,
        range: ByteRange,
    ) -> Result<HttpResponse> {
        let mut request = self.request(HttpMethod::POST, path);
        request
            .headers
            .insert(HEADER_CONTENT_RANGE.to_string(), range.header_value());
        request.headers.insert(
            HEADER_CONTENT_TYPE.to_string(),
            "application/octet-stream".to_string(),
        );
        request.body = Some(content);
        self.execute(request).await
    }

    /// DELETE `path`; the acknowledgement is the reason phrase.
    pub async fn delete_resource(&self, path: &str) -> Result<String> {
        let request = self.request(HttpMethod::DELETE, path);
        let response = self.execute(request).await?;
        Ok(response.reason)
    }

    fn request(&self, method: HttpMethod, path_and_query: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.base_url, path_and_query))
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = response.status, reason = %response.reason, "request failed");
        Err(ClientError::Api {
            status: response.status,
            error: to_error(&response),
        })
    }
}

/// Build the error payload for a non-success response. Never fails.
///
/// An empty declared body yields a synthetic payload, a JSON error body is
/// returned as sent, and anything else falls back to the raw body text.
pub fn to_error(response: &HttpResponse) -> ApiError {
    if response.content_length == Some(0) {
        return ApiError {
            code: response.status as i32,
            message: response.reason.clone(),
            more_info: NO_CONTENT_RETURNED.to_string(),
        };
    }

    match serde_json::from_slice::<ApiError>(&response.body) {
        Ok(error) => error,
        Err(err) => {
            tracing::trace!(error = %err, "error body is not structured JSON");
            ApiError {
                code: response.status as i32,
                message: response.reason.clone(),
                more_info: response.text(),
            }
        }
    }
}
