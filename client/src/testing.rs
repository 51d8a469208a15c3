//! In-memory transport for unit tests.

use crate::{ClientError, HttpRequest, HttpResponse, HttpTransport, Result};
use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use futures::future::BoxFuture;

/// Records every request and replies from a queue of canned outcomes.
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    replies: Mutex<VecDeque<Result<HttpResponse>>>,
}

impl MockTransport {
    pub fn replying(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(responses.into_iter().map(Ok).collect()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::from(vec![Err(ClientError::Http(
                message.to_string(),
            ))])),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse>> {
        self.requests.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Http("no canned response left".to_string())));
        Box::pin(async move { reply })
    }
}

/// Response with the given status, reason and body; the declared length
/// matches the body.
pub fn response(status: u16, reason: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        reason: reason.to_string(),
        headers: HashMap::new(),
        content_length: Some(body.len() as u64),
        body: body.as_bytes().to_vec(),
    }
}

/// Successful response carrying a `Location` header and no body.
pub fn created(location: &str) -> HttpResponse {
    let mut created = response(201, "Created", "");
    created
        .headers
        .insert("Location".to_string(), location.to_string());
    created
}
