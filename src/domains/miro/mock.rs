//! Recording [`BoardApi`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ApiError, ApiRequest, BoardApi};

type Responder = Box<dyn Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync>;

/// Records every request and answers through a scripted responder.
pub struct MockApi {
    requests: Mutex<Vec<ApiRequest>>,
    responder: Responder,
}

impl MockApi {
    /// Answers every call with `{"id": "mock-id", "path": <request path>}`.
    pub fn new() -> Self {
        Self::with_responder(|request| Ok(json!({ "id": "mock-id", "path": request.path() })))
    }

    /// Answers every call with a clone of `value`.
    pub fn returning(value: Value) -> Self {
        Self::with_responder(move |_| Ok(value.clone()))
    }

    /// Fails every call with a remote status error.
    pub fn failing(status: u16, body: Value) -> Self {
        Self::with_responder(move |_| {
            Err(ApiError::Status {
                status,
                body: body.clone(),
            })
        })
    }

    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl BoardApi for MockApi {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let response = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}
