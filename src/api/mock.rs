use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::api::{ApiRequest, McssTransport, RawResponse};
use crate::error::{McssApiError, Result};

/// Scripted transport for tests: plays back queued responses in order and
/// records every request it was asked to execute.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<RwLock<VecDeque<RawResponse>>>,
    requests: Arc<RwLock<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: &str) -> Self {
        self.push_response(status, body);
        self
    }

    pub fn push_response(&self, status: u16, body: &str) {
        self.responses.write().unwrap().push_back(RawResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.read().unwrap().last().cloned()
    }
}

#[async_trait]
impl McssTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.write().unwrap().push(request);
        self.responses
            .write()
            .unwrap()
            .pop_front()
            .ok_or_else(|| McssApiError::Connection("mock transport queue is empty".to_string()))
    }
}
