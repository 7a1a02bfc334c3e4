//! In-memory transport for unit tests.

use async_trait::async_trait;
use rush_types::{
    HttpTransport, RushError, TransportRequest, TransportResponse, traits::Result,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// Records every request and replays queued responses in order.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &'static str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body)));
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body.to_string())));
    }

    pub fn fail(&self, err: RushError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RushError::Http("no response queued".into())))
    }
}
