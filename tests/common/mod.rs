//! Common test utilities for integration tests
#![allow(dead_code)]

use ga_store::{
    BlobTransport, CalendarStore, HttpResponse, RemoteBlob, RemoteError, SettingsSource, TreeStore,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ENDPOINT: &str = "https://bins.test/v3/b";
pub const TREE_BIN: &str = "tree-bin";
pub const WEEK_BIN: &str = "week-bin";
pub const API_KEY: &str = "secret-key";

/// A request seen by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: &'static str,
    pub url: String,
    pub api_key: String,
    pub body: Option<String>,
}

/// In-memory transport replaying queued responses and recording requests
#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, RemoteError>>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, status: u16, reason: &str, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        }));
    }

    pub fn push_json(&self, body: serde_json::Value) {
        self.push_response(200, "OK", &body.to_string());
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(RemoteError::Transport(message.to_string())));
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, request: Request) -> Result<HttpResponse, RemoteError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Transport("no response queued".to_string())))
    }
}

impl BlobTransport for FakeTransport {
    async fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse, RemoteError> {
        self.next(Request {
            method: "GET",
            url: url.to_string(),
            api_key: api_key.to_string(),
            body: None,
        })
    }

    async fn put(&self, url: &str, api_key: &str, body: String) -> Result<HttpResponse, RemoteError> {
        self.next(Request {
            method: "PUT",
            url: url.to_string(),
            api_key: api_key.to_string(),
            body: Some(body),
        })
    }
}

pub fn tree_store(transport: &Arc<FakeTransport>) -> TreeStore<Arc<FakeTransport>> {
    TreeStore::with_remote(RemoteBlob::new(
        transport.clone(),
        SettingsSource::fixed(ENDPOINT, Some(TREE_BIN), Some(API_KEY)),
    ))
}

pub fn calendar_store(transport: &Arc<FakeTransport>) -> CalendarStore<Arc<FakeTransport>> {
    CalendarStore::with_remote(RemoteBlob::new(
        transport.clone(),
        SettingsSource::fixed(ENDPOINT, Some(WEEK_BIN), Some(API_KEY)),
    ))
}

/// Register an observer counting its calls
pub fn count_notifications<T: BlobTransport>(store: &mut TreeStore<T>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    store.register_observer(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    count
}

pub fn notifications(count: &Arc<AtomicUsize>) -> usize {
    count.load(Ordering::SeqCst)
}
