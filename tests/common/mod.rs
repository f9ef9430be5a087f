//! Shared helpers for the HTTP integration tests.
//!
//! Every test builds the real router through [`build_test_app`] and drives it
//! with `tower::ServiceExt::oneshot`, so no port or MongoDB server is needed.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mflix_api::config::AppConfig;
use mflix_api::database::{
    DatabaseError, DocumentStore, InsertResult, MemoryStore, SharedStore, UpdateOutcome,
};
use mflix_api::{build_app_router, AppState};
use mongodb::bson::{oid::ObjectId, Document};
use serde_json::Value;
use tower::ServiceExt;

/// Router over `store` with the development configuration and no request tracing
pub fn build_test_app(store: SharedStore) -> Router {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    build_app_router(AppState::new(store), &config)
}

pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build_test_app(store.clone()), store)
}

pub fn counting_app() -> (Router, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    (build_test_app(store.clone()), store)
}

pub fn failing_app() -> Router {
    build_test_app(Arc::new(FailingStore))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn send_raw(app: Router, method: Method, uri: &str, raw: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

/// Status plus the parsed JSON body (`Value::Null` when the body is empty)
pub async fn call(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send(app, method, uri, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Insert through the API and return the new document's hex id
pub async fn create(app: Router, uri: &str, body: Value) -> String {
    let (status, json) = call(app, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected create response: {json}");
    json["result"]["insertedId"].as_str().unwrap().to_string()
}

/// In-memory store that records how many operations reached it
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn find_many(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        self.hit();
        self.inner.find_many(collection).await
    }

    async fn find_filtered(
        &self,
        collection: &str,
        reference_id: ObjectId,
    ) -> Result<Vec<Document>, DatabaseError> {
        self.hit();
        self.inner.find_filtered(collection, reference_id).await
    }

    async fn find_one(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, DatabaseError> {
        self.hit();
        self.inner.find_one(collection, id).await
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertResult, DatabaseError> {
        self.hit();
        self.inner.insert_one(collection, document).await
    }

    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, DatabaseError> {
        self.hit();
        self.inner.update_one(collection, id, fields).await
    }

    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<bool, DatabaseError> {
        self.hit();
        self.inner.delete_one(collection, id).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.inner.ping().await
    }

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}

/// Store whose every operation fails as if the database were unreachable
pub struct FailingStore;

fn outage() -> DatabaseError {
    DatabaseError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_many(&self, _collection: &str) -> Result<Vec<Document>, DatabaseError> {
        Err(outage())
    }

    async fn find_filtered(
        &self,
        _collection: &str,
        _reference_id: ObjectId,
    ) -> Result<Vec<Document>, DatabaseError> {
        Err(outage())
    }

    async fn find_one(
        &self,
        _collection: &str,
        _id: ObjectId,
    ) -> Result<Option<Document>, DatabaseError> {
        Err(outage())
    }

    async fn insert_one(
        &self,
        _collection: &str,
        _document: Document,
    ) -> Result<InsertResult, DatabaseError> {
        Err(outage())
    }

    async fn update_one(
        &self,
        _collection: &str,
        _id: ObjectId,
        _fields: Document,
    ) -> Result<UpdateOutcome, DatabaseError> {
        Err(outage())
    }

    async fn delete_one(&self, _collection: &str, _id: ObjectId) -> Result<bool, DatabaseError> {
        Err(outage())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(outage())
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
