#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use college_search::domain::entities::{College, CollegeType, SearchParams};
use college_search::domain::fields::SearchField;
use college_search::domain::filter::filter_colleges;
use college_search::domain::query::build_query;
use college_search::infrastructure::remote::{ApiMode, HttpCollegeSource};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A fake college backend listening on an ephemeral local port.
pub struct FakeBackend {
    pub url: String,
    hits: Arc<AtomicUsize>,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeBackend {
    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn source(&self, mode: ApiMode) -> HttpCollegeSource {
        HttpCollegeSource::new(&self.url, Duration::from_secs(2), mode).unwrap()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
struct Backend {
    colleges: Arc<Vec<College>>,
    hits: Arc<AtomicUsize>,
}

impl Backend {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn matching(&self, params: &HashMap<String, String>) -> Vec<College> {
        let params = params
            .iter()
            .filter_map(|(k, v)| SearchField::from_key(k).map(|f| (f, v)))
            .fold(SearchParams::new(), |p, (f, v)| p.with(f, v.as_str()));
        filter_colleges(&self.colleges, &build_query(&params))
    }
}

async fn serve(router: Router, hits: Arc<AtomicUsize>) -> FakeBackend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    FakeBackend {
        url: format!("http://{addr}"),
        hits,
        handle,
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

async fn search(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<College>> {
    backend.hit();
    Json(backend.matching(&params))
}

async fn college_by_name(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.hit();
    match backend.matching(&params).into_iter().next() {
        Some(college) => Json(college).into_response(),
        None => not_found("College not found"),
    }
}

async fn health(State(backend): State<Backend>) -> Json<serde_json::Value> {
    backend.hit();
    Json(json!({ "database": "connected", "college_count": backend.colleges.len() }))
}

async fn setup(State(backend): State<Backend>) -> Json<serde_json::Value> {
    backend.hit();
    Json(json!({ "inserted_count": backend.colleges.len() }))
}

/// Backend exposing the combined `/search` API.
pub async fn spawn_combined_backend(colleges: Vec<College>) -> FakeBackend {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = Backend {
        colleges: Arc::new(colleges),
        hits: Arc::clone(&hits),
    };

    let router = Router::new()
        .route("/search", get(search))
        .route("/college", get(college_by_name))
        .route("/health", get(health))
        .route("/setup", post(setup))
        .with_state(state);

    serve(router, hits).await
}

async fn per_field(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.hit();
    let found = backend.matching(&params);
    if found.is_empty() {
        not_found("No colleges found")
    } else {
        Json(found).into_response()
    }
}

/// Backend exposing one endpoint per field, answering 404 for empty matches.
pub async fn spawn_per_field_backend(colleges: Vec<College>) -> FakeBackend {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = Backend {
        colleges: Arc::new(colleges),
        hits: Arc::clone(&hits),
    };

    let router = Router::new()
        .route("/college", get(per_field))
        .route("/city", get(per_field))
        .route("/year", get(per_field))
        .route("/state", get(per_field))
        .route("/facilities", get(per_field))
        .with_state(state);

    serve(router, hits).await
}

/// Backend answering every request with `status` and an error body.
pub async fn spawn_failing_backend(status: StatusCode, message: &'static str) -> FakeBackend {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    let router = Router::new().fallback(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, Json(json!({ "error": message })))
        }
    });

    serve(router, hits).await
}

/// Backend answering 200 with a body that is not a college list.
pub async fn spawn_garbage_backend() -> FakeBackend {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    let router = Router::new().fallback(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Json(json!({ "colleges": "soon" }))
        }
    });

    serve(router, hits).await
}

/// A URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A small data set that differs from the bundled one.
pub fn sample_colleges() -> Vec<College> {
    vec![
        College::new("Alpha College", 1850, "Springfield", "Ohio", "Library, Gym")
            .with_type(CollegeType::Private)
            .with_rating(4.1),
        College::new("Beta University", 1901, "Columbus", "Ohio", "Pool")
            .with_type(CollegeType::Public)
            .with_rating(3.6),
        College::new("Gamma Institute", 1965, "Austin", "Texas", "Lab, Gym")
            .with_type(CollegeType::Public),
    ]
}

pub fn params(pairs: &[(SearchField, &str)]) -> SearchParams {
    pairs
        .iter()
        .fold(SearchParams::new(), |p, (f, v)| p.with(*f, *v))
}
