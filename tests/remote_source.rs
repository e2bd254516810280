mod common;

use axum::http::StatusCode;
use college_search::domain::fields::SearchField;
use college_search::domain::query::build_query;
use college_search::domain::repositories::CollegeSource;
use college_search::error::AppError;
use college_search::infrastructure::remote::{ApiMode, HttpCollegeSource};
use std::time::Duration;

#[tokio::test]
async fn test_combined_search_sends_every_field() {
    let backend = common::spawn_combined_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::Combined);

    let query = build_query(&common::params(&[
        (SearchField::State, "ohio"),
        (SearchField::Facility, "gym"),
    ]));
    let found = source.search(&query).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alpha College");
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_combined_search_empty_list_is_ok() {
    let backend = common::spawn_combined_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::Combined);

    let query = build_query(&common::params(&[(SearchField::State, "Alaska")]));

    assert_eq!(source.search(&query).await, Ok(Vec::new()));
}

#[tokio::test]
async fn test_error_status_carries_backend_message() {
    let backend =
        common::spawn_failing_backend(StatusCode::INTERNAL_SERVER_ERROR, "database offline").await;
    let source = backend.source(ApiMode::Combined);

    let query = build_query(&common::params(&[(SearchField::Name, "Alpha")]));
    let result = source.search(&query).await;

    assert_eq!(
        result,
        Err(AppError::BadResponseStatus {
            code: 500,
            message: "database offline".to_string()
        })
    );
}

#[tokio::test]
async fn test_unexpected_body_is_malformed() {
    let backend = common::spawn_garbage_backend().await;
    let source = backend.source(ApiMode::Combined);

    let query = build_query(&common::params(&[(SearchField::Name, "Alpha")]));
    let result = source.search(&query).await;

    assert!(matches!(result, Err(AppError::MalformedPayload(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let url = common::unreachable_url().await;
    let source = HttpCollegeSource::new(&url, Duration::from_secs(2), ApiMode::Combined).unwrap();

    let query = build_query(&common::params(&[(SearchField::Name, "Alpha")]));
    let result = source.search(&query).await;

    assert!(matches!(result, Err(AppError::NetworkUnavailable(_))));
}

#[tokio::test]
async fn test_per_field_search_uses_first_field_endpoint() {
    let backend = common::spawn_per_field_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::PerField);

    // Only `city` is sent; the state filter is left to the caller.
    let query = build_query(&common::params(&[
        (SearchField::City, "Columbus"),
        (SearchField::State, "Texas"),
    ]));
    let found = source.search(&query).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Beta University");
    assert!(source.needs_local_narrowing());
}

#[tokio::test]
async fn test_per_field_not_found_is_empty_result() {
    let backend = common::spawn_per_field_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::PerField);

    let query = build_query(&common::params(&[(SearchField::State, "Alaska")]));

    assert_eq!(source.search(&query).await, Ok(Vec::new()));
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_per_field_cannot_serve_range_only_query() {
    let backend = common::spawn_per_field_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::PerField);

    let query = build_query(&common::params(&[(SearchField::MinYear, "1900")]));

    assert!(!source.can_serve(&query));
    assert!(backend.source(ApiMode::Combined).can_serve(&query));
}

#[tokio::test]
async fn test_college_by_name() {
    let backend = common::spawn_combined_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::Combined);

    let found = source.college_by_name("gamma").await.unwrap().unwrap();
    assert_eq!(found.name, "Gamma Institute");

    assert_eq!(source.college_by_name("Omega").await, Ok(None));
}

#[tokio::test]
async fn test_health_and_setup() {
    let backend = common::spawn_combined_backend(common::sample_colleges()).await;
    let source = backend.source(ApiMode::Combined);

    let health = source.health().await.unwrap();
    assert_eq!(health.database, "connected");
    assert_eq!(health.college_count, 3);

    let report = source.seed_sample_data().await.unwrap();
    assert_eq!(report.inserted_count, 3);
}

#[tokio::test]
async fn test_health_failure_is_reported() {
    let backend =
        common::spawn_failing_backend(StatusCode::SERVICE_UNAVAILABLE, "database down").await;
    let source = backend.source(ApiMode::Combined);

    let result = source.health().await;

    assert_eq!(
        result,
        Err(AppError::BadResponseStatus {
            code: 503,
            message: "database down".to_string()
        })
    );
}
