//! Common test utilities

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use course_earnings::api::{self, AppState};
use course_earnings::domain::{Course, UserAccount};
use course_earnings::report::ReportAggregator;
use course_earnings::source::{decode_collection, CatalogSource, SourceError, StaticCatalog};
use serde_json::{json, Value};

/// Catalog fixture: two instructors, one free course, one dangling enrollment
pub fn sample_courses() -> Value {
    json!([
        { "_id": "c1", "title": "Rust 101", "instructor": "Alice", "price": 100 },
        { "_id": "c2", "title": "Async Rust", "instructor": "Alice", "price": "50.50" },
        { "_id": "c3", "title": "Intro to SQL", "instructor": { "_id": "i-bob", "name": "Bob" }, "price": 20 },
        { "_id": "c4", "title": "Office Hours", "instructor": "Carol" }
    ])
}

pub fn sample_users() -> Value {
    json!([
        { "_id": "u1", "enrolledCourses": [{ "courseId": "c1" }, "c2"] },
        { "_id": "u2", "enrolledCourses": ["c1", { "course": { "_id": "c3" } }] },
        { "_id": "u3", "enrolledCourses": ["c-missing", "c4"] },
        { "_id": "u4", "enrolledCourses": [] }
    ])
}

/// Static catalog over the sample fixtures
pub fn sample_catalog() -> StaticCatalog {
    StaticCatalog::new(
        decode_collection::<Course>("courses", sample_courses()).expect("courses fixture"),
        decode_collection::<UserAccount>("users", sample_users()).expect("users fixture"),
    )
}

/// Catalog whose upstream is down
pub struct UnavailableCatalog;

#[async_trait]
impl CatalogSource for UnavailableCatalog {
    async fn fetch_courses(&self) -> Result<Vec<Course>, SourceError> {
        Err(SourceError::Status {
            status: 503,
            url: "http://lms.test/courses".to_string(),
        })
    }

    async fn fetch_users(&self) -> Result<Vec<UserAccount>, SourceError> {
        Ok(Vec::new())
    }
}

/// Full application router over the given catalog
pub fn app_with(catalog: impl CatalogSource + 'static) -> Router {
    api::build_router(AppState::new(Arc::new(catalog), ReportAggregator::default()))
}

/// Serve `router` on an ephemeral local port and return its address
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    addr
}
