//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that makes requests against the application
//! router backed by an in-memory database. Methods are intentionally broad
//! to support various test scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use finman::config::Config;
use finman::db::{create_in_memory_pool, migrations};
use finman::handlers;
use finman::state::AppState;
use http_body_util::BodyExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;

/// A test client that simulates an API consumer, allowing sequential
/// requests against the application.
pub struct TestClient {
    state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 5000,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
        };

        let state = AppState {
            db: pool,
            config: Arc::new(config),
        };

        Self { state }
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a POST request with a JSON body and return status and body.
    pub async fn post_json(&self, uri: &str, payload: serde_json::Value) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a DELETE request and return status and body.
    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create a transaction via POST; returns the created id on success.
    pub async fn create_transaction(
        &self,
        date: &str,
        amount: f64,
        description: Option<&str>,
        category: &str,
    ) -> Option<i64> {
        let mut payload = serde_json::json!({
            "amount": amount,
            "date": date,
            "category": category,
        });
        if let Some(text) = description {
            payload["description"] = serde_json::Value::from(text);
        }

        let (status, body) = self.post_json("/api/transactions/create", payload).await;
        if status != StatusCode::CREATED {
            return None;
        }
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["id"].as_i64())
    }

    /// Upsert a budget via POST; returns the stored budget's id on success.
    pub async fn set_budget(&self, category: &str, amount: f64, month: &str) -> Option<i64> {
        let payload = serde_json::json!({
            "category": category,
            "amount": amount,
            "month": month,
        });

        let (status, body) = self.post_json("/api/budgets/setBudget", payload).await;
        if status != StatusCode::OK {
            return None;
        }
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["id"].as_i64())
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
