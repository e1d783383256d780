use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gradebook::router::init_router;
use gradebook::state::AppState;
use gradebook::store::memory::MemoryStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Builds the app against a fresh in-memory store. The store handle is
/// returned alongside the router so tests can assert on captured
/// notifications.
pub fn setup_test_app() -> (Router, Arc<MemoryStore>) {
    dotenvy::dotenv().ok();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_memory_store(store.clone());
    (init_router(state), store)
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Extractor rejections come back as plain text, not JSON.
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[allow(dead_code)]
pub async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Extractor rejections come back as plain text, not JSON.
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_empty(app, "GET", uri).await
}

/// Bulk entry payload for one class, exam, and subject.
#[allow(dead_code)]
pub fn bulk_request(
    class_name: &str,
    exam_type: &str,
    subject: &str,
    max_marks: f64,
    entries: &[(&str, &str, &str, f64)],
) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = entries
        .iter()
        .map(|(student_id, student_name, roll_number, marks)| {
            serde_json::json!({
                "student_id": student_id,
                "student_name": student_name,
                "roll_number": roll_number,
                "marks_obtained": marks,
            })
        })
        .collect();

    serde_json::json!({
        "class_name": class_name,
        "exam_type": exam_type,
        "academic_year": "2024-25",
        "subject": subject,
        "max_marks": max_marks,
        "entered_by": "teacher-01",
        "entries": entries,
    })
}
