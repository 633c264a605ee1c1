//! End-to-end tests driving the router with deterministic generation stubs.
//!
//! The orchestrator takes its collaborators by trait object, so these tests
//! script the AI path precisely: a canned reply, prose-wrapped JSON, or a
//! hard service failure.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use omni_ai::genai::{GenAiError, ImageGenerationService, TextGenerationService};
use omni_ai::http::{create_router, AppState};

/// Text stub: a fixed reply, or a service error when `None`.
struct ScriptedText {
    reply: Option<String>,
}

#[async_trait]
impl TextGenerationService for ScriptedText {
    async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
        self.reply.clone().ok_or(GenAiError::EmptyResponse)
    }
}

/// Image stub that never produces a background.
struct NoImage;

#[async_trait]
impl ImageGenerationService for NoImage {
    async fn generate(&self, _prompt: &str) -> Result<Option<Vec<u8>>, GenAiError> {
        Ok(None)
    }
}

fn app(text_reply: Option<&str>) -> axum::Router {
    let state = AppState::new(
        Arc::new(ScriptedText {
            reply: text_reply.map(str::to_string),
        }),
        Arc::new(NoImage),
    );
    create_router(state)
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_probe() {
    let response = app(None)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "omni-ai");
}

#[tokio::test]
async fn test_schedule_fallback_when_ai_unavailable() {
    let (status, body) = post_json(
        app(None),
        "/ai/schedule/generate",
        json!({
            "day_start": "08:00",
            "day_end": "10:00",
            "activities": [
                {"name": "Write report", "duration": 90, "kind": "focus", "priority": "high"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["schedule"],
        json!([{"start": "08:00", "end": "09:30", "activity": "Write report"}])
    );
    assert_eq!(
        body["reasoning"][0],
        "Used deterministic fallback scheduling due to AI output/format limits."
    );
    assert_eq!(body["reasoning"][1], "Fallback reason: ServiceError");
    assert!(body["visual_schedule"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_schedule_fallback_when_ai_returns_prose() {
    let (status, body) = post_json(
        app(Some("Sorry, I had trouble with that request.")),
        "/ai/schedule/generate",
        json!({
            "activities": [
                {"name": "Read", "duration": 30, "kind": "other", "priority": "low"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reasoning"][1], "Fallback reason: ExtractionError");
    // Defaults applied: the day starts at 08:00.
    assert_eq!(body["schedule"][0]["start"], "08:00");
}

#[tokio::test]
async fn test_schedule_accepts_valid_ai_output() {
    let reply = r#"Here you go: {"schedule":[{"start":"09:00","end":"10:30","activity":"Deep work"},{"start":"10:30","end":"10:40","activity":"Break"}],"reasoning":["front-load focus"]}"#;
    let (status, body) = post_json(
        app(Some(reply)),
        "/ai/schedule/generate",
        json!({
            "activities": [
                {"name": "Deep work", "duration": 90, "kind": "focus", "priority": "high"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["schedule"][0]["activity"], "Deep work");
    assert_eq!(body["reasoning"], json!(["front-load focus"]));
}

#[tokio::test]
async fn test_schedule_rejects_bad_window() {
    let (status, body) = post_json(
        app(None),
        "/ai/schedule/generate",
        json!({"day_start": "25:00"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_schedule_legacy_tasks_shape() {
    let (status, body) = post_json(
        app(None),
        "/ai/schedule/generate",
        json!({"tasks": [{"title": "Ship release"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["schedule"],
        json!([{"start": "08:00", "end": "09:00", "activity": "Ship release"}])
    );
}

#[tokio::test]
async fn test_daily_summary() {
    let (status, body) = post_json(
        app(None),
        "/ai/summary/daily",
        json!({"mood": "relaxed"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"].as_str().unwrap().contains("relaxed"));
    assert_eq!(body["visual"], Value::Null);
}

#[tokio::test]
async fn test_tasks_optimize_orders_by_deadline() {
    let (status, body) = post_json(
        app(None),
        "/ai/tasks/optimize",
        json!({"tasks": [
            {"title": "later", "deadline": "2026-09-01"},
            {"title": "sooner", "deadline": "2026-08-10"},
            {"title": "whenever", "deadline": "none"}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["optimized_tasks"][0]["title"], "sooner");
    assert_eq!(body["optimized_tasks"][1]["title"], "later");
    assert_eq!(body["optimized_tasks"][2]["title"], "whenever");
}

#[tokio::test]
async fn test_health_analyze() {
    let (status, body) = post_json(
        app(None),
        "/ai/health/analyze",
        json!({
            "sleep_hours": 5,
            "water_intake_liters": 1.0,
            "exercise_minutes": 5,
            "stress_level": "high"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["burnout_risk"], "high");
    assert_eq!(body["risk_factors"]["sleep"], "critically low");
    assert!(!body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_finance_analyze_nested_precedence() {
    let (status, body) = post_json(
        app(None),
        "/ai/finance/analyze",
        json!({
            "expenses": {"rent": 900.0, "food": 300.0},
            "monthly_income": 1750.0,
            "savings_goal": 500.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total_spent"], 1200.0);
    assert_eq!(body["risk_level"], "medium");
    assert_eq!(body["breakdown"][0]["category"], "rent");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = app(None)
        .oneshot(
            Request::builder()
                .uri("/ai/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
