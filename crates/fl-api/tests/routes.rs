//! End-to-end router tests: real store, stubbed generator, no network.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use fl_api::{router, AppState};
use fl_core::error::{AppError, Result};
use fl_core::models::Mode;
use fl_core::traits::FlameGenerator;
use fl_storage_mem::MemFlameStore;

/// Canned generator so tests never talk to OpenAI.
struct StubGenerator {
    outcome: Result<String>,
}

impl StubGenerator {
    fn line(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
        }
    }

    fn failing() -> Self {
        Self {
            outcome: Err(AppError::UpstreamGenerationFailure(
                "OpenAI API quota exceeded. Please try again later.".to_string(),
            )),
        }
    }
}

#[async_trait]
impl FlameGenerator for StubGenerator {
    async fn generate(&self, _mode: Mode, _input: Option<&str>) -> Result<String> {
        match &self.outcome {
            Ok(line) => Ok(line.clone()),
            Err(AppError::UpstreamGenerationFailure(msg)) => {
                Err(AppError::UpstreamGenerationFailure(msg.clone()))
            }
            Err(_) => unreachable!("stub only fails upstream"),
        }
    }
}

fn app_with(generator: StubGenerator) -> Router {
    router(AppState {
        store: Arc::new(MemFlameStore::new()),
        generator: Arc::new(generator),
    })
}

fn app() -> Router {
    app_with(StubGenerator::line("Your commits so clean, git blame files a compliment"))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn generate_records_and_returns_the_line() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/generate",
        Some(json!({"mode": "bar", "input": "git"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["generationId"], json!(1));
    let content = body["content"].as_str().unwrap();

    let (status, body) = send(&app, "GET", "/api/generations/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generation"]["output"].as_str().unwrap(), content);
    assert_eq!(body["generation"]["input"], json!("git"));
    assert_eq!(body["generation"]["rating"], Value::Null);
}

#[tokio::test]
async fn generate_rejects_unknown_and_community_modes() {
    let app = app();
    for mode in ["sonnet", "community"] {
        let (status, body) =
            send(&app, "POST", "/api/generate", Some(json!({"mode": mode}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }
    // Nothing was recorded for the rejected requests
    let (_, body) = send(&app, "GET", "/api/generations", None).await;
    assert_eq!(body["generations"], json!([]));
}

#[tokio::test]
async fn upstream_failure_is_surfaced_and_not_recorded() {
    let app = app_with(StubGenerator::failing());
    let (status, body) =
        send(&app, "POST", "/api/generate", Some(json!({"mode": "roast"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("quota"));

    let (_, body) = send(&app, "GET", "/api/generations", None).await;
    assert_eq!(body["generations"], json!([]));
}

#[tokio::test]
async fn rating_validates_then_round_trips() {
    let app = app();
    send(&app, "POST", "/api/generate", Some(json!({"mode": "joke"}))).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/generations/1/rate",
        Some(json!({"rating": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/generations/1/rate",
        Some(json!({"rating": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generation"]["rating"], json!(4));

    let (status, _) = send(
        &app,
        "POST",
        "/api/generations/99/rate",
        Some(json!({"rating": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submission_enforces_length_bounds() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "too short", "mode": "community"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too short"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "x".repeat(281), "mode": "community"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too long"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "x".repeat(280), "mode": "community", "author": "Tester"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["flame"]["id"], json!(1));
}

#[tokio::test]
async fn submissions_stay_hidden_until_approved() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "waiting on the mods", "mode": "community"})),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/flames", None).await;
    assert_eq!(body["flames"], json!([]));

    // But moderation can see it
    let (_, body) = send(&app, "GET", "/api/flames/all", None).await;
    assert_eq!(body["flames"].as_array().unwrap().len(), 1);
    assert_eq!(body["flames"][0]["isApproved"], json!(false));

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/flames/1",
        Some(json!({"isApproved": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flame"]["isApproved"], json!(true));

    let (_, body) = send(&app, "GET", "/api/flames", None).await;
    assert_eq!(body["flames"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn approved_listing_honors_limit_and_like_order() {
    let app = app();
    for (i, likes) in [5, 20, 1].into_iter().enumerate() {
        send(
            &app,
            "POST",
            "/api/flames",
            Some(json!({"content": "a flame worth liking", "mode": "bar"})),
        )
        .await;
        send(
            &app,
            "PATCH",
            &format!("/api/flames/{}", i + 1),
            Some(json!({"isApproved": true, "likes": likes})),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/api/flames?limit=2", None).await;
    let flames = body["flames"].as_array().unwrap();
    assert_eq!(flames.len(), 2);
    assert_eq!(flames[0]["likes"], json!(20));
    assert_eq!(flames[1]["likes"], json!(5));
}

#[tokio::test]
async fn likes_accumulate_and_missing_ids_404() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "like this flame", "mode": "community"})),
    )
    .await;

    let (status, body) = send(&app, "POST", "/api/flames/1/like", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], json!(1));
    let (_, body) = send(&app, "POST", "/api/flames/1/like", None).await;
    assert_eq!(body["likes"], json!(2));

    let (status, body) = send(&app, "POST", "/api/flames/42/like", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn daily_flame_appears_once_promoted() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/daily-flame", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "today's featured flame", "mode": "bar"})),
    )
    .await;
    send(
        &app,
        "PATCH",
        "/api/flames/1",
        Some(json!({"isApproved": true, "isDaily": true})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/daily-flame", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flame"]["id"], json!(1));
    assert_eq!(body["flame"]["isDaily"], json!(true));
}

#[tokio::test]
async fn stats_reflect_activity() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/flames",
        Some(json!({"content": "counted in the stats", "mode": "community"})),
    )
    .await;
    send(&app, "POST", "/api/generate", Some(json!({"mode": "bar"}))).await;

    let (status, body) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalFlames"], json!(1));
    assert_eq!(body["stats"]["totalGenerations"], json!(1));
    assert_eq!(body["stats"]["approvedFlames"], json!(0));
    assert_eq!(body["stats"]["todayFlames"], json!(1));
}
