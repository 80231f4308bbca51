// Integration tests for the HTTP server

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use moodbot::config::{Config, TrainingParams};
use moodbot::dataset::TrainingRecord;
use moodbot::patterns::MatchSource;
use moodbot::pipeline::{BotContext, Pipeline};
use moodbot::server::{ChatResponse, ChatServer};

fn records(pairs: &[(&str, &str)]) -> Vec<TrainingRecord> {
    pairs
        .iter()
        .map(|(i, l)| TrainingRecord::new(*i, *l))
        .collect()
}

fn test_context() -> Arc<BotContext> {
    let params = TrainingParams::default();
    let chat = Pipeline::from_records(
        "chat",
        &records(&[
            ("i am so happy today", "Yay! Tell me more!"),
            ("i feel sad and alone", "I'm right here with you."),
            ("what is going on here", "Honestly, no idea either."),
        ]),
        &params,
    )
    .expect("chat pipeline");
    let emotion = Pipeline::from_records(
        "emotion",
        &records(&[
            ("i am so happy today", "happy"),
            ("i feel sad and alone", "sad"),
            ("what is going on here", "confused"),
        ]),
        &params,
    )
    .expect("emotion pipeline");
    Arc::new(BotContext::new(chat, emotion))
}

fn test_router() -> Router {
    let config = Config::default();
    ChatServer::new(test_context(), config.palette, config.server).router()
}

async fn send(router: &Router, req: Request<Body>) -> axum::response::Response {
    router.clone().oneshot(req).await.expect("oneshot failed")
}

async fn get(router: &Router, path: &str) -> axum::response::Response {
    let req = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request");
    send(router, req).await
}

async fn post_form(router: &Router, path: &str, body: &str) -> axum::response::Response {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");
    send(router, req).await
}

async fn post_json(router: &Router, path: &str, body: serde_json::Value) -> axum::response::Response {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");
    send(router, req).await
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_text(resp).await).expect("body is not valid JSON")
}

#[tokio::test]
async fn test_index_starts_empty() {
    let router = test_router();
    let resp = get(&router, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Your Asked Questions"));
    assert!(html.contains("No messages yet"));
    assert!(!html.contains("Detected Emotion"));
}

#[tokio::test]
async fn test_form_message_renders_emotion_and_reply() {
    let router = test_router();
    let resp = post_form(&router, "/message", "message=I+am+so+happy+today").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("background-color:#4CAF50;"));
    assert!(html.contains("Detected Emotion:</b> HAPPY"));
    assert!(html.contains("<b>Bot:</b> Yay! Tell me more!"));
    assert!(html.contains("open.spotify.com/embed/playlist/2P4Wmt03IQs4DTXVvncReg"));
    assert!(html.contains("<b>You:</b> I am so happy today"));
}

#[tokio::test]
async fn test_blank_form_message_is_ignored() {
    let router = test_router();
    let resp = post_form(&router, "/message", "message=+++").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_text(resp).await.contains("Detected Emotion"));

    let history = body_json(get(&router, "/api/history").await).await;
    assert_eq!(history["questions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_clear_resets_history_and_redirects() {
    let router = test_router();
    post_form(&router, "/message", "message=i+feel+sad+and+alone").await;

    let resp = post_form(&router, "/clear", "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");

    let html = body_text(get(&router, "/").await).await;
    assert!(html.contains("No messages yet"));
    assert!(!html.contains("i feel sad and alone"));

    let history = body_json(get(&router, "/api/history").await).await;
    assert!(history["messages"].as_array().unwrap().is_empty());
    assert!(history["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_message_reports_labels_and_sources() {
    let router = test_router();
    let resp = post_json(
        &router,
        "/api/message",
        serde_json::json!({ "message": "I FEEL SAD AND ALONE" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let reply: ChatResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(reply.reply, "I'm right here with you.");
    assert_eq!(reply.emotion, "sad");
    assert_eq!(reply.color, "#E53935");
    assert!(reply.media_url.is_some());
    assert_eq!(reply.reply_source, MatchSource::Lookup);
    assert_eq!(reply.emotion_source, MatchSource::Lookup);
}

#[tokio::test]
async fn test_api_unmapped_emotion_uses_default_color() {
    let router = test_router();
    let resp = post_json(
        &router,
        "/api/message",
        serde_json::json!({ "message": "what is going on here" }),
    )
    .await;
    let json = body_json(resp).await;
    assert_eq!(json["emotion"], "confused");
    assert_eq!(json["color"], "#616161");
    assert!(json.get("media_url").is_none());
}

#[tokio::test]
async fn test_api_blank_message_is_bad_request() {
    let router = test_router();
    let resp = post_json(&router, "/api/message", serde_json::json!({ "message": "  " })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn test_api_overlong_message_is_bad_request() {
    let router = test_router();
    let limit = Config::default().server.max_message_chars;
    let long = "happy ".repeat(limit / 6 + 1);

    let resp = post_json(&router, "/api/message", serde_json::json!({ "message": long })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"]
        .as_str()
        .unwrap()
        .contains("limit"));

    let history = body_json(get(&router, "/api/history").await).await;
    assert!(history["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_form_overlong_message_shows_notice() {
    let router = test_router();
    let limit = Config::default().server.max_message_chars;
    let body = format!("message={}", "a".repeat(limit + 1));

    let resp = post_form(&router, "/message", &body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("class=\"notice\""));
    assert!(!html.contains("Detected Emotion"));

    let history = body_json(get(&router, "/api/history").await).await;
    assert!(history["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_message_at_limit_is_answered() {
    let router = test_router();
    let limit = Config::default().server.max_message_chars;
    let mut message = "i am so happy today ".repeat(limit / 20);
    message.truncate(limit);

    let resp = post_json(&router, "/api/message", serde_json::json!({ "message": message })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let reply: ChatResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert!(!reply.emotion.is_empty());
}

#[tokio::test]
async fn test_history_api_tracks_and_clears() {
    let router = test_router();
    post_json(&router, "/api/message", serde_json::json!({ "message": "i am so happy today" })).await;
    post_form(&router, "/message", "message=what+is+going+on+here").await;

    let history = body_json(get(&router, "/api/history").await).await;
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["speaker"], "You");
    assert_eq!(messages[1]["speaker"], "Bot");
    assert_eq!(messages[1]["text"], "Yay! Tell me more!");
    assert_eq!(history["questions"][1], "what is going on here");

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/history")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&router, req).await.status(), StatusCode::NO_CONTENT);

    let history = body_json(get(&router, "/api/history").await).await;
    assert!(history["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_health_reports_pipelines() {
    let router = test_router();
    let json = body_json(get(&router, "/health").await).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["session_turns"], 0);
    assert_eq!(json["pipelines"]["chat_keys"], 3);
    assert_eq!(json["pipelines"]["emotion_labels"], 3);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let router = test_router();
    let big = "a".repeat(Config::default().server.max_body_bytes + 1);
    let resp = post_json(&router, "/api/message", serde_json::json!({ "message": big })).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
