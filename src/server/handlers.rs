// HTTP request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use super::api_types::{ChatResponse, ErrorResponse, HistoryResponse, MessageForm};
use super::render::{render_page, ExchangeView, PageView};
use super::AppState;
use crate::pipeline::{BotContext, Reply};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/message", post(handle_message))
        .route("/clear", post(handle_clear))
        .route("/api/message", post(handle_api_message))
        .route(
            "/api/history",
            get(handle_history).delete(handle_clear_history),
        )
        .route("/health", get(health_check))
        .with_state(state)
}

/// Why a submitted message is not resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refusal {
    Blank,
    TooLong { chars: usize, limit: usize },
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Refusal::Blank => write!(f, "message must not be empty"),
            Refusal::TooLong { chars, limit } => {
                write!(f, "message is {chars} characters long; the limit is {limit}")
            }
        }
    }
}

fn check_message(message: &str, limit: usize) -> Result<(), Refusal> {
    if message.trim().is_empty() {
        return Err(Refusal::Blank);
    }
    let chars = message.chars().count();
    if chars > limit {
        return Err(Refusal::TooLong { chars, limit });
    }
    Ok(())
}

/// Run both pipelines on the blocking pool; fuzzy scoring is CPU-bound
async fn respond_blocking(context: &Arc<BotContext>, message: &str) -> Result<Reply, StatusCode> {
    let context = Arc::clone(context);
    let message = message.to_string();
    tokio::task::spawn_blocking(move || context.respond(&message))
        .await
        .map_err(|e| {
            tracing::error!("Resolver task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// GET / - page with sidebar, form and transcript
pub async fn handle_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_page(&PageView {
        questions: session.questions(),
        messages: session.messages(),
        exchange: None,
        notice: None,
    }))
}

/// POST /message - classify the submitted text and show the result
pub async fn handle_message(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MessageForm>,
) -> Response {
    // Held until the page is rendered: one submission at a time
    let mut session = state.session.lock().await;

    if let Err(refusal) = check_message(&form.message, state.max_message_chars) {
        let notice = match refusal {
            Refusal::Blank => None,
            Refusal::TooLong { .. } => {
                tracing::debug!("Refused form message: {}", refusal);
                Some(refusal.to_string())
            }
        };
        return Html(render_page(&PageView {
            questions: session.questions(),
            messages: session.messages(),
            exchange: None,
            notice: notice.as_deref(),
        }))
        .into_response();
    }

    let reply = match respond_blocking(&state.context, &form.message).await {
        Ok(reply) => reply,
        Err(status) => return status.into_response(),
    };
    session.record(&form.message, reply.reply.label());

    let emotion = reply.emotion.label();
    let exchange = ExchangeView {
        reply: reply.reply.label(),
        emotion,
        color: state.palette.color_for(emotion),
        media_url: state.palette.media_for(emotion),
    };

    Html(render_page(&PageView {
        questions: session.questions(),
        messages: session.messages(),
        exchange: Some(exchange),
        notice: None,
    }))
    .into_response()
}

/// POST /clear - reset the session and go back to the empty page
pub async fn handle_clear(State(state): State<Arc<AppState>>) -> Redirect {
    state.session.lock().await.clear();
    tracing::info!("Session history cleared");
    Redirect::to("/")
}

/// POST /api/message - JSON variant of /message
pub async fn handle_api_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageForm>,
) -> Response {
    if let Err(refusal) = check_message(&request.message, state.max_message_chars) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: refusal.to_string(),
            }),
        )
            .into_response();
    }

    let mut session = state.session.lock().await;
    let reply = match respond_blocking(&state.context, &request.message).await {
        Ok(reply) => reply,
        Err(status) => return status.into_response(),
    };
    session.record(&request.message, reply.reply.label());

    let emotion = reply.emotion.label();
    Json(ChatResponse {
        reply: reply.reply.label().to_string(),
        emotion: emotion.to_string(),
        color: state.palette.color_for(emotion).to_string(),
        media_url: state.palette.media_for(emotion).map(str::to_string),
        reply_source: reply.reply.source(),
        emotion_source: reply.emotion.source(),
    })
    .into_response()
}

/// GET /api/history
pub async fn handle_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let session = state.session.lock().await;
    Json(HistoryResponse::from(&*session))
}

/// DELETE /api/history
pub async fn handle_clear_history(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.lock().await.clear();
    tracing::info!("Session history cleared via API");
    StatusCode::NO_CONTENT
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let turns = state.session.lock().await.turn_count();
    Json(json!({
        "status": "ok",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "session_turns": turns,
        "pipelines": state.context.stats(),
    }))
}
