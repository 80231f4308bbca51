// Moodbot - Web Server Module
// Single-session HTTP UI and JSON API over the fitted pipelines

pub mod api_types;
mod handlers;
pub mod render;

pub use api_types::{ChatResponse, ErrorResponse, HistoryResponse, MessageForm};
pub use handlers::{
    create_router, handle_api_message, handle_clear, handle_clear_history, handle_history,
    handle_index, handle_message, health_check,
};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::config::{Palette, ServerConfig};
use crate::pipeline::BotContext;
use crate::session::SessionHistory;

/// State shared by all handlers
pub struct AppState {
    /// Fitted pipelines, read-only after startup
    pub context: Arc<BotContext>,
    /// The one interactive session
    pub session: Mutex<SessionHistory>,
    /// Emotion colors and media
    pub palette: Palette,
    /// Messages longer than this are refused
    pub max_message_chars: usize,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(context: Arc<BotContext>, palette: Palette, max_message_chars: usize) -> Self {
        Self {
            context,
            session: Mutex::new(SessionHistory::new()),
            palette,
            max_message_chars,
            started_at: Instant::now(),
        }
    }
}

/// Main server structure
pub struct ChatServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl ChatServer {
    pub fn new(context: Arc<BotContext>, palette: Palette, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(context, palette, config.max_message_chars)),
            config,
        }
    }

    /// Router with body limit and request tracing applied
    pub fn router(&self) -> axum::Router {
        create_router(Arc::clone(&self.state))
            .layer(axum::extract::DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(TraceLayer::new_for_http())
    }

    /// Get reference to shared state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind and serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!("Starting moodbot on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
