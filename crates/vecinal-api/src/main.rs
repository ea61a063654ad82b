//! vecinal-api - HTTP API server for the vecinal chatbot

mod auth;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Method},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use vecinal_chatbot::{
    ChatbotService, CompletionConfig, CompletionGateway, GatewayState, InMemoryDirectory,
};
use vecinal_core::defaults::{CORS_MAX_AGE_SECS, SERVER_PORT};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// STATE AND HANDLERS
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    chatbot: Arc<ChatbotService>,
}

#[derive(Debug, Deserialize)]
struct ChatbotQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatbotResponse {
    answer: String,
}

/// Anonymous chatbot endpoint: `GET /api/v1/chatbot?q=...`
async fn chatbot(
    State(state): State<AppState>,
    Query(query): Query<ChatbotQuery>,
) -> Json<ChatbotResponse> {
    let question = query.q.unwrap_or_default();
    let answer = state.chatbot.answer(&question, None).await;
    Json(ChatbotResponse { answer })
}

/// Authenticated chatbot endpoint: `GET /api/v1/chatbot/auth?q=...`
///
/// The upstream gateway supplies the validated caller in the
/// `x-auth-context` header; a missing header degrades to anonymous.
async fn chatbot_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ChatbotQuery>,
) -> Json<ChatbotResponse> {
    let user = auth::user_from_headers(&headers);
    let question = query.q.unwrap_or_default();
    let answer = state.chatbot.answer(&question, user.as_ref()).await;
    Json(ChatbotResponse { answer })
}

/// Liveness endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "vecinal-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any)
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    Router::new()
        .route("/api/v1/chatbot", get(chatbot))
        .route("/api/v1/chatbot/auth", get(chatbot_auth))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// STARTUP
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The directory store stands in for the platform's persistence
    // layer; seed it from a fixture file when one is configured.
    let store = match std::env::var("VECINAL_DATA_FILE") {
        Ok(path) => {
            info!(path, "loading directory fixture");
            Arc::new(InMemoryDirectory::from_json_file(Path::new(&path))?)
        }
        Err(_) => {
            warn!("VECINAL_DATA_FILE not set, starting with an empty directory");
            Arc::new(InMemoryDirectory::empty())
        }
    };

    let gateway_state = Arc::new(GatewayState::from_env());
    let gateway = CompletionGateway::new(CompletionConfig::from_env(), gateway_state, store.clone())?;
    let chatbot = Arc::new(ChatbotService::new(store, gateway));

    // Best-effort credential probe; failure only logs.
    if chatbot.verify_credentials().await {
        info!("completion provider credential verified");
    } else {
        warn!("completion provider unavailable or not configured, fallback replies only");
    }

    let app = router(AppState { chatbot });

    let port: u16 = std::env::var("VECINAL_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(SERVER_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "vecinal-api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
