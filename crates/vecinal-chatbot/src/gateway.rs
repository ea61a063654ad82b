//! Completion gateway: the LLM fallback for unmatched questions.
//!
//! Per call: cache lookup → throttle wait → send, with bounded
//! exponential backoff on provider rate limiting. Only successful
//! provider answers are cached; every error path collapses to a fixed
//! Spanish reply and never escapes as an `Err`.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use vecinal_core::defaults::*;
use vecinal_core::{DirectoryStore, Error, Result, UserContext};

use crate::cache::ReplyCache;
use crate::classify::normalize;
use crate::render::{
    MSG_BAD_REQUEST, MSG_CONNECTION_ERROR, MSG_NOT_CONFIGURED, MSG_PROVIDER_AUTH,
    MSG_PROVIDER_DOWN, MSG_RATE_LIMITED,
};
use crate::throttle::SendThrottle;
use crate::wire::*;

/// Fixed system prompt sent with every completion request.
const SYSTEM_PROMPT: &str = "Eres el asistente virtual de Vecinal, una plataforma de \
administración de comunidades y condominios. Responde en español, de forma breve y cordial. \
Si te preguntan por datos privados de una comunidad, sugiere consultarlos directamente en la \
aplicación.";

/// Placeholder when the statistics block cannot be assembled.
const STATS_UNAVAILABLE: &str = "estadísticas de uso no disponibles";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for the completion provider.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    pub base_url: String,
    /// Bearer credential. `None` means the gateway is not configured and
    /// answers with a fixed reply without any network attempt.
    pub api_key: Option<String>,
    /// Completion model slug.
    pub model: String,
    /// Token budget per answer.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds. `0` disables the client timeout.
    pub timeout_seconds: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: COMPLETION_BASE_URL.to_string(),
            api_key: None,
            model: COMPLETION_MODEL.to_string(),
            max_tokens: COMPLETION_MAX_TOKENS,
            temperature: COMPLETION_TEMPERATURE,
            timeout_seconds: COMPLETION_TIMEOUT_SECS,
        }
    }
}

impl CompletionConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| COMPLETION_BASE_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            model: std::env::var("OPENAI_GEN_MODEL")
                .unwrap_or_else(|_| COMPLETION_MODEL.to_string()),
            max_tokens: std::env::var("CHATBOT_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(COMPLETION_MAX_TOKENS),
            temperature: std::env::var("CHATBOT_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(COMPLETION_TEMPERATURE),
            timeout_seconds: std::env::var("OPENAI_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(COMPLETION_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// GATEWAY STATE
// =============================================================================

/// The gateway's shared mutable state: reply cache and send throttle.
///
/// Constructed once per process and injected, so tests can build it with
/// their own TTLs and intervals.
pub struct GatewayState {
    pub cache: ReplyCache,
    pub throttle: SendThrottle,
}

impl GatewayState {
    pub fn new(cache_ttl: Duration, cache_capacity: usize, min_send_interval: Duration) -> Self {
        Self {
            cache: ReplyCache::new(cache_ttl, cache_capacity),
            throttle: SendThrottle::new(min_send_interval),
        }
    }

    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let ttl_secs: u64 = std::env::var("CHATBOT_CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CACHE_TTL_SECS);
        let capacity: usize = std::env::var("CHATBOT_CACHE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CACHE_CAPACITY);
        let interval_ms: u64 = std::env::var("CHATBOT_MIN_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(MIN_SEND_INTERVAL_MS);

        Self::new(
            Duration::from_secs(ttl_secs),
            capacity,
            Duration::from_millis(interval_ms),
        )
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Client for the external completion provider.
pub struct CompletionGateway {
    client: Client,
    config: CompletionConfig,
    state: Arc<GatewayState>,
    store: Arc<dyn DirectoryStore>,
}

impl CompletionGateway {
    /// Create a new gateway with the given configuration and state.
    pub fn new(
        config: CompletionConfig,
        state: Arc<GatewayState>,
        store: Arc<dyn DirectoryStore>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            configured = config.api_key.is_some(),
            "initializing completion gateway"
        );

        Ok(Self {
            client,
            config,
            state,
            store,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Answer a question the classifier could not match.
    ///
    /// Infallible by contract: every failure path returns one of the
    /// fixed replies. Only genuine provider answers enter the cache.
    pub async fn answer(&self, question: &str, user: Option<&UserContext>) -> String {
        let question = normalize(question);

        if self.config.api_key.is_none() {
            debug!(op = "completion", "provider not configured, skipping call");
            return MSG_NOT_CONFIGURED.to_string();
        }

        let key = ReplyCache::key(&question, user.map(|u| u.id));
        if let Some(cached) = self.state.cache.get(&key, Instant::now()).await {
            return cached;
        }

        match self.request_with_retry(&question).await {
            Ok(answer) => {
                self.state.cache.insert(key, answer.clone(), Instant::now()).await;
                answer
            }
            Err(Error::RateLimited) => {
                warn!(op = "completion", "provider rate limit persisted through retries");
                MSG_RATE_LIMITED.to_string()
            }
            Err(Error::Provider { status, message }) => {
                warn!(op = "completion", status, error = %message, "provider error");
                fallback_for_status(status).to_string()
            }
            Err(Error::Network(err)) => {
                warn!(op = "completion", error = %err, "network error reaching provider");
                MSG_CONNECTION_ERROR.to_string()
            }
            Err(err) => {
                warn!(op = "completion", error = %err, "unexpected completion failure");
                MSG_PROVIDER_DOWN.to_string()
            }
        }
    }

    /// One best-effort credential probe against the models endpoint,
    /// intended for process start. Non-fatal either way.
    pub async fn verify_credentials(&self) -> bool {
        if self.config.api_key.is_none() {
            debug!(op = "verify_credentials", "provider not configured, skipping probe");
            return false;
        }

        let response = self
            .build_get_request("/models")
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!(op = "verify_credentials", "completion credential check passed");
                true
            }
            Ok(resp) => {
                warn!(
                    op = "verify_credentials",
                    status = resp.status().as_u16(),
                    "completion credential check failed"
                );
                false
            }
            Err(err) => {
                warn!(op = "verify_credentials", error = %err, "completion credential check error");
                false
            }
        }
    }

    async fn request_with_retry(&self, question: &str) -> Result<String> {
        let system_prompt = self.system_prompt().await;

        let mut attempt = 1u32;
        loop {
            self.state.throttle.acquire().await;
            match self.send_once(&system_prompt, question).await {
                Err(Error::RateLimited) => {
                    let delay = Duration::from_secs(RETRY_BACKOFF_BASE_SECS.pow(attempt));
                    warn!(
                        op = "completion",
                        attempt,
                        delay_secs = delay.as_secs(),
                        "provider rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    if attempt >= RETRY_MAX_ATTEMPTS {
                        return Err(Error::RateLimited);
                    }
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn send_once(&self, system_prompt: &str, question: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: question.to_string(),
                },
            ],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        debug!(op = "completion", model = %self.config.model, "sending completion request");

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(Error::RateLimited);
        }

        if !status.is_success() {
            let body: ProviderErrorResponse =
                response.json().await.unwrap_or(ProviderErrorResponse {
                    error: ProviderErrorBody {
                        message: "Unknown error".to_string(),
                        error_type: "unknown".to_string(),
                        code: None,
                    },
                });
            return Err(Error::Provider {
                status: status.as_u16(),
                message: body.error.message,
            });
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let content = result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(op = "completion", response_len = content.len(), "completion received");
        Ok(content)
    }

    /// Fixed system prompt plus a best-effort usage-statistics block.
    async fn system_prompt(&self) -> String {
        let stats = match self.store.usage_counts().await {
            Ok(counts) => format!(
                "Comunidades: {} · Unidades: {} · Residentes: {} · Gastos: {} · Visitas: {} · Encomiendas: {}",
                counts.communities,
                counts.units,
                counts.residents,
                counts.expenses,
                counts.visitors,
                counts.parcels
            ),
            Err(err) => {
                debug!(op = "completion", error = %err, "usage counts unavailable");
                STATS_UNAVAILABLE.to_string()
            }
        };
        format!("{SYSTEM_PROMPT}\n\nUso actual de la plataforma — {stats}")
    }

    /// Build a POST request with authentication.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {api_key}"));
        }

        req.header("Content-Type", "application/json")
    }

    /// Build a GET request with authentication.
    fn build_get_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.get(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {api_key}"));
        }

        req
    }
}

/// Fixed fallback reply for a non-429 provider error status.
fn fallback_for_status(status: u16) -> &'static str {
    match status {
        400 => MSG_BAD_REQUEST,
        401 | 403 => MSG_PROVIDER_AUTH,
        _ => MSG_PROVIDER_DOWN,
    }
}
