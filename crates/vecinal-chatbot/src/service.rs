//! The chatbot request pipeline.
//!
//! empty-check → quick-reply rules → classifier → (composer | gateway).
//! Infallible by contract: every path returns a reply string.

use std::sync::Arc;

use tracing::debug;

use vecinal_core::{DirectoryStore, UserContext};

use crate::classify::{classify, normalize, quick_reply};
use crate::compose::ResponseComposer;
use crate::gateway::CompletionGateway;
use crate::render::MSG_EMPTY_QUESTION;

/// End-to-end chatbot service: one call per inbound question.
pub struct ChatbotService {
    composer: ResponseComposer,
    gateway: CompletionGateway,
}

impl ChatbotService {
    pub fn new(store: Arc<dyn DirectoryStore>, gateway: CompletionGateway) -> Self {
        Self {
            composer: ResponseComposer::new(store),
            gateway,
        }
    }

    /// Answer a question for an optionally authenticated caller.
    pub async fn answer(&self, question: &str, user: Option<&UserContext>) -> String {
        let normalized = normalize(question);

        if normalized.is_empty() {
            return MSG_EMPTY_QUESTION.to_string();
        }

        if let Some(reply) = quick_reply(&normalized, user) {
            debug!(op = "quick_reply", question_len = normalized.len(), "quick rule fired");
            return reply;
        }

        match classify(&normalized) {
            Some(topic) => {
                debug!(op = "classify", topic = topic.as_str(), "topic matched");
                self.composer.compose(topic, user).await
            }
            None => {
                debug!(op = "classify", "no topic matched, using completion fallback");
                self.gateway.answer(&normalized, user).await
            }
        }
    }

    /// Best-effort startup probe of the completion credential.
    pub async fn verify_credentials(&self) -> bool {
        self.gateway.verify_credentials().await
    }
}
