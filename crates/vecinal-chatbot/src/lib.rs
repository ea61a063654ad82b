//! # vecinal-chatbot
//!
//! The chatbot core of the vecinal platform.
//!
//! This crate provides:
//! - Intent classification over free-text questions (ordered keyword table)
//! - Quick-reply rules for greetings, help, and status probes
//! - Role-scoped answer composition against the directory store
//! - A completion-provider fallback with reply caching, send throttling,
//!   and bounded retry/backoff
//! - A seedable in-memory directory store for the binary and tests
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::time::Duration;
//! use vecinal_chatbot::directory::InMemoryDirectory;
//! use vecinal_chatbot::gateway::{CompletionConfig, CompletionGateway, GatewayState};
//! use vecinal_chatbot::service::ChatbotService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(InMemoryDirectory::empty());
//!     let state = Arc::new(GatewayState::from_env());
//!     let gateway =
//!         CompletionGateway::new(CompletionConfig::from_env(), state, store.clone()).unwrap();
//!     let service = ChatbotService::new(store, gateway);
//!
//!     let answer = service.answer("espacios comunes", None).await;
//!     println!("{answer}");
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod compose;
pub mod directory;
pub mod gateway;
pub mod render;
pub mod service;
pub mod throttle;
pub mod wire;

// Re-export core types
pub use vecinal_core::*;

pub use cache::ReplyCache;
pub use classify::{classify, normalize, quick_reply, Topic};
pub use compose::ResponseComposer;
pub use directory::{DirectoryData, InMemoryDirectory};
pub use gateway::{CompletionConfig, CompletionGateway, GatewayState};
pub use service::ChatbotService;
pub use throttle::SendThrottle;
