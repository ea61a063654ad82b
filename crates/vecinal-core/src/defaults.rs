//! Centralized default constants for the vecinal platform.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// ANSWER PAGE SIZES
// =============================================================================

/// Common spaces shown per answer.
pub const PAGE_COMMON_SPACES: i64 = 5;

/// Announcements shown per answer.
pub const PAGE_ANNOUNCEMENTS: i64 = 5;

/// Common-expense charges shown per answer.
pub const PAGE_EXPENSES: i64 = 3;

/// Residents shown per answer.
pub const PAGE_RESIDENTS: i64 = 10;

/// Visitor log entries shown per answer.
pub const PAGE_VISITORS: i64 = 5;

/// Parcels shown per answer.
pub const PAGE_PARCELS: i64 = 5;

/// Income entries shown per answer.
pub const PAGE_INCOMES: i64 = 5;

/// Expense categories shown per answer.
pub const PAGE_EXPENSE_CATEGORIES: i64 = 20;

/// Units shown per answer.
pub const PAGE_UNITS: i64 = 50;

// =============================================================================
// COMPLETION GATEWAY
// =============================================================================

/// Reply cache time-to-live in seconds.
pub const CACHE_TTL_SECS: u64 = 300;

/// Reply cache capacity in entries.
pub const CACHE_CAPACITY: usize = 128;

/// Minimum interval between outbound provider sends, in milliseconds.
pub const MIN_SEND_INTERVAL_MS: u64 = 1000;

/// Maximum send attempts when the provider rate-limits.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Backoff base: the nth failed attempt sleeps `BASE^n` seconds (2, 4, 8).
pub const RETRY_BACKOFF_BASE_SECS: u64 = 2;

/// Default completion endpoint.
pub const COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completion model.
pub const COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Token budget for a single chatbot answer.
pub const COMPLETION_MAX_TOKENS: u32 = 300;

/// Sampling temperature for chatbot answers.
pub const COMPLETION_TEMPERATURE: f32 = 0.7;

/// Provider request timeout in seconds.
pub const COMPLETION_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;
