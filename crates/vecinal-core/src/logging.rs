//! Structured logging schema and field name constants for vecinal.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across a request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "chatbot", "gateway", "directory"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "classify", "compose", "completion", "verify_credentials"
pub const OPERATION: &str = "op";

// ─── Chatbot fields ────────────────────────────────────────────────────────

/// Classified topic of a question.
pub const TOPIC: &str = "topic";

/// Entity kind queried from the directory store.
pub const ENTITY: &str = "entity";

/// Privilege class of the request's scope.
pub const ROLE_CLASS: &str = "role_class";

/// Byte length of the inbound question.
pub const QUESTION_LEN: &str = "question_len";

// ─── Gateway fields ────────────────────────────────────────────────────────

/// Cache lookup outcome: "hit" or "miss".
pub const CACHE_OUTCOME: &str = "cache";

/// Send attempt number (1-based) within one gateway call.
pub const ATTEMPT: &str = "attempt";

/// HTTP status returned by the completion provider.
pub const STATUS: &str = "status";

/// Completion model used for the request.
pub const MODEL: &str = "model";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records returned by a directory read.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
