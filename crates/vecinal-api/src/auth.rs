//! Auth-context decoding.
//!
//! Authentication itself lives upstream: the trusted gateway validates
//! the caller and injects the resolved [`UserContext`] as base64-encoded
//! JSON in the `x-auth-context` header. This module only decodes that
//! header; a missing or malformed value degrades to an anonymous
//! request.

use axum::http::HeaderMap;
use base64::Engine;
use tracing::warn;

use vecinal_core::UserContext;

/// Header carrying the upstream-validated user context.
pub const AUTH_CONTEXT_HEADER: &str = "x-auth-context";

/// Extract the caller's context from request headers, if present.
pub fn user_from_headers(headers: &HeaderMap) -> Option<UserContext> {
    let raw = headers.get(AUTH_CONTEXT_HEADER)?.to_str().ok()?;
    match decode(raw) {
        Ok(user) => Some(user),
        Err(err) => {
            warn!(error = %err, "ignoring malformed auth context header");
            None
        }
    }
}

fn decode(raw: &str) -> Result<UserContext, String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(raw)
        .map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}
