//! # vecinal-core
//!
//! Core types, traits, and abstractions for the vecinal platform.
//!
//! This crate provides the foundational data structures and trait
//! definitions that other vecinal crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod scope;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use scope::{EntityKind, RecordFilter, RoleClass, ScopePolicy};
pub use traits::*;
