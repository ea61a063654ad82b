//! Core traits for vecinal abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;
use crate::scope::RecordFilter;

// =============================================================================
// DIRECTORY STORE
// =============================================================================

/// Read-only access to the platform's directory of records.
///
/// This is the chatbot's boundary to the excluded persistence layer: the
/// chatbot never writes. Every method takes the visibility filter derived
/// from the caller's scope and a result limit; the ordering contract is
/// part of each method's documentation. Implementations must honor
/// match-nothing filters (see [`RecordFilter::matches_nothing`]) by
/// returning an empty result, never an error.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Active common spaces, name-ascending.
    async fn common_spaces(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<CommonSpace>>;

    /// Announcements, newest-first by publication time.
    async fn announcements(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Announcement>>;

    /// Common-expense charges, newest-first by due date.
    async fn expenses(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Expense>>;

    /// Residents, name-ascending.
    async fn residents(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Resident>>;

    /// Visitor log entries, newest-first by entry time.
    async fn visitors(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Visitor>>;

    /// Parcels, newest-first by reception time.
    async fn parcels(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Parcel>>;

    /// Income entries, newest-first by reception time.
    async fn incomes(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Income>>;

    /// Expense categories, name-ascending.
    async fn expense_categories(
        &self,
        filter: &RecordFilter,
        limit: i64,
    ) -> Result<Vec<ExpenseCategory>>;

    /// Units, label-ascending.
    async fn units(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Unit>>;

    /// Platform-wide record counts for the gateway's statistics block.
    async fn usage_counts(&self) -> Result<UsageCounts>;
}
