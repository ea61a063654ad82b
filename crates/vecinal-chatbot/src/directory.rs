//! Seedable in-memory [`DirectoryStore`].
//!
//! Stands in for the platform's persistence layer: the API binary seeds
//! it from a JSON fixture file, and tests use it as their fixture store.
//! Honors the full filter/order/limit contract of the trait, including
//! match-nothing filters, and exposes a failure toggle so error paths
//! can be exercised.

use std::cmp::Reverse;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use vecinal_core::models::*;
use vecinal_core::{DirectoryStore, Error, RecordFilter, Result};

/// The full record set backing an [`InMemoryDirectory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryData {
    #[serde(default)]
    pub communities: Vec<Community>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub common_spaces: Vec<CommonSpace>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,
    #[serde(default)]
    pub residents: Vec<Resident>,
    #[serde(default)]
    pub visitors: Vec<Visitor>,
    #[serde(default)]
    pub parcels: Vec<Parcel>,
}

/// In-memory directory store over a fixed record set.
pub struct InMemoryDirectory {
    data: DirectoryData,
    fail_reads: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new(data: DirectoryData) -> Self {
        Self {
            data,
            fail_reads: AtomicBool::new(false),
        }
    }

    /// A store with no records.
    pub fn empty() -> Self {
        Self::new(DirectoryData::default())
    }

    /// Load the record set from a JSON fixture file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let data: DirectoryData = serde_json::from_str(&raw)?;
        Ok(Self::new(data))
    }

    /// Make every subsequent read fail, for exercising error paths.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Store("simulated directory failure".to_string()));
        }
        Ok(())
    }
}

fn truncated<T>(mut rows: Vec<T>, limit: i64) -> Vec<T> {
    rows.truncate(limit.max(0) as usize);
    rows
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn common_spaces(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<CommonSpace>> {
        self.check_available()?;
        let mut rows: Vec<CommonSpace> = self
            .data
            .common_spaces
            .iter()
            .filter(|s| s.active && filter.allows(s.community_id, None))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(truncated(rows, limit))
    }

    async fn announcements(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Announcement>> {
        self.check_available()?;
        let mut rows: Vec<Announcement> = self
            .data
            .announcements
            .iter()
            .filter(|a| filter.allows(a.community_id, None))
            .cloned()
            .collect();
        rows.sort_by_key(|a| Reverse(a.published_at));
        Ok(truncated(rows, limit))
    }

    async fn expenses(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Expense>> {
        self.check_available()?;
        let mut rows: Vec<Expense> = self
            .data
            .expenses
            .iter()
            .filter(|e| filter.allows(e.community_id, None))
            .cloned()
            .collect();
        rows.sort_by_key(|e| Reverse(e.due_date));
        Ok(truncated(rows, limit))
    }

    async fn residents(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Resident>> {
        self.check_available()?;
        let mut rows: Vec<Resident> = self
            .data
            .residents
            .iter()
            .filter(|r| filter.allows(r.community_id, None))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(truncated(rows, limit))
    }

    async fn visitors(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Visitor>> {
        self.check_available()?;
        let mut rows: Vec<Visitor> = self
            .data
            .visitors
            .iter()
            .filter(|v| filter.allows(v.community_id, Some(v.unit_id)))
            .cloned()
            .collect();
        rows.sort_by_key(|v| Reverse(v.entered_at));
        Ok(truncated(rows, limit))
    }

    async fn parcels(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Parcel>> {
        self.check_available()?;
        let mut rows: Vec<Parcel> = self
            .data
            .parcels
            .iter()
            .filter(|p| filter.allows(p.community_id, Some(p.unit_id)))
            .cloned()
            .collect();
        rows.sort_by_key(|p| Reverse(p.received_at));
        Ok(truncated(rows, limit))
    }

    async fn incomes(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Income>> {
        self.check_available()?;
        let mut rows: Vec<Income> = self
            .data
            .incomes
            .iter()
            .filter(|i| filter.allows(i.community_id, None))
            .cloned()
            .collect();
        rows.sort_by_key(|i| Reverse(i.received_at));
        Ok(truncated(rows, limit))
    }

    async fn expense_categories(
        &self,
        filter: &RecordFilter,
        limit: i64,
    ) -> Result<Vec<ExpenseCategory>> {
        self.check_available()?;
        let mut rows: Vec<ExpenseCategory> = self
            .data
            .expense_categories
            .iter()
            .filter(|c| filter.allows(c.community_id, None))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(truncated(rows, limit))
    }

    async fn units(&self, filter: &RecordFilter, limit: i64) -> Result<Vec<Unit>> {
        self.check_available()?;
        let mut rows: Vec<Unit> = self
            .data
            .units
            .iter()
            .filter(|u| filter.allows(u.community_id, None))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(truncated(rows, limit))
    }

    async fn usage_counts(&self) -> Result<UsageCounts> {
        self.check_available()?;
        Ok(UsageCounts {
            communities: self.data.communities.len() as u64,
            units: self.data.units.len() as u64,
            residents: self.data.residents.len() as u64,
            expenses: self.data.expenses.len() as u64,
            visitors: self.data.visitors.len() as u64,
            parcels: self.data.parcels.len() as u64,
        })
    }
}
