//! Domain records and request-scoped identity types.
//!
//! The directory records mirror what the excluded persistence layer
//! stores; the chatbot only ever reads them. `UserContext` is supplied
//! per request by the auth collaborator and is treated as already
//! validated.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// IDENTITY
// =============================================================================

/// Platform role, as issued by the auth collaborator.
///
/// Scope precedence is SuperAdmin > CommunityAdmin > Concierge >
/// Resident-family (Resident/Owner/Tenant); see [`crate::scope::ScopePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    SuperAdmin,
    CommunityAdmin,
    Concierge,
    Resident,
    Owner,
    Tenant,
}

/// Authenticated caller context, immutable for the request's duration.
///
/// `community_ids` is ordered: the first entry is the community of the
/// user's first active unit, which single-community roles are scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub roles: HashSet<RoleName>,
    #[serde(default)]
    pub community_ids: Vec<Uuid>,
    #[serde(default)]
    pub admin_community_ids: Vec<Uuid>,
    #[serde(default)]
    pub unit_ids: Vec<Uuid>,
}

// =============================================================================
// DIRECTORY RECORDS
// =============================================================================

/// A managed community (building, condominium, gated neighborhood).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub id: Uuid,
    pub name: String,
}

/// A housing unit inside a community.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub community_id: Uuid,
    /// Display label, e.g. "Depto 402".
    pub label: String,
    pub tower: Option<String>,
}

/// A reservable common space (pool, gym, event room...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonSpace {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    /// Maximum number of people, when the community tracks it.
    pub capacity: Option<u32>,
    pub requires_reservation: bool,
    pub open_hours: Option<String>,
    pub active: bool,
}

/// A community announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

/// A common-expense charge for a billing period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub community_id: Uuid,
    /// Billing period, e.g. "2026-07".
    pub period: String,
    /// Amount in Chilean pesos.
    pub amount: i64,
    pub due_date: NaiveDate,
    pub paid: bool,
}

/// An income entry (payment received, rental of a space...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub community_id: Uuid,
    pub description: String,
    /// Amount in Chilean pesos.
    pub amount: i64,
    pub received_at: DateTime<Utc>,
}

/// An expense category of a community's chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// A resident of a unit. Contact fields are only rendered for
/// authenticated callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resident {
    pub id: Uuid,
    pub community_id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A visitor log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    pub id: Uuid,
    pub community_id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub entered_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

/// A parcel received at the concierge desk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parcel {
    pub id: Uuid,
    pub community_id: Uuid,
    pub unit_id: Uuid,
    pub carrier: Option<String>,
    pub description: String,
    pub received_at: DateTime<Utc>,
    pub picked_up_at: Option<DateTime<Utc>>,
}

/// Platform-wide record counts, used for the completion gateway's
/// usage-statistics block.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsageCounts {
    pub communities: u64,
    pub units: u64,
    pub residents: u64,
    pub expenses: u64,
    pub visitors: u64,
    pub parcels: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_name_wire_format_matches_auth_collaborator() {
        assert_eq!(
            serde_json::to_string(&RoleName::SuperAdmin).unwrap(),
            "\"SUPER_ADMIN\""
        );
        assert_eq!(
            serde_json::to_string(&RoleName::CommunityAdmin).unwrap(),
            "\"COMMUNITY_ADMIN\""
        );
        assert_eq!(
            serde_json::from_str::<RoleName>("\"CONCIERGE\"").unwrap(),
            RoleName::Concierge
        );
        assert_eq!(
            serde_json::from_str::<RoleName>("\"TENANT\"").unwrap(),
            RoleName::Tenant
        );
    }

    #[test]
    fn user_context_decodes_with_missing_collections() {
        let json = r#"{
            "id": "018f2f6e-7cbb-7bbb-8bbb-000000000001",
            "name": "Carla Rojas"
        }"#;

        let user: UserContext = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Carla Rojas");
        assert!(user.roles.is_empty());
        assert!(user.community_ids.is_empty());
        assert!(user.admin_community_ids.is_empty());
        assert!(user.unit_ids.is_empty());
    }

    #[test]
    fn user_context_decodes_camel_case_fields() {
        let json = r#"{
            "id": "018f2f6e-7cbb-7bbb-8bbb-000000000001",
            "name": "Carla Rojas",
            "roles": ["RESIDENT", "OWNER"],
            "communityIds": ["018f2f6e-7cbb-7bbb-8bbb-000000000002"],
            "adminCommunityIds": [],
            "unitIds": ["018f2f6e-7cbb-7bbb-8bbb-000000000003"]
        }"#;

        let user: UserContext = serde_json::from_str(json).unwrap();
        assert!(user.roles.contains(&RoleName::Resident));
        assert!(user.roles.contains(&RoleName::Owner));
        assert_eq!(user.community_ids.len(), 1);
        assert_eq!(user.unit_ids.len(), 1);
    }

    #[test]
    fn usage_counts_default_is_zeroed() {
        let counts = UsageCounts::default();
        assert_eq!(counts.communities, 0);
        assert_eq!(counts.parcels, 0);
    }
}
