//! Role-derived visibility scoping for directory queries.
//!
//! Every request derives a single [`ScopePolicy`] from its optional
//! [`UserContext`] and asks it for the [`RecordFilter`] to apply to each
//! entity kind. This keeps the role ladder in one place instead of
//! re-deriving `is_super_admin`/`is_concierge` flags in every topic
//! handler.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{RoleName, UserContext};

// =============================================================================
// ENTITY KINDS
// =============================================================================

/// The entity kinds the chatbot reads from the directory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    CommonSpaces,
    Announcements,
    Expenses,
    Residents,
    Visitors,
    Parcels,
    Incomes,
    ExpenseCategories,
    Units,
}

impl EntityKind {
    /// Stable name for structured logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::CommonSpaces => "common_spaces",
            EntityKind::Announcements => "announcements",
            EntityKind::Expenses => "expenses",
            EntityKind::Residents => "residents",
            EntityKind::Visitors => "visitors",
            EntityKind::Parcels => "parcels",
            EntityKind::Incomes => "incomes",
            EntityKind::ExpenseCategories => "expense_categories",
            EntityKind::Units => "units",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RECORD FILTER
// =============================================================================

/// Visibility filter applied to a directory read.
///
/// `None` means unrestricted on that dimension; `Some(empty)` is a filter
/// that matches nothing. Store implementations must honor the
/// match-nothing case by returning an empty result, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_ids: Option<Vec<Uuid>>,
}

impl RecordFilter {
    /// A filter with no restrictions (matches every record).
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Restrict to the given communities. An empty list matches nothing.
    pub fn communities(ids: Vec<Uuid>) -> Self {
        Self {
            community_ids: Some(ids),
            unit_ids: None,
        }
    }

    /// Additionally restrict to the given units. An empty list matches nothing.
    pub fn with_units(mut self, ids: Vec<Uuid>) -> Self {
        self.unit_ids = Some(ids);
        self
    }

    /// True when no record can satisfy this filter.
    pub fn matches_nothing(&self) -> bool {
        matches!(&self.community_ids, Some(ids) if ids.is_empty())
            || matches!(&self.unit_ids, Some(ids) if ids.is_empty())
    }

    /// Whether a record with the given community (and optionally unit)
    /// passes this filter.
    pub fn allows(&self, community_id: Uuid, unit_id: Option<Uuid>) -> bool {
        if let Some(ids) = &self.community_ids {
            if !ids.contains(&community_id) {
                return false;
            }
        }
        if let Some(ids) = &self.unit_ids {
            match unit_id {
                Some(unit) if ids.contains(&unit) => {}
                _ => return false,
            }
        }
        true
    }
}

// =============================================================================
// SCOPE POLICY
// =============================================================================

/// The privilege class a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleClass {
    SuperAdmin,
    CommunityAdmin,
    Concierge,
    Resident,
    Anonymous,
}

/// Role-derived visibility scope, computed once per request.
///
/// Exactly the highest-privilege matching role determines the scope:
/// SuperAdmin > CommunityAdmin > Concierge > Resident-family, first match
/// wins. Owner and Tenant scope identically to Resident. Unauthenticated
/// callers see everything a SuperAdmin sees, minus personalization and
/// resident contact fields.
#[derive(Debug, Clone)]
pub struct ScopePolicy {
    class: RoleClass,
    communities: Vec<Uuid>,
    units: Vec<Uuid>,
    display_name: Option<String>,
}

impl ScopePolicy {
    /// Derive the scope for an optionally authenticated caller.
    pub fn for_user(user: Option<&UserContext>) -> Self {
        let Some(user) = user else {
            return Self {
                class: RoleClass::Anonymous,
                communities: Vec::new(),
                units: Vec::new(),
                display_name: None,
            };
        };

        let display_name = Some(user.name.clone());

        if user.roles.contains(&RoleName::SuperAdmin) {
            return Self {
                class: RoleClass::SuperAdmin,
                communities: Vec::new(),
                units: Vec::new(),
                display_name,
            };
        }

        if user.roles.contains(&RoleName::CommunityAdmin) {
            return Self {
                class: RoleClass::CommunityAdmin,
                communities: user.admin_community_ids.clone(),
                units: Vec::new(),
                display_name,
            };
        }

        // Single-community roles are pinned to the first active unit's
        // community. With no community the filters match nothing.
        let first_community: Vec<Uuid> = user.community_ids.first().copied().into_iter().collect();

        if user.roles.contains(&RoleName::Concierge) {
            return Self {
                class: RoleClass::Concierge,
                communities: first_community,
                units: Vec::new(),
                display_name,
            };
        }

        // Resident, Owner, Tenant — and any future role — fall through to
        // the lowest-privilege scope.
        Self {
            class: RoleClass::Resident,
            communities: first_community,
            units: user.unit_ids.clone(),
            display_name,
        }
    }

    /// The privilege class of this scope.
    pub fn class(&self) -> RoleClass {
        self.class
    }

    /// Caller display name, when authenticated.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Whether answers may address the caller by name.
    pub fn is_personalized(&self) -> bool {
        self.class != RoleClass::Anonymous
    }

    /// Whether resident contact fields (email/phone) may be rendered.
    pub fn include_contact_details(&self) -> bool {
        self.class != RoleClass::Anonymous
    }

    /// Build the visibility filter for a directory read of `entity`.
    pub fn filter_for(&self, entity: EntityKind) -> RecordFilter {
        match self.class {
            RoleClass::SuperAdmin | RoleClass::Anonymous => RecordFilter::unrestricted(),
            RoleClass::CommunityAdmin | RoleClass::Concierge => {
                RecordFilter::communities(self.communities.clone())
            }
            RoleClass::Resident => {
                let filter = RecordFilter::communities(self.communities.clone());
                // Residents only see their own units' visitor and parcel
                // logs, not the whole community's.
                match entity {
                    EntityKind::Visitors | EntityKind::Parcels => {
                        filter.with_units(self.units.clone())
                    }
                    _ => filter,
                }
            }
        }
    }
}
