//! Scoped answer composition for classified topics.
//!
//! Derives the caller's [`ScopePolicy`] once, issues the topic's
//! directory reads with the scoped filter and page limit, and renders
//! the answer. Store failures are logged and collapse to the fixed
//! system-error reply; the caller never sees an `Err`.

use std::sync::Arc;

use tracing::{debug, warn};

use vecinal_core::defaults::*;
use vecinal_core::{DirectoryStore, Result, ScopePolicy, UserContext};

use crate::classify::Topic;
use crate::render;

/// Composes formatted answers for matched topics.
pub struct ResponseComposer {
    store: Arc<dyn DirectoryStore>,
}

impl ResponseComposer {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Compose the answer for `topic` under the caller's scope.
    ///
    /// Infallible by contract: empty results become the topic's "no
    /// records" reply, store errors become the fixed system-error reply.
    pub async fn compose(&self, topic: Topic, user: Option<&UserContext>) -> String {
        let scope = ScopePolicy::for_user(user);
        match self.compose_scoped(topic, &scope).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(
                    topic = topic.as_str(),
                    error = %err,
                    "directory read failed while composing answer"
                );
                render::MSG_STORE_ERROR.to_string()
            }
        }
    }

    async fn compose_scoped(&self, topic: Topic, scope: &ScopePolicy) -> Result<String> {
        let filter = scope.filter_for(topic.entity());

        let answer = match topic {
            Topic::CommonSpaces => {
                let rows = self.store.common_spaces(&filter, PAGE_COMMON_SPACES).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_common_spaces(scope, &rows)
                }
            }
            Topic::Announcements => {
                let rows = self.store.announcements(&filter, PAGE_ANNOUNCEMENTS).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_announcements(&rows)
                }
            }
            Topic::Expenses => {
                let rows = self.store.expenses(&filter, PAGE_EXPENSES).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_expenses(&rows)
                }
            }
            Topic::Residents => {
                let rows = self.store.residents(&filter, PAGE_RESIDENTS).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_residents(scope, &rows)
                }
            }
            Topic::Visitors => {
                let rows = self.store.visitors(&filter, PAGE_VISITORS).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_visitors(&rows)
                }
            }
            Topic::Parcels => {
                let rows = self.store.parcels(&filter, PAGE_PARCELS).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_parcels(&rows)
                }
            }
            Topic::Income => {
                let rows = self.store.incomes(&filter, PAGE_INCOMES).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_incomes(&rows)
                }
            }
            Topic::ExpenseCategories => {
                let rows = self
                    .store
                    .expense_categories(&filter, PAGE_EXPENSE_CATEGORIES)
                    .await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_expense_categories(&rows)
                }
            }
            Topic::Units => {
                let rows = self.store.units(&filter, PAGE_UNITS).await?;
                debug!(topic = topic.as_str(), result_count = rows.len(), "composed");
                if rows.is_empty() {
                    render::empty_message(topic).to_string()
                } else {
                    render::render_units(&rows)
                }
            }
        };

        Ok(answer)
    }
}
