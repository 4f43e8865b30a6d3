//! The user list: fetched once, held in memory, mutated only after the remote
//! service confirms a change.

use crate::model::{UserId, UserRecord};
use crate::notify::{messages, Notifier, Toast};
use crate::service::{ServiceError, UserService};
use serde_json::json;
use std::sync::Arc;

/// Interactive yes/no question asked before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

pub struct UserListController {
    service: Arc<dyn UserService>,
    notifier: Arc<dyn Notifier>,
    users: Vec<UserRecord>,
    loading: bool,
    release_busy_on_cancel: bool,
}

impl UserListController {
    /// The list starts out loading; `load_all` clears the flag.
    pub fn new(service: Arc<dyn UserService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            users: Vec::new(),
            loading: true,
            release_busy_on_cancel: false,
        }
    }

    /// Clear the busy flag when a delete confirmation is declined instead of
    /// leaving it armed.
    pub fn with_release_busy_on_cancel(mut self, release: bool) -> Self {
        self.release_busy_on_cancel = release;
        self
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Fetch the full user set. No retry on failure.
    pub async fn load_all(&mut self) {
        match self.service.list_users().await {
            Ok(users) => {
                self.notifier
                    .event("users_loaded", json!({ "count": users.len() }));
                self.users = users;
            }
            Err(e) => {
                self.log_failure("load", &e);
                self.notifier.toast(Toast::error(messages::LOAD_FAILED));
            }
        }
        self.loading = false;
    }

    pub fn filter(&self, query: &str) -> Vec<&UserRecord> {
        filter_users(&self.users, query)
    }

    /// Ask for confirmation, then delete remotely and drop the local entry.
    ///
    /// The busy flag is armed before the question is asked. A declined
    /// confirmation leaves it armed unless `release_busy_on_cancel` is set.
    pub async fn delete(&mut self, id: UserId, confirm: &mut dyn Confirm) -> DeleteOutcome {
        self.loading = true;

        if !confirm.confirm(messages::DELETE_CONFIRM) {
            if self.release_busy_on_cancel {
                self.loading = false;
            }
            self.notifier.event(
                "delete_cancelled",
                json!({ "id": id, "busy": self.loading }),
            );
            return DeleteOutcome::Cancelled;
        }

        let outcome = match self.service.delete_user(id).await {
            Ok(()) => {
                self.users.retain(|u| u.id != id);
                self.notifier.event("user_deleted", json!({ "id": id }));
                self.notifier.toast(Toast::success(messages::DELETED));
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.log_failure("delete", &e);
                self.notifier.toast(Toast::error(messages::DELETE_FAILED));
                DeleteOutcome::Failed
            }
        };
        self.loading = false;
        outcome
    }

    /// Send the full record; on success the server's body replaces the local
    /// entry with the same id. An id no longer in the list is not re-added.
    pub async fn update(&mut self, record: UserRecord) -> Result<(), ServiceError> {
        match self.service.update_user(&record).await {
            Ok(accepted) => {
                let id = record.id;
                for user in self.users.iter_mut().filter(|u| u.id == id) {
                    *user = accepted.clone();
                }
                self.notifier.event("user_updated", json!({ "id": id }));
                self.notifier.toast(Toast::success(messages::UPDATED));
                Ok(())
            }
            Err(e) => {
                self.log_failure("update", &e);
                self.notifier.toast(Toast::error(messages::UPDATE_FAILED));
                Err(e)
            }
        }
    }

    /// Take a record the add form got back from the service.
    ///
    /// The mock service hands out the same id for every create; an existing
    /// entry with that id is replaced in place so ids stay unique.
    pub fn user_added(&mut self, record: UserRecord) {
        self.notifier
            .event("user_created", json!({ "id": record.id }));
        match self.users.iter_mut().find(|u| u.id == record.id) {
            Some(existing) => *existing = record,
            None => self.users.push(record),
        }
    }

    fn log_failure(&self, op: &str, err: &ServiceError) {
        self.notifier.event(
            "request_failed",
            json!({ "op": op, "error": err.to_string() }),
        );
    }
}

/// Records matching `query`, in list order.
///
/// Name, email and username match case-insensitively; phone matches as-is.
pub fn filter_users<'a>(users: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    let lowered = query.to_lowercase();
    users
        .iter()
        .filter(|u| matches_query(u, query, &lowered))
        .collect()
}

fn matches_query(user: &UserRecord, query: &str, lowered: &str) -> bool {
    let p = &user.profile;
    p.name.to_lowercase().contains(lowered)
        || p.email.to_lowercase().contains(lowered)
        || p.username.to_lowercase().contains(lowered)
        || p.phone.contains(query)
}
