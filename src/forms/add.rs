//! Form for creating a user.

use super::validation::{check_submission, FieldErrors};
use super::{Field, FormError, ModalState, UserForm};
use crate::model::{derive_username, UserProfile, UserRecord};
use crate::notify::{messages, Notifier, Toast};
use crate::service::UserService;
use serde_json::json;
use std::sync::Arc;

pub struct AddUserForm {
    state: ModalState,
    draft: UserProfile,
    errors: FieldErrors,
    notifier: Arc<dyn Notifier>,
}

impl AddUserForm {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: ModalState::Closed,
            draft: UserProfile::default(),
            errors: FieldErrors::default(),
            notifier,
        }
    }

    pub fn open(&mut self) {
        self.state = ModalState::Open;
    }

    pub fn draft(&self) -> &UserProfile {
        &self.draft
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn username_preview(&self) -> String {
        derive_username(&self.draft.name)
    }

    /// Validate locally, then create the user remotely.
    ///
    /// On success the form closes and starts blank next time; on failure it
    /// stays open with the draft intact.
    pub async fn submit(&mut self, service: &dyn UserService) -> Result<UserRecord, FormError> {
        if self.state != ModalState::Open {
            return Err(FormError::NotOpen);
        }

        if let Err(e) = check_submission(&self.draft, &self.errors) {
            self.notifier.event(
                "validation_rejected",
                json!({ "form": "add", "reason": e.to_string() }),
            );
            self.notifier.toast(Toast::error(messages::FIX_ERRORS));
            return Err(e.into());
        }

        let mut outgoing = self.draft.clone();
        outgoing.username = derive_username(&outgoing.name);

        self.state = ModalState::Submitting;
        match service.create_user(&outgoing).await {
            Ok(created) => {
                self.state = ModalState::Closed;
                self.draft = UserProfile::default();
                self.errors = FieldErrors::default();
                self.notifier.toast(Toast::success(messages::ADDED));
                Ok(created)
            }
            Err(e) => {
                self.state = ModalState::Open;
                self.notifier.event(
                    "request_failed",
                    json!({ "op": "create", "error": e.to_string() }),
                );
                self.notifier.toast(Toast::error(messages::ADD_FAILED));
                Err(e.into())
            }
        }
    }
}

impl UserForm for AddUserForm {
    fn state(&self) -> ModalState {
        self.state
    }

    fn value(&self, field: Field) -> &str {
        field.get(&self.draft)
    }

    fn set_field(&mut self, field: Field, value: &str) {
        field.set(&mut self.draft, value);
        self.errors.revalidate(field, value);
    }

    fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    fn username(&self) -> String {
        self.username_preview()
    }

    /// Close without discarding what was typed.
    fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }
}
