//! Form for editing an existing user.

use super::validation::{check_submission, FieldErrors};
use super::{Field, FormError, ModalState, UserForm};
use crate::model::UserRecord;
use crate::notify::{messages, Notifier, Toast};
use crate::service::UserService;
use serde_json::json;
use std::sync::Arc;

pub struct EditUserForm {
    state: ModalState,
    /// Record the form was last populated from.
    source: Option<UserRecord>,
    draft: Option<UserRecord>,
    errors: FieldErrors,
    notifier: Arc<dyn Notifier>,
}

impl EditUserForm {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: ModalState::Closed,
            source: None,
            draft: None,
            errors: FieldErrors::default(),
            notifier,
        }
    }

    /// Point the form at `record` and show it.
    pub fn open(&mut self, record: UserRecord) {
        self.sync(record);
        self.state = ModalState::Open;
    }

    /// Re-populate when a different record is handed in. Handing in the
    /// record the form already came from keeps any unsaved edits.
    pub fn sync(&mut self, record: UserRecord) {
        if self.source.as_ref() == Some(&record) {
            return;
        }
        self.draft = Some(record.clone());
        self.source = Some(record);
        self.errors = FieldErrors::default();
    }

    pub fn draft(&self) -> Option<&UserRecord> {
        self.draft.as_ref()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate locally, then send the edited record.
    pub async fn submit(&mut self, service: &dyn UserService) -> Result<UserRecord, FormError> {
        if self.state != ModalState::Open {
            return Err(FormError::NotOpen);
        }
        let Some(draft) = self.draft.clone() else {
            return Err(FormError::NotOpen);
        };

        if let Err(e) = check_submission(&draft.profile, &self.errors) {
            self.notifier.event(
                "validation_rejected",
                json!({ "form": "edit", "id": draft.id, "reason": e.to_string() }),
            );
            self.notifier.toast(Toast::error(messages::FIX_ERRORS));
            return Err(e.into());
        }

        self.state = ModalState::Submitting;
        match service.update_user(&draft).await {
            Ok(accepted) => {
                self.state = ModalState::Closed;
                self.notifier.toast(Toast::success(messages::UPDATED));
                Ok(accepted)
            }
            Err(e) => {
                self.state = ModalState::Open;
                self.notifier.event(
                    "request_failed",
                    json!({ "op": "edit", "id": draft.id, "error": e.to_string() }),
                );
                self.notifier.toast(Toast::error(messages::EDIT_FAILED));
                Err(e.into())
            }
        }
    }
}

impl UserForm for EditUserForm {
    fn state(&self) -> ModalState {
        self.state
    }

    fn value(&self, field: Field) -> &str {
        self.draft
            .as_ref()
            .map(|d| field.get(&d.profile))
            .unwrap_or("")
    }

    fn set_field(&mut self, field: Field, value: &str) {
        if let Some(draft) = self.draft.as_mut() {
            field.set(&mut draft.profile, value);
            self.errors.revalidate(field, value);
        }
    }

    fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    fn username(&self) -> String {
        self.draft
            .as_ref()
            .map(|d| d.profile.username.clone())
            .unwrap_or_default()
    }

    fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }
}
