//! Transient notifications (toasts) and diagnostic events.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: &str) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.to_string(),
        }
    }
}

/// Where the controller and forms report outcomes.
///
/// `toast` is what the operator sees; `event` is the diagnostic log.
pub trait Notifier: Send + Sync {
    fn toast(&self, toast: Toast);

    fn event(&self, _event_type: &str, _data: Value) {}
}

/// Toast messages, worded as the operator sees them.
pub mod messages {
    pub const LOAD_FAILED: &str = "Error While Fetching data!";
    pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this user?";
    pub const DELETED: &str = "User deleted successfully!";
    pub const DELETE_FAILED: &str = "Error While deleting user!";
    pub const UPDATED: &str = "User updated successfully!";
    pub const UPDATE_FAILED: &str = "Error While updating user!";
    pub const ADDED: &str = "User added successfully!";
    pub const ADD_FAILED: &str = "Error adding user. Please try again.";
    pub const EDIT_FAILED: &str = "Error updating user. Please try again.";
    pub const FIX_ERRORS: &str = "Please fix the errors before submitting.";
}
