// Validation rules shared by the add and edit forms

use super::Field;
use crate::model::{char_len, UserProfile, MIN_NAME_LEN};

pub const NAME_ERROR: &str = "Name must be at least 3 characters.";
pub const COMPANY_ERROR: &str = "Company Name must be at least 3 characters.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("{}", NAME_ERROR)]
    NameTooShort,
    #[error("{}", COMPANY_ERROR)]
    CompanyTooShort,
    #[error("fields still have errors")]
    OutstandingErrors,
}

/// Live per-field messages shown next to `name` and company name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub company: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.company.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::CompanyName => self.company.as_deref(),
            _ => None,
        }
    }

    /// Re-check `field` after it changed to `value`. Only the name and
    /// company name carry live errors; other fields leave both untouched.
    pub fn revalidate(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = min_length_error(value, NAME_ERROR),
            Field::CompanyName => self.company = min_length_error(value, COMPANY_ERROR),
            _ => {}
        }
    }
}

/// `Some(message)` if `value` is shorter than the minimum name length.
pub fn min_length_error(value: &str, message: &str) -> Option<String> {
    if char_len(value) < MIN_NAME_LEN {
        Some(message.to_string())
    } else {
        None
    }
}

/// Gate run before any submission reaches the network.
///
/// The length checks run on the profile itself, independent of the live
/// error strings.
pub fn check_submission(profile: &UserProfile, errors: &FieldErrors) -> Result<(), ValidationError> {
    if !errors.is_empty() {
        return Err(ValidationError::OutstandingErrors);
    }

    if let Some(field) = Field::ALL
        .into_iter()
        .find(|f| f.is_required() && f.get(profile).trim().is_empty())
    {
        return Err(ValidationError::Missing(field));
    }

    if char_len(&profile.name) < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    if char_len(&profile.company.name) < MIN_NAME_LEN {
        return Err(ValidationError::CompanyTooShort);
    }

    Ok(())
}
