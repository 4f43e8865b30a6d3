//! Add and edit forms for user records.
//!
//! Both forms edit the same set of fields, validate `name` and company name
//! as they change, refuse submission locally when validation fails, and hand
//! the server's copy of the record back to the caller on success.

pub mod add;
pub mod edit;
pub mod validation;

pub use add::AddUserForm;
pub use edit::EditUserForm;
pub use validation::{FieldErrors, ValidationError};

use crate::model::{Company, UserProfile};
use crate::service::ServiceError;
use std::fmt;

/// Modal lifecycle shared by both forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("form is not open")]
    NotOpen,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] ServiceError),
}

/// Editable fields. `username` is deliberately absent: it is derived on
/// create and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Street,
    City,
    Suite,
    Zipcode,
    Website,
    CompanyName,
}

impl Field {
    /// Fields in form order.
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Street,
        Field::City,
        Field::Suite,
        Field::Zipcode,
        Field::Website,
        Field::CompanyName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Street => "Street",
            Field::City => "City",
            Field::Suite => "Suite",
            Field::Zipcode => "Zipcode",
            Field::Website => "Website",
            Field::CompanyName => "Company Name",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::Name
                | Field::Email
                | Field::Phone
                | Field::Street
                | Field::City
                | Field::CompanyName
        )
    }

    pub fn get(self, profile: &UserProfile) -> &str {
        match self {
            Field::Name => &profile.name,
            Field::Email => &profile.email,
            Field::Phone => &profile.phone,
            Field::Street => &profile.address.street,
            Field::City => &profile.address.city,
            Field::Suite => &profile.address.suite,
            Field::Zipcode => &profile.address.zipcode,
            Field::Website => &profile.website,
            Field::CompanyName => &profile.company.name,
        }
    }

    /// Write `value` into the profile. Setting the company name replaces the
    /// whole company object with just the name.
    pub fn set(self, profile: &mut UserProfile, value: &str) {
        let value = value.to_string();
        match self {
            Field::Name => profile.name = value,
            Field::Email => profile.email = value,
            Field::Phone => profile.phone = value,
            Field::Street => profile.address.street = value,
            Field::City => profile.address.city = value,
            Field::Suite => profile.address.suite = value,
            Field::Zipcode => profile.address.zipcode = value,
            Field::Website => profile.website = value,
            Field::CompanyName => profile.company = Company::named(&value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Common surface the front-end fills in field by field.
pub trait UserForm {
    fn state(&self) -> ModalState;
    fn value(&self, field: Field) -> &str;
    fn set_field(&mut self, field: Field, value: &str);
    fn field_error(&self, field: Field) -> Option<&str>;
    /// Username as displayed: the derived preview on add, the stored value
    /// on edit.
    fn username(&self) -> String;
    fn cancel(&mut self);

    fn is_open(&self) -> bool {
        self.state() != ModalState::Closed
    }
}
