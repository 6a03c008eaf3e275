//! Field-level rules for a [`UserDraft`].
//!
//! Every rule runs on every call so several errors can be reported at once.
//! There are no cross-field rules and the only email format check is `@`.

use crate::model::{UserDraft, UserField, ValidationErrors};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email must be valid";
pub const BIRTH_DATE_REQUIRED: &str = "Birth date is required";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_name(value: &str) -> Option<&'static str> {
    is_blank(value).then_some(NAME_REQUIRED)
}

fn check_email(value: &str) -> Option<&'static str> {
    if is_blank(value) {
        Some(EMAIL_REQUIRED)
    } else if !value.contains('@') {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

fn check_birth_date(value: &str) -> Option<&'static str> {
    is_blank(value).then_some(BIRTH_DATE_REQUIRED)
}

/// Run all field rules against `draft`.
pub fn validate(draft: &UserDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in UserField::ALL {
        let value = draft.get(field);
        let failure = match field {
            UserField::Name => check_name(value),
            UserField::Email => check_email(value),
            UserField::BirthDate => check_birth_date(value),
        };
        if let Some(message) = failure {
            errors.insert(field, message);
        }
    }
    errors
}
