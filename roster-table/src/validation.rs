//! Field validation
//!
//! Two layers of checks:
//!
//! - live checks ([`validate`], [`validate_email_format`]) run on every
//!   keystroke and only look at the character class / shape
//! - submit checks ([`validate_details_submit`], [`validate_email_submit`])
//!   additionally require every field to be non-empty
//!
//! An empty first name passes the live check but fails on submit.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::modal::DetailsDraft;

static ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]*$").expect("valid regex"));
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const PHONE_FORMAT_ERROR: &str = "Phone number allows up to 10 digits only";
pub const EMAIL_FORMAT_ERROR: &str = "Invalid email format";

/// Editable field of the details form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl DetailField {
    pub const ALL: [DetailField; 4] = [
        DetailField::FirstName,
        DetailField::LastName,
        DetailField::Email,
        DetailField::Phone,
    ];

    /// Label used in "... is required"
    pub fn label(self) -> &'static str {
        match self {
            DetailField::FirstName => "First Name",
            DetailField::LastName => "Last Name",
            DetailField::Email => "Email",
            DetailField::Phone => "Phone",
        }
    }

    /// Wire / form name of the field
    pub fn name(self) -> &'static str {
        match self {
            DetailField::FirstName => "firstName",
            DetailField::LastName => "lastName",
            DetailField::Email => "email",
            DetailField::Phone => "phone",
        }
    }
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Live check for a details-form field
///
/// Email is read-only in the details form and has no live check.
pub fn validate(field: DetailField, value: &str) -> Option<String> {
    match field {
        DetailField::FirstName if !ALPHA.is_match(value) => Some(
            "Please enter a valid first name (only alphabets are allowed)".to_string(),
        ),
        DetailField::LastName if !ALPHA.is_match(value) => Some(
            "Please enter a valid last name (only alphabets are allowed)".to_string(),
        ),
        DetailField::Phone if !value.is_empty() && !PHONE.is_match(value) => {
            Some(PHONE_FORMAT_ERROR.to_string())
        }
        _ => None,
    }
}

/// Live check for the standalone email form (empty is rejected too)
pub fn validate_email_format(value: &str) -> Option<String> {
    if EMAIL.is_match(value) {
        None
    } else {
        Some(EMAIL_FORMAT_ERROR.to_string())
    }
}

fn required(field: DetailField) -> String {
    format!("{} is required", field.label())
}

/// Errors of the details form, one slot per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsFormErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl DetailsFormErrors {
    pub fn get(&self, field: DetailField) -> Option<&str> {
        match field {
            DetailField::FirstName => self.first_name.as_deref(),
            DetailField::LastName => self.last_name.as_deref(),
            DetailField::Email => self.email.as_deref(),
            DetailField::Phone => self.phone.as_deref(),
        }
    }

    pub fn set(&mut self, field: DetailField, error: Option<String>) {
        let slot = match field {
            DetailField::FirstName => &mut self.first_name,
            DetailField::LastName => &mut self.last_name,
            DetailField::Email => &mut self.email,
            DetailField::Phone => &mut self.phone,
        };
        *slot = error;
    }

    pub fn has_errors(&self) -> bool {
        DetailField::ALL.into_iter().any(|f| self.get(f).is_some())
    }
}

/// Errors of the standalone email form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFormErrors {
    pub email: Option<String>,
}

impl EmailFormErrors {
    pub fn has_errors(&self) -> bool {
        self.email.is_some()
    }
}

/// Submit-time check of the details form
///
/// Required first, then the live rule; every field is checked.
pub fn validate_details_submit(draft: &DetailsDraft) -> DetailsFormErrors {
    let mut errors = DetailsFormErrors::default();
    for field in DetailField::ALL {
        let value = draft.get(field);
        let error = if value.is_empty() {
            Some(required(field))
        } else {
            validate(field, value)
        };
        errors.set(field, error);
    }
    errors
}

/// Submit-time check of the email form
pub fn validate_email_submit(draft_email: &str) -> EmailFormErrors {
    let email = if draft_email.is_empty() {
        Some(required(DetailField::Email))
    } else {
        validate_email_format(draft_email)
    };
    EmailFormErrors { email }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first: &str, last: &str, email: &str, phone: &str) -> DetailsDraft {
        DetailsDraft {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    #[test]
    fn test_name_character_class() {
        assert_eq!(validate(DetailField::FirstName, "John"), None);
        assert!(validate(DetailField::FirstName, "John3").is_some());
        assert!(validate(DetailField::LastName, "O'Neil").is_some());
        assert!(
            validate(DetailField::LastName, "Sm1th")
                .unwrap()
                .contains("last name")
        );
        // empty passes the live check
        assert_eq!(validate(DetailField::FirstName, ""), None);
    }

    #[test]
    fn test_phone_live_check() {
        assert_eq!(
            validate(DetailField::Phone, "12345").as_deref(),
            Some(PHONE_FORMAT_ERROR)
        );
        assert_eq!(validate(DetailField::Phone, ""), None);
        assert_eq!(validate(DetailField::Phone, "0123456789"), None);
        assert!(validate(DetailField::Phone, "01234567890").is_some());
        assert!(validate(DetailField::Phone, "012345678a").is_some());
        // non-ASCII digits are not phone digits
        assert!(validate(DetailField::Phone, "١٢٣٤٥٦٧٨٩٠").is_some());
    }

    #[test]
    fn test_email_has_no_live_check_in_details() {
        assert_eq!(validate(DetailField::Email, "bad"), None);
    }

    #[test]
    fn test_email_format() {
        assert_eq!(validate_email_format("bad").as_deref(), Some(EMAIL_FORMAT_ERROR));
        assert_eq!(validate_email_format("a@b.com"), None);
        assert!(validate_email_format("a b@c.com").is_some());
        assert!(validate_email_format("a@bcom").is_some());
        assert!(validate_email_format("").is_some());
    }

    #[test]
    fn test_details_submit_requires_every_field() {
        let errors = validate_details_submit(&draft("John", "Doe", "j@d.com", ""));
        assert!(errors.has_errors());
        assert_eq!(errors.phone.as_deref(), Some("Phone is required"));
        assert_eq!(errors.first_name, None);

        let errors = validate_details_submit(&draft("", "", "", ""));
        assert_eq!(errors.first_name.as_deref(), Some("First Name is required"));
        assert_eq!(errors.last_name.as_deref(), Some("Last Name is required"));
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
    }

    #[test]
    fn test_details_submit_runs_live_rules_on_present_values() {
        let errors = validate_details_submit(&draft("John3", "Doe", "j@d.com", "12345"));
        assert!(errors.first_name.is_some());
        assert_eq!(errors.phone.as_deref(), Some(PHONE_FORMAT_ERROR));

        let ok = validate_details_submit(&draft("John", "Doe", "j@d.com", "0123456789"));
        assert!(!ok.has_errors());
    }

    #[test]
    fn test_email_submit() {
        assert_eq!(
            validate_email_submit("").email.as_deref(),
            Some("Email is required")
        );
        assert_eq!(
            validate_email_submit("bad").email.as_deref(),
            Some(EMAIL_FORMAT_ERROR)
        );
        assert!(!validate_email_submit("a@b.com").has_errors());
    }
}
