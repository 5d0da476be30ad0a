//! Field validation for contact submissions.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::submission::{ContactForm, ValidContact};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check a raw form and return its trimmed fields.
///
/// Checks run in a fixed order and the first failure wins: required fields,
/// name length, message length, email shape. Lengths count characters, not
/// bytes.
pub fn validate(form: &ContactForm) -> Result<ValidContact, ValidationError> {
    let (Some(name), Some(email), Some(message)) = (
        present(form.name.as_deref()),
        present(form.email.as_deref()),
        present(form.message.as_deref()),
    ) else {
        return Err(ValidationError::MissingField);
    };

    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.chars().count()) {
        return Err(ValidationError::NameLength);
    }

    if !(MESSAGE_MIN_CHARS..=MESSAGE_MAX_CHARS).contains(&message.chars().count()) {
        return Err(ValidationError::MessageLength);
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ValidContact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Trimmed value, or `None` if absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "Hola, quiero más información.";

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm::new(name, email, message)
    }

    #[test]
    fn accepts_example_submission() {
        let contact = validate(&form("Ana Gómez", "ANA@Example.com", MESSAGE)).unwrap();
        assert_eq!(contact.name, "Ana Gómez");
        assert_eq!(contact.email, "ANA@Example.com");
        assert_eq!(contact.message, MESSAGE);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let contact = validate(&form("  Ana  ", " user@example.com\n", "\t0123456789 ")).unwrap();
        assert_eq!(contact.name, "Ana");
        assert_eq!(contact.email, "user@example.com");
        assert_eq!(contact.message, "0123456789");
    }

    #[test]
    fn missing_fields() {
        let cases = [
            ContactForm::default(),
            ContactForm {
                name: None,
                ..form("Ana", "user@example.com", MESSAGE)
            },
            ContactForm {
                email: None,
                ..form("Ana", "user@example.com", MESSAGE)
            },
            ContactForm {
                message: None,
                ..form("Ana", "user@example.com", MESSAGE)
            },
            form("", "user@example.com", MESSAGE),
            form("Ana", "   ", MESSAGE),
        ];
        for case in cases {
            assert_eq!(validate(&case), Err(ValidationError::MissingField), "{case:?}");
        }
    }

    #[test]
    fn missing_field_wins_over_other_violations() {
        let err = validate(&form("A", "not-an-email", "")).unwrap_err();
        assert_eq!(err, ValidationError::MissingField);
    }

    #[test]
    fn name_length_bounds() {
        assert_eq!(
            validate(&form("A", "user@example.com", MESSAGE)),
            Err(ValidationError::NameLength)
        );
        assert_eq!(
            validate(&form(&"a".repeat(101), "user@example.com", MESSAGE)),
            Err(ValidationError::NameLength)
        );
        assert!(validate(&form("Al", "user@example.com", MESSAGE)).is_ok());
        assert!(validate(&form(&"a".repeat(100), "user@example.com", MESSAGE)).is_ok());
        // Length is measured after trimming.
        assert_eq!(
            validate(&form("  A  ", "user@example.com", MESSAGE)),
            Err(ValidationError::NameLength)
        );
    }

    #[test]
    fn name_length_counts_characters() {
        // 100 two-byte characters
        assert!(validate(&form(&"é".repeat(100), "user@example.com", MESSAGE)).is_ok());
    }

    #[test]
    fn message_length_bounds() {
        assert_eq!(
            validate(&form("Ana", "user@example.com", "123456789")),
            Err(ValidationError::MessageLength)
        );
        assert_eq!(
            validate(&form("Ana", "user@example.com", &"m".repeat(1001))),
            Err(ValidationError::MessageLength)
        );
        assert!(validate(&form("Ana", "user@example.com", "1234567890")).is_ok());
        assert!(validate(&form("Ana", "user@example.com", &"m".repeat(1000))).is_ok());
    }

    #[test]
    fn name_checked_before_message_and_email() {
        let err = validate(&form("A", "bad", "short")).unwrap_err();
        assert_eq!(err, ValidationError::NameLength);

        let err = validate(&form("Ana", "bad", "short")).unwrap_err();
        assert_eq!(err, ValidationError::MessageLength);
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["foo", "a@b", "a b@c.com", "@example.com", "user@.com ", "a@@b.com"] {
            assert_eq!(
                validate(&form("Ana", email, MESSAGE)),
                Err(ValidationError::InvalidEmail),
                "{email}"
            );
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user example@example.com"));
    }
}
