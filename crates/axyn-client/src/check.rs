//! Local checks run before anything is sent.
//!
//! Same rules as the server, in the order the form shows them: completeness,
//! email shape, minimum message length. There is no upper bound here; the
//! server enforces it.

use axyn_core::{MESSAGE_MIN_CHARS, is_valid_email};
use thiserror::Error;

use crate::form::FormFields;

/// Why the form was not sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalViolation {
    #[error("form is incomplete")]
    Incomplete,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("message is too short")]
    MessageTooShort,
}

impl LocalViolation {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Incomplete => "Por favor completa todos los campos.",
            Self::InvalidEmail => "Por favor ingresa un email válido.",
            Self::MessageTooShort => "El mensaje debe tener al menos 10 caracteres.",
        }
    }
}

/// Check already-trimmed fields.
pub fn check(fields: &FormFields) -> Result<(), LocalViolation> {
    if fields.name.is_empty() || fields.email.is_empty() || fields.message.is_empty() {
        return Err(LocalViolation::Incomplete);
    }
    if !is_valid_email(&fields.email) {
        return Err(LocalViolation::InvalidEmail);
    }
    if fields.message.chars().count() < MESSAGE_MIN_CHARS {
        return Err(LocalViolation::MessageTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(
            check(&fields("Ana", "ana@example.com", "Hola, quiero información")),
            Ok(())
        );
    }

    #[test]
    fn checks_run_in_form_order() {
        assert_eq!(
            check(&fields("", "bad", "short")),
            Err(LocalViolation::Incomplete)
        );
        assert_eq!(
            check(&fields("Ana", "bad", "short")),
            Err(LocalViolation::InvalidEmail)
        );
        assert_eq!(
            check(&fields("Ana", "ana@example.com", "short")),
            Err(LocalViolation::MessageTooShort)
        );
    }

    #[test]
    fn no_local_upper_bound_on_message() {
        assert!(check(&fields("Ana", "ana@example.com", &"m".repeat(5000))).is_ok());
    }

    #[test]
    fn messages_are_spanish() {
        assert_eq!(
            LocalViolation::Incomplete.user_message(),
            "Por favor completa todos los campos."
        );
        assert!(LocalViolation::MessageTooShort.user_message().contains("10"));
    }
}
