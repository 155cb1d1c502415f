use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{LoginRequest, SignupRequest, UpdateProfileRequest};
use crate::error::{ApiError, FieldError};

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Signup field checks; every failing field is reported, not just the first.
pub(crate) fn validate_signup(payload: &SignupRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if payload.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if !is_valid_email(&payload.email) {
        errors.push(FieldError::new("email", "Invalid email"));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

pub(crate) fn validate_login(payload: &LoginRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if !is_valid_email(&payload.email) {
        errors.push(FieldError::new("email", "Invalid email"));
    }
    if payload.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Only present fields are checked; absent fields are left untouched.
pub(crate) fn validate_profile_update(payload: &UpdateProfileRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
    }
    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            errors.push(FieldError::new("email", "Invalid email"));
        }
    }
    if let Some(password) = &payload.password {
        if password.len() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("no-tld@example"));
    }

    #[test]
    fn signup_validation_collects_all_failures() {
        let payload = SignupRequest {
            name: "  ".into(),
            email: "bad".into(),
            password: "short".into(),
        };
        let err = validate_signup(&payload).unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["name", "email", "password"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn signup_validation_passes_well_formed_input() {
        let payload = SignupRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter2!".into(),
        };
        assert!(validate_signup(&payload).is_ok());
    }

    #[test]
    fn login_validation_requires_password_presence_only() {
        let payload = LoginRequest {
            email: "ada@example.com".into(),
            password: "x".into(),
        };
        assert!(validate_login(&payload).is_ok());

        let payload = LoginRequest {
            email: "ada@example.com".into(),
            password: String::new(),
        };
        assert!(validate_login(&payload).is_err());
    }

    #[test]
    fn profile_validation_skips_absent_fields() {
        let payload = UpdateProfileRequest {
            name: None,
            email: None,
            password: None,
        };
        assert!(validate_profile_update(&payload).is_ok());
    }

    #[test]
    fn profile_validation_checks_present_fields() {
        let payload = UpdateProfileRequest {
            name: Some("".into()),
            email: Some("bad".into()),
            password: Some("123".into()),
        };
        let err = validate_profile_update(&payload).unwrap_err();
        match err {
            ApiError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
