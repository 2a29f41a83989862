//! Input validation for the sign-up form

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AuthError, AuthResult};
use crate::models::Credentials;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.chars().count() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
///
/// Only presence and an upper bound are enforced.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate a sign-up form
pub fn validate_credentials(credentials: &Credentials) -> AuthResult<()> {
    validate_email(&credentials.email).map_err(AuthError::Validation)?;
    validate_password(&credentials.password).map_err(AuthError::Validation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.org").is_ok());

        assert_eq!(validate_email(""), Err("Email is required".to_string()));
        assert_eq!(
            validate_email("not-an-email"),
            Err("Invalid email format".to_string())
        );
        assert!(validate_email("a@x").is_err());

        let long = format!("{}@x.com", "a".repeat(250));
        assert!(validate_email(&long).is_err());

        // Length is counted in characters, like the password limit
        let multibyte = format!("{}@x.com", "é".repeat(200));
        assert_eq!(multibyte.chars().count(), 206);
        assert_ne!(
            validate_email(&multibyte),
            Err("Email must be at most 254 characters long".to_string())
        );
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pw1").is_ok());
        assert_eq!(
            validate_password(""),
            Err("Password is required".to_string())
        );
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_credentials_reports_first_failure() {
        let err = validate_credentials(&Credentials::new("bad", "")).unwrap_err();
        assert_eq!(err, AuthError::Validation("Invalid email format".to_string()));

        let err = validate_credentials(&Credentials::new("a@x.com", "")).unwrap_err();
        assert_eq!(err, AuthError::Validation("Password is required".to_string()));
    }
}
