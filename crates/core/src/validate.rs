//! Request-shape validation for sign-in credentials.
//!
//! These checks run before any store is consulted; a request that fails here
//! never touches the user directory or credential store.

use crate::error::AuthError;

/// Minimum username length accepted at sign-in.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted at sign-in.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Validate the shape of sign-in credentials.
///
/// Checks run in a fixed order (missing before too-short, username before
/// password) so a given input always fails with the same kind.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::MissingUsername);
    }
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AuthError::UsernameTooShort {
            min: MIN_USERNAME_LEN,
        });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validate a new password for the password-change operation.
pub fn validate_new_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_minimal_valid_credentials() {
        assert!(validate_credentials("abc", "1234").is_ok());
    }

    #[test]
    fn empty_username_rejected_first() {
        // An empty username wins over an empty password.
        assert_matches!(
            validate_credentials("", ""),
            Err(AuthError::MissingUsername)
        );
    }

    #[test]
    fn empty_password_rejected() {
        assert_matches!(
            validate_credentials("admin", ""),
            Err(AuthError::MissingPassword)
        );
    }

    #[test]
    fn short_username_rejected_regardless_of_password() {
        // Same kind whether the password is valid or not.
        assert_matches!(
            validate_credentials("ab", "password123"),
            Err(AuthError::UsernameTooShort { min: 3 })
        );
        assert_matches!(
            validate_credentials("ab", "x"),
            Err(AuthError::UsernameTooShort { min: 3 })
        );
    }

    #[test]
    fn short_password_rejected() {
        assert_matches!(
            validate_credentials("admin", "abc"),
            Err(AuthError::PasswordTooShort { min: 4 })
        );
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // Three multibyte characters meet the three-character minimum.
        assert!(validate_credentials("äöü", "1234").is_ok());
    }

    #[test]
    fn new_password_rules_match_signin_minimum() {
        assert!(validate_new_password("1234").is_ok());
        assert_matches!(
            validate_new_password(""),
            Err(AuthError::MissingPassword)
        );
        assert_matches!(
            validate_new_password("abc"),
            Err(AuthError::PasswordTooShort { min: 4 })
        );
    }
}
