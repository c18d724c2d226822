//! Member validation

use thiserror::Error;

/// Errors that can occur during member validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MemberValidationError {
    #[error("Username cannot be blank")]
    BlankUsername,

    #[error("Username cannot exceed {0} characters")]
    UsernameTooLong(usize),

    #[error("Age cannot be negative (got {0})")]
    NegativeAge(i32),
}

const MAX_USERNAME_LENGTH: usize = 100;

/// Validate a username. Absence is allowed; a present value must not be blank.
pub fn validate_username(username: &str) -> Result<(), MemberValidationError> {
    if username.trim().is_empty() {
        return Err(MemberValidationError::BlankUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(MemberValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), MemberValidationError> {
    if age < 0 {
        return Err(MemberValidationError::NegativeAge(age));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("member1").is_ok());
        assert!(validate_username("비회원").is_ok());
    }

    #[test]
    fn test_blank_username() {
        assert_eq!(validate_username(""), Err(MemberValidationError::BlankUsername));
        assert_eq!(validate_username("  "), Err(MemberValidationError::BlankUsername));
    }

    #[test]
    fn test_username_too_long() {
        assert_eq!(
            validate_username(&"a".repeat(101)),
            Err(MemberValidationError::UsernameTooLong(100))
        );
    }

    #[test]
    fn test_age() {
        assert!(validate_age(0).is_ok());
        assert!(validate_age(40).is_ok());
        assert_eq!(validate_age(-1), Err(MemberValidationError::NegativeAge(-1)));
    }
}
