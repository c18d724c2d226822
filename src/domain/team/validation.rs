//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("teamA").is_ok());
        assert!(validate_team_name("Team with spaces & symbols!").is_ok());
    }

    #[test]
    fn test_empty_team_name() {
        assert_eq!(validate_team_name(""), Err(TeamValidationError::EmptyName));
        assert_eq!(validate_team_name(" \t"), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_team_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_team_name(&long_name),
            Err(TeamValidationError::NameTooLong(100))
        );
    }
}
