//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("device.name is required")]
    MissingDeviceName,
    #[error("friend id {0} is listed more than once")]
    DuplicateFriend(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.device.name.trim().is_empty() {
        errors.push(ValidationError::MissingDeviceName);
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for friend in &config.friends {
        if !seen.insert(&friend.id) && reported.insert(&friend.id) {
            errors.push(ValidationError::DuplicateFriend(friend.id.to_string()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
