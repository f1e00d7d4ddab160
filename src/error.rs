//! Configuration error types for the Apigee admin SDK.
//!
//! Errors raised by remote calls live in [`crate::clients::ApiError`]; this
//! module only covers values rejected while building an [`ApigeeConfig`].
//!
//! # Example
//!
//! ```rust
//! use apigee_admin::{ConfigError, OrgName};
//!
//! let result = OrgName::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidOrganization { .. })));
//! ```
//!
//! [`ApigeeConfig`]: crate::ApigeeConfig

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// Each variant carries enough context to tell the caller which value was
/// rejected and what shape was expected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Organization name is empty or contains characters the platform rejects.
    #[error("Invalid organization name '{name}'. Expected ASCII letters, digits, '-', '_' or '.'.")]
    InvalidOrganization {
        /// The rejected organization name.
        name: String,
    },

    /// The management API root is not an absolute HTTP(S) URL.
    #[error("Invalid API root '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.enterprise.apigee.com/v1').")]
    InvalidApiRoot {
        /// The rejected URL.
        url: String,
    },

    /// A credential value is empty.
    #[error("Credential '{field}' cannot be empty.")]
    EmptyCredential {
        /// Which credential field was empty.
        field: &'static str,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_organization_error_message() {
        let error = ConfigError::InvalidOrganization {
            name: "bad org!".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("bad org!"));
        assert!(message.contains("Expected"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "organization",
        };
        let message = error.to_string();
        assert!(message.contains("organization"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_empty_credential_names_field() {
        let error = ConfigError::EmptyCredential { field: "password" };
        assert_eq!(error.to_string(), "Credential 'password' cannot be empty.");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidApiRoot {
            url: "nope".to_string(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
