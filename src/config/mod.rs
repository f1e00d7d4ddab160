//! Configuration types for the Apigee admin SDK.
//!
//! # Overview
//!
//! - [`ApigeeConfig`]: immutable client configuration
//! - [`ApigeeConfigBuilder`]: builder for [`ApigeeConfig`]
//! - [`OrgName`], [`ApiRoot`], [`Secret`]: validated newtypes
//! - [`Authenticator`], [`BasicAuth`], [`BearerToken`]: credential hook
//!
//! # Example
//!
//! ```rust
//! use apigee_admin::{ApigeeConfig, BasicAuth, OrgName};
//!
//! let config = ApigeeConfig::builder()
//!     .organization(OrgName::new("acme").unwrap())
//!     .authenticator(BasicAuth::new("ops@acme.com", "secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.organization().as_ref(), "acme");
//! assert_eq!(config.api_root().as_ref(), "https://api.enterprise.apigee.com/v1/");
//! ```

mod auth;
mod newtypes;

pub use auth::{Authenticator, BasicAuth, BearerToken};
pub use newtypes::{ApiRoot, OrgName, Secret};

use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the Apigee admin SDK.
///
/// Fixed at client construction. Cloning shares the authenticator.
///
/// # Thread Safety
///
/// `ApigeeConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ApigeeConfig {
    organization: OrgName,
    api_root: ApiRoot,
    authenticator: Option<Arc<dyn Authenticator>>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ApigeeConfig {
    /// Creates a new builder for constructing an `ApigeeConfig`.
    #[must_use]
    pub fn builder() -> ApigeeConfigBuilder {
        ApigeeConfigBuilder::new()
    }

    /// Returns the organization every request is scoped to.
    #[must_use]
    pub const fn organization(&self) -> &OrgName {
        &self.organization
    }

    /// Returns the management API root.
    #[must_use]
    pub const fn api_root(&self) -> &ApiRoot {
        &self.api_root
    }

    /// Returns the credential hook, if configured.
    #[must_use]
    pub fn authenticator(&self) -> Option<&dyn Authenticator> {
        self.authenticator.as_deref()
    }

    pub(crate) fn shared_authenticator(&self) -> Option<Arc<dyn Authenticator>> {
        self.authenticator.clone()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the transport-level request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ApigeeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApigeeConfig>();
};

/// Builder for constructing [`ApigeeConfig`] instances.
///
/// `organization` is required.
///
/// # Defaults
///
/// - `api_root`: [`ApiRoot::DEFAULT`]
/// - `authenticator`: `None` (requests are sent unauthenticated)
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (the transport's own default applies)
#[derive(Debug, Default)]
pub struct ApigeeConfigBuilder {
    organization: Option<OrgName>,
    api_root: Option<ApiRoot>,
    authenticator: Option<Arc<dyn Authenticator>>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ApigeeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the organization (required).
    #[must_use]
    pub fn organization(mut self, organization: OrgName) -> Self {
        self.organization = Some(organization);
        self
    }

    /// Sets the management API root.
    #[must_use]
    pub fn api_root(mut self, api_root: ApiRoot) -> Self {
        self.api_root = Some(api_root);
        self
    }

    /// Sets the credential hook.
    #[must_use]
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Sets a shared credential hook.
    #[must_use]
    pub fn shared_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the transport-level timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ApigeeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `organization` is not set.
    pub fn build(self) -> Result<ApigeeConfig, ConfigError> {
        let organization = self.organization.ok_or(ConfigError::MissingRequiredField {
            field: "organization",
        })?;
        let api_root = match self.api_root {
            Some(root) => root,
            None => ApiRoot::new(ApiRoot::DEFAULT)?,
        };

        Ok(ApigeeConfig {
            organization,
            api_root,
            authenticator: self.authenticator,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_organization() {
        let result = ApigeeConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "organization"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ApigeeConfig::builder()
            .organization(OrgName::new("acme").unwrap())
            .build()
            .unwrap();

        assert_eq!(
            config.api_root().as_ref(),
            "https://api.enterprise.apigee.com/v1/"
        );
        assert!(config.authenticator().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ApigeeConfig::builder()
            .organization(OrgName::new("acme").unwrap())
            .api_root(ApiRoot::new("http://localhost:9000/v1").unwrap())
            .authenticator(BearerToken::new("tok").unwrap())
            .user_agent_prefix("deployer/2.0")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.api_root().as_ref(), "http://localhost:9000/v1/");
        assert!(config.authenticator().is_some());
        assert_eq!(config.user_agent_prefix(), Some("deployer/2.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = ApigeeConfig::builder()
            .organization(OrgName::new("acme").unwrap())
            .authenticator(BasicAuth::new("user", "hidden-pass").unwrap())
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.organization(), config.organization());

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ApigeeConfig"));
        assert!(!debug_str.contains("hidden-pass"));
    }
}
