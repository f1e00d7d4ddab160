//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates on construction so a built [`ApigeeConfig`] can
//! never carry an organization or API root the client cannot address.
//!
//! [`ApigeeConfig`]: crate::ApigeeConfig

use std::fmt;

use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A validated Apigee organization name.
///
/// Organization names scope every management API path, so they are limited
/// to characters that need no escaping inside a URL path segment.
///
/// # Example
///
/// ```rust
/// use apigee_admin::OrgName;
///
/// let org = OrgName::new("acme-prod").unwrap();
/// assert_eq!(org.as_ref(), "acme-prod");
/// assert!(OrgName::new("acme prod").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrgName(String);

impl OrgName {
    /// Creates a new validated organization name.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOrganization`] if the name is empty or
    /// contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        if !Self::is_valid(&name) {
            return Err(ConfigError::InvalidOrganization { name });
        }
        Ok(Self(name))
    }

    fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl AsRef<str> for OrgName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for OrgName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OrgName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// The root URL of the management API (e.g. `https://api.enterprise.apigee.com/v1`).
///
/// The stored URL always ends with `/` so that relative paths resolve
/// beneath it instead of replacing its last segment.
///
/// # Example
///
/// ```rust
/// use apigee_admin::ApiRoot;
///
/// let root = ApiRoot::new("https://mgmt.example.com/v1").unwrap();
/// assert_eq!(root.as_ref(), "https://mgmt.example.com/v1/");
/// assert_eq!(root.host_name(), Some("mgmt.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRoot(Url);

impl ApiRoot {
    /// The public Apigee Edge management endpoint.
    pub const DEFAULT: &'static str = "https://api.enterprise.apigee.com/v1";

    /// Creates a new validated API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiRoot`] if the value does not parse as
    /// an absolute `http`/`https` URL with a host, or carries a query or
    /// fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into().trim().to_string();
        let invalid = || ConfigError::InvalidApiRoot { url: raw.clone() };

        let mut parsed = Url::parse(&raw).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(invalid());
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid());
        }

        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self(parsed))
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }
}

impl AsRef<str> for ApiRoot {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// A credential value whose contents never appear in `Debug` output.
///
/// # Example
///
/// ```rust
/// use apigee_admin::Secret;
///
/// let secret = Secret::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", secret), "Secret(*****)");
/// assert_eq!(secret.expose(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Creates a new secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::EmptyCredential { field: "secret" });
        }
        Ok(Self(value))
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_name_rejects_empty_and_invalid() {
        assert!(OrgName::new("").is_err());
        assert!(OrgName::new("   ").is_err());
        assert!(OrgName::new("acme/prod").is_err());
        assert!(OrgName::new("acme prod").is_err());
        assert!(OrgName::new("acme?x").is_err());
    }

    #[test]
    fn test_org_name_accepts_and_trims() {
        let org = OrgName::new("  acme_prod-1.eu ").unwrap();
        assert_eq!(org.as_ref(), "acme_prod-1.eu");
        assert_eq!(org.to_string(), "acme_prod-1.eu");
    }

    #[test]
    fn test_org_name_serde_validates() {
        let org: OrgName = serde_json::from_str(r#""acme""#).unwrap();
        assert_eq!(org.as_ref(), "acme");
        assert!(serde_json::from_str::<OrgName>(r#""a b""#).is_err());
        assert_eq!(serde_json::to_string(&org).unwrap(), r#""acme""#);
    }

    #[test]
    fn test_api_root_appends_trailing_slash() {
        let root = ApiRoot::new("https://mgmt.example.com/v1").unwrap();
        assert_eq!(root.as_ref(), "https://mgmt.example.com/v1/");

        let root = ApiRoot::new("http://localhost:8080/").unwrap();
        assert_eq!(root.as_ref(), "http://localhost:8080/");
        assert_eq!(root.host_name(), Some("localhost"));
    }

    #[test]
    fn test_api_root_rejects_invalid() {
        assert!(ApiRoot::new("mgmt.example.com/v1").is_err());
        assert!(ApiRoot::new("ftp://mgmt.example.com").is_err());
        assert!(ApiRoot::new("https://mgmt.example.com/v1?x=1").is_err());
        assert!(ApiRoot::new("").is_err());
    }

    #[test]
    fn test_api_root_default_constant_is_valid() {
        let root = ApiRoot::new(ApiRoot::DEFAULT).unwrap();
        assert_eq!(root.as_ref(), "https://api.enterprise.apigee.com/v1/");
    }

    #[test]
    fn test_secret_masks_value_in_debug() {
        let secret = Secret::new("super-secret").unwrap();
        let debug_output = format!("{:?}", secret);
        assert_eq!(debug_output, "Secret(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_secret_rejects_empty() {
        assert!(matches!(
            Secret::new(""),
            Err(ConfigError::EmptyCredential { .. })
        ));
    }
}
