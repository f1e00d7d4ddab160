//! Credential attachment for outbound requests.
//!
//! Token acquisition is out of scope for this crate. The client only needs
//! a hook that decorates each request before it is sent; [`BasicAuth`] and
//! [`BearerToken`] cover the two schemes the management API accepts, and
//! callers with other needs implement [`Authenticator`] themselves.

use std::fmt;

use reqwest::RequestBuilder;

use crate::config::Secret;
use crate::error::ConfigError;

/// Attaches credentials to every outbound request.
///
/// Implementations must be cheap to call and must not perform I/O; the
/// client invokes the hook once per request, immediately before sending.
///
/// # Example
///
/// ```rust
/// use apigee_admin::Authenticator;
///
/// #[derive(Debug)]
/// struct StaticHeader;
///
/// impl Authenticator for StaticHeader {
///     fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
///         request.header("X-Api-Key", "abc")
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + fmt::Debug {
    /// Returns the request with credentials attached.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// HTTP basic authentication with a username and password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: Secret,
}

impl BasicAuth {
    /// Creates basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if either value is empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyCredential { field: "username" });
        }
        let password =
            Secret::new(password).map_err(|_| ConfigError::EmptyCredential { field: "password" })?;
        Ok(Self { username, password })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Authenticator for BasicAuth {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(self.password.expose()))
    }
}

/// An OAuth2 bearer token obtained out of band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(Secret);

impl BearerToken {
    /// Wraps an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        Secret::new(token)
            .map(Self)
            .map_err(|_| ConfigError::EmptyCredential { field: "token" })
    }
}

impl Authenticator for BearerToken {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.0.expose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorization_header(auth: &dyn Authenticator) -> String {
        let client = reqwest::Client::new();
        let request = auth
            .authenticate(client.get("http://localhost/"))
            .build()
            .unwrap();
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_basic_auth_sets_authorization_header() {
        let auth = BasicAuth::new("admin@example.com", "pw").unwrap();
        let header = authorization_header(&auth);
        assert!(header.starts_with("Basic "));
        assert_eq!(auth.username(), "admin@example.com");
    }

    #[test]
    fn test_bearer_token_sets_authorization_header() {
        let auth = BearerToken::new("tok-123").unwrap();
        assert_eq!(authorization_header(&auth), "Bearer tok-123");
    }

    #[test]
    fn test_empty_credentials_are_rejected() {
        assert!(matches!(
            BasicAuth::new("", "pw"),
            Err(ConfigError::EmptyCredential { field: "username" })
        ));
        assert!(matches!(
            BasicAuth::new("user", ""),
            Err(ConfigError::EmptyCredential { field: "password" })
        ));
        assert!(matches!(
            BearerToken::new(""),
            Err(ConfigError::EmptyCredential { field: "token" })
        ));
    }

    #[test]
    fn test_debug_output_masks_secrets() {
        let basic = BasicAuth::new("user", "topsecret").unwrap();
        let bearer = BearerToken::new("tok-abc").unwrap();
        assert!(!format!("{basic:?}").contains("topsecret"));
        assert!(!format!("{bearer:?}").contains("tok-abc"));
    }
}
