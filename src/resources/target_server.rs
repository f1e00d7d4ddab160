//! Environment-scoped target servers.
//!
//! # TLS flag normalization
//!
//! The platform's `sSLInfo` object mixes representations:
//!
//! | field                    | wire type | here   |
//! |--------------------------|-----------|--------|
//! | `enabled`                | string    | `bool` |
//! | `clientAuthEnabled`      | string    | `bool` |
//! | `ignoreValidationErrors` | bool      | `bool` |
//!
//! [`SslInfo`] decodes either form for each flag (`"true"`/`"false"` in any
//! case, or a JSON bool), treats a missing flag as `false`, and encodes
//! each flag back in the wire type listed above.

use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::common::environment_collection;

/// TLS settings of a target server or virtual host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireSslInfo", into = "WireSslInfo")]
pub struct SslInfo {
    /// TLS is enabled.
    pub enabled: bool,
    /// Mutual TLS is enabled.
    pub client_auth_enabled: bool,
    /// Certificate validation errors are ignored.
    pub ignore_validation_errors: bool,
    /// Key alias in the key store.
    pub key_alias: Option<String>,
    /// Key store reference.
    pub key_store: Option<String>,
    /// Trust store reference.
    pub trust_store: Option<String>,
    /// Allowed protocols.
    pub protocols: Vec<String>,
    /// Allowed cipher suites.
    pub ciphers: Vec<String>,
}

/// A flag that arrives as either a JSON bool or a string.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireFlag {
    Bool(bool),
    Text(String),
}

impl WireFlag {
    fn normalize(flag: Option<Self>, field: &str) -> Result<bool, String> {
        match flag {
            None => Ok(false),
            Some(Self::Bool(value)) => Ok(value),
            Some(Self::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" | "" => Ok(false),
                _ => Err(format!("invalid value '{text}' for sSLInfo.{field}")),
            },
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSslInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<WireFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_auth_enabled: Option<WireFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ignore_validation_errors: Option<WireFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trust_store: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    protocols: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ciphers: Vec<String>,
}

impl TryFrom<WireSslInfo> for SslInfo {
    type Error = String;

    fn try_from(wire: WireSslInfo) -> Result<Self, Self::Error> {
        Ok(Self {
            enabled: WireFlag::normalize(wire.enabled, "enabled")?,
            client_auth_enabled: WireFlag::normalize(wire.client_auth_enabled, "clientAuthEnabled")?,
            ignore_validation_errors: WireFlag::normalize(
                wire.ignore_validation_errors,
                "ignoreValidationErrors",
            )?,
            key_alias: wire.key_alias,
            key_store: wire.key_store,
            trust_store: wire.trust_store,
            protocols: wire.protocols,
            ciphers: wire.ciphers,
        })
    }
}

impl From<SslInfo> for WireSslInfo {
    fn from(info: SslInfo) -> Self {
        Self {
            enabled: Some(WireFlag::Text(info.enabled.to_string())),
            client_auth_enabled: Some(WireFlag::Text(info.client_auth_enabled.to_string())),
            ignore_validation_errors: Some(WireFlag::Bool(info.ignore_validation_errors)),
            key_alias: info.key_alias,
            key_store: info.key_store,
            trust_store: info.trust_store,
            protocols: info.protocols,
            ciphers: info.ciphers,
        }
    }
}

/// A backend host that proxies route to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetServer {
    /// The server name, unique within its environment.
    #[serde(default)]
    pub name: String,
    /// Host name or address.
    #[serde(default)]
    pub host: String,
    /// Port.
    #[serde(default)]
    pub port: u16,
    /// Whether proxies may route to it.
    #[serde(default, rename = "isEnabled")]
    pub enabled: bool,
    /// TLS settings.
    #[serde(default, rename = "sSLInfo", skip_serializing_if = "Option::is_none")]
    pub ssl_info: Option<SslInfo>,
}

/// Operations on `environments/{env}/targetservers`.
#[derive(Clone, Copy, Debug)]
pub struct TargetServerService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> TargetServerService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn servers_path(environment: &str) -> Result<ResourcePath, ApiError> {
        environment_collection(environment, collections::TARGET_SERVERS)
    }

    fn server_path(environment: &str, name: &str) -> Result<ResourcePath, ApiError> {
        require("target server name", name)?;
        Ok(Self::servers_path(environment)?.push(name))
    }

    /// Lists target server names in an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `environment` is empty or the request fails.
    pub async fn list(&self, environment: &str) -> ApiResult<Vec<String>> {
        self.client.get(&Self::servers_path(environment)?).await
    }

    /// Fetches a target server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty, the request fails, or
    /// a TLS flag holds a value other than true or false.
    pub async fn get(&self, environment: &str, name: &str) -> ApiResult<TargetServer> {
        self.client
            .get(&Self::server_path(environment, name)?)
            .await
    }

    /// Creates a target server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the environment or server name is empty or
    /// the request fails.
    pub async fn create(
        &self,
        environment: &str,
        server: &TargetServer,
    ) -> ApiResult<TargetServer> {
        require("target server name", &server.name)?;
        self.client
            .post(&Self::servers_path(environment)?, server)
            .await
    }

    /// Replaces a target server, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the environment or server name is empty or
    /// the request fails.
    pub async fn update(
        &self,
        environment: &str,
        server: &TargetServer,
    ) -> ApiResult<TargetServer> {
        self.client
            .put(&Self::server_path(environment, &server.name)?, server)
            .await
    }

    /// Deletes a target server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, environment: &str, name: &str) -> ApiResult<()> {
        self.client
            .delete_empty(&Self::server_path(environment, name)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ssl_info_normalizes_platform_shape() {
        let server: TargetServer = serde_json::from_value(json!({
            "name": "backend-1",
            "host": "10.0.0.5",
            "port": 8443,
            "isEnabled": true,
            "sSLInfo": {
                "enabled": "true",
                "clientAuthEnabled": "False",
                "ignoreValidationErrors": true,
                "keyStore": "ref://backend-ks",
                "protocols": ["TLSv1.2"]
            }
        }))
        .unwrap();

        let ssl = server.ssl_info.unwrap();
        assert!(ssl.enabled);
        assert!(!ssl.client_auth_enabled);
        assert!(ssl.ignore_validation_errors);
        assert_eq!(ssl.key_store.as_deref(), Some("ref://backend-ks"));
        assert_eq!(ssl.protocols, vec!["TLSv1.2"]);
    }

    #[test]
    fn test_ssl_info_accepts_bools_and_missing_flags() {
        let ssl: SslInfo = serde_json::from_value(json!({"enabled": true})).unwrap();
        assert!(ssl.enabled);
        assert!(!ssl.client_auth_enabled);
        assert!(!ssl.ignore_validation_errors);
    }

    #[test]
    fn test_ssl_info_rejects_unknown_flag_text() {
        let result = serde_json::from_value::<SslInfo>(json!({"enabled": "yes"}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("sSLInfo.enabled"));
    }

    #[test]
    fn test_ssl_info_serializes_platform_shape() {
        let ssl = SslInfo {
            enabled: true,
            client_auth_enabled: false,
            ignore_validation_errors: false,
            trust_store: Some("ref://ts".to_string()),
            ..SslInfo::default()
        };
        assert_eq!(
            serde_json::to_value(&ssl).unwrap(),
            json!({
                "enabled": "true",
                "clientAuthEnabled": "false",
                "ignoreValidationErrors": false,
                "trustStore": "ref://ts"
            })
        );
    }

    #[test]
    fn test_target_server_serializes_is_enabled() {
        let server = TargetServer {
            name: "backend-1".to_string(),
            host: "10.0.0.5".to_string(),
            port: 80,
            enabled: false,
            ssl_info: None,
        };
        assert_eq!(
            serde_json::to_value(&server).unwrap(),
            json!({"name": "backend-1", "host": "10.0.0.5", "port": 80, "isEnabled": false})
        );
    }

    #[test]
    fn test_server_path() {
        assert_eq!(
            TargetServerService::server_path("test", "backend-1")
                .unwrap()
                .render()
                .unwrap(),
            "environments/test/targetservers/backend-1"
        );
    }
}
