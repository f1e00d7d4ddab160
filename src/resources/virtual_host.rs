//! Environment-scoped virtual hosts.

use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::common::environment_collection;
use crate::resources::{Attribute, Properties, SslInfo};

/// An inbound listener definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualHost {
    /// The virtual host name, unique within its environment.
    #[serde(default)]
    pub name: String,
    /// Listening port. The platform sends it as a string.
    #[serde(default, with = "port_string", skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Host names this listener answers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host_aliases: Vec<String>,
    /// Base URL shown to consumers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Listener tuning options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub listen_options: Vec<Attribute>,
    /// Retry tuning options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retry_options: Vec<Attribute>,
    /// Extra listener properties.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    /// TLS settings.
    #[serde(default, rename = "sSLInfo", skip_serializing_if = "Option::is_none")]
    pub ssl_info: Option<SslInfo>,
}

mod port_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    pub fn serialize<S>(port: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match port {
            Some(port) => serializer.serialize_str(&port.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(port)) => Ok(Some(port)),
            Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(Raw::Text(text)) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid port '{text}'"))),
        }
    }
}

/// Operations on `environments/{env}/virtualhosts`.
#[derive(Clone, Copy, Debug)]
pub struct VirtualHostService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> VirtualHostService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn hosts_path(environment: &str) -> Result<ResourcePath, ApiError> {
        environment_collection(environment, collections::VIRTUAL_HOSTS)
    }

    fn host_path(environment: &str, name: &str) -> Result<ResourcePath, ApiError> {
        require("virtual host name", name)?;
        Ok(Self::hosts_path(environment)?.push(name))
    }

    /// Lists virtual host names in an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `environment` is empty or the request fails.
    pub async fn list(&self, environment: &str) -> ApiResult<Vec<String>> {
        self.client.get(&Self::hosts_path(environment)?).await
    }

    /// Fetches a virtual host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn get(&self, environment: &str, name: &str) -> ApiResult<VirtualHost> {
        self.client.get(&Self::host_path(environment, name)?).await
    }

    /// Creates a virtual host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the environment or host name is empty or the
    /// request fails.
    pub async fn create(&self, environment: &str, host: &VirtualHost) -> ApiResult<VirtualHost> {
        require("virtual host name", &host.name)?;
        self.client.post(&Self::hosts_path(environment)?, host).await
    }

    /// Replaces a virtual host, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the environment or host name is empty or the
    /// request fails.
    pub async fn update(&self, environment: &str, host: &VirtualHost) -> ApiResult<VirtualHost> {
        self.client
            .put(&Self::host_path(environment, &host.name)?, host)
            .await
    }

    /// Deletes a virtual host.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, environment: &str, name: &str) -> ApiResult<()> {
        self.client
            .delete_empty(&Self::host_path(environment, name)?)
            .await
    }
}
