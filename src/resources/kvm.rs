//! Environment-scoped key value maps.

use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::common::environment_collection;

/// One `{name, value}` entry of a key value map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvmEntry {
    /// The entry key.
    pub name: String,
    /// The entry value.
    #[serde(default)]
    pub value: String,
}

impl KvmEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A key value map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueMap {
    /// The map name, unique within its environment.
    pub name: String,
    /// Whether values are stored encrypted.
    #[serde(default)]
    pub encrypted: bool,
    /// The entries.
    #[serde(default, rename = "entry")]
    pub entries: Vec<KvmEntry>,
}

impl KeyValueMap {
    /// Returns the value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }
}

pub(crate) fn maps_path(environment: &str) -> Result<ResourcePath, ApiError> {
    environment_collection(environment, collections::KEY_VALUE_MAPS)
}

pub(crate) fn map_path(environment: &str, name: &str) -> Result<ResourcePath, ApiError> {
    require("key value map name", name)?;
    Ok(maps_path(environment)?.push(name))
}

/// Operations on `environments/{env}/keyvaluemaps`.
#[derive(Clone, Copy, Debug)]
pub struct KeyValueMapService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> KeyValueMapService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    /// Lists map names in an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `environment` is empty or the request fails.
    pub async fn list(&self, environment: &str) -> ApiResult<Vec<String>> {
        self.client.get(&maps_path(environment)?).await
    }

    /// Fetches a map with its entries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn get(&self, environment: &str, name: &str) -> ApiResult<KeyValueMap> {
        self.client.get(&map_path(environment, name)?).await
    }

    /// Creates a map.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the environment or map name is empty or the
    /// request fails.
    pub async fn create(&self, environment: &str, map: &KeyValueMap) -> ApiResult<KeyValueMap> {
        require("key value map name", &map.name)?;
        self.client.post(&maps_path(environment)?, map).await
    }

    /// Replaces a map, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the environment or map name is empty or the
    /// request fails.
    pub async fn update(&self, environment: &str, map: &KeyValueMap) -> ApiResult<KeyValueMap> {
        self.client
            .put(&map_path(environment, &map.name)?, map)
            .await
    }

    /// Deletes a map.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, environment: &str, name: &str) -> ApiResult<()> {
        self.client
            .delete_empty(&map_path(environment, name)?)
            .await
    }
}
