//! Individual entries of a key value map.

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::kvm::map_path;
use crate::resources::KvmEntry;

/// Operations on `environments/{env}/keyvaluemaps/{map}/entries`.
#[derive(Clone, Copy, Debug)]
pub struct KvmEntryService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> KvmEntryService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn entries_path(environment: &str, map: &str) -> Result<ResourcePath, ApiError> {
        Ok(map_path(environment, map)?.push(collections::ENTRIES))
    }

    fn entry_path(environment: &str, map: &str, entry: &str) -> Result<ResourcePath, ApiError> {
        require("entry name", entry)?;
        Ok(Self::entries_path(environment, map)?.push(entry))
    }

    /// Lists entry keys of a map.
    ///
    /// The key listing lives under `keys`, not `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn list(&self, environment: &str, map: &str) -> ApiResult<Vec<String>> {
        let path = map_path(environment, map)?.push(collections::KEYS);
        self.client.get(&path).await
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn get(&self, environment: &str, map: &str, entry: &str) -> ApiResult<KvmEntry> {
        self.client
            .get(&Self::entry_path(environment, map, entry)?)
            .await
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn create(
        &self,
        environment: &str,
        map: &str,
        entry: &KvmEntry,
    ) -> ApiResult<KvmEntry> {
        require("entry name", &entry.name)?;
        self.client
            .post(&Self::entries_path(environment, map)?, entry)
            .await
    }

    /// Replaces an entry's value, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn update(
        &self,
        environment: &str,
        map: &str,
        entry: &KvmEntry,
    ) -> ApiResult<KvmEntry> {
        self.client
            .put(&Self::entry_path(environment, map, &entry.name)?, entry)
            .await
    }

    /// Deletes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, environment: &str, map: &str, entry: &str) -> ApiResult<()> {
        self.client
            .delete_empty(&Self::entry_path(environment, map, entry)?)
            .await
    }
}
