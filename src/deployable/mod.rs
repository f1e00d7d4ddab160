//! Lifecycle engine for revisioned, deployable bundles.
//!
//! API proxies and shared flows share one lifecycle and differ only in their
//! collection prefix, so a single [`DeployableAssets`] engine is bound to an
//! [`AssetKind`] instead of being duplicated per kind.
//!
//! # Lifecycle
//!
//! Per (asset name, revision):
//!
//! - `import` uploads a bundle archive; the platform assigns the next revision
//! - `deploy` activates a revision in an environment
//! - `undeploy` deactivates it again
//! - `delete_revision` removes one revision; `delete` removes the asset
//!
//! The platform rejects deleting a deployed revision and deploying over an
//! active revision without `override`; both surface as
//! [`ApiError::Conflict`]. Every operation sends exactly one request and no
//! deployment state is cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use apigee_admin::deployable::DeployOptions;
//!
//! let proxies = client.api_proxies();
//! let imported = proxies.import("orders", "build/orders.zip").await?;
//! proxies
//!     .deploy("orders", "test", imported.revision, DeployOptions::new().delay_seconds(15))
//!     .await?;
//!
//! let deployments = proxies.get_deployments("orders").await?;
//! assert_eq!(deployments.active_revisions("test"), vec![imported.revision]);
//! ```

mod types;

pub use types::{
    AssetMetadata, DeletedItemInfo, DeployOptions, DeployableAsset, DeployableRevision,
    DeployedRevision, Deployment, DeploymentState, EnvironmentDeployment, Revision,
    RevisionDeployment, ServerStatus,
};

use std::fmt;
use std::path::Path;

use crate::clients::{
    collections, require, ApiError, ApiResult, ApigeeClient, HttpMethod, RequestBody,
    ResourcePath, ACTION_PARAM,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// The two kinds of deployable asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// API proxies, collection `apis`.
    ApiProxy,
    /// Shared flows, collection `sharedflows`.
    SharedFlow,
}

impl AssetKind {
    /// Returns the collection prefix used in paths.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::ApiProxy => collections::API_PROXIES,
            Self::SharedFlow => collections::SHARED_FLOWS,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiProxy => f.write_str("API proxy"),
            Self::SharedFlow => f.write_str("shared flow"),
        }
    }
}

/// The deployable asset engine bound to one [`AssetKind`].
///
/// Obtained through [`ApigeeClient::api_proxies`] or
/// [`ApigeeClient::shared_flows`].
#[derive(Clone, Copy, Debug)]
pub struct DeployableAssets<'a> {
    client: &'a ApigeeClient,
    kind: AssetKind,
}

impl<'a> DeployableAssets<'a> {
    /// Binds the engine to a client and asset kind.
    #[must_use]
    pub const fn new(client: &'a ApigeeClient, kind: AssetKind) -> Self {
        Self { client, kind }
    }

    /// Returns the asset kind this engine manages.
    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    fn collection_path(&self) -> ResourcePath {
        ResourcePath::new(self.kind.collection())
    }

    fn asset_path(&self, name: &str) -> Result<ResourcePath, ApiError> {
        require("name", name)?;
        Ok(self.collection_path().push(name))
    }

    fn revision_path(&self, name: &str, revision: Revision) -> Result<ResourcePath, ApiError> {
        Ok(self
            .asset_path(name)?
            .push(collections::REVISIONS)
            .push(revision))
    }

    fn deployment_path(
        &self,
        name: &str,
        environment: &str,
        revision: Revision,
    ) -> Result<ResourcePath, ApiError> {
        require("name", name)?;
        require("environment", environment)?;
        Ok(ResourcePath::new(collections::ENVIRONMENTS)
            .push(environment)
            .push(self.kind.collection())
            .push(name)
            .push(collections::REVISIONS)
            .push(revision)
            .push(collections::DEPLOYMENTS))
    }

    /// Lists asset names. Revisions are not expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self) -> ApiResult<Vec<String>> {
        self.client.get(&self.collection_path()).await
    }

    /// Returns an asset and its revision list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `name` is empty, or any error of
    /// the request.
    pub async fn get(&self, name: &str) -> ApiResult<DeployableAsset> {
        let path = self.asset_path(name)?;
        self.client.get(&path).await
    }

    /// Returns one revision of an asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `name` is empty, or any error of
    /// the request.
    pub async fn get_revision(
        &self,
        name: &str,
        revision: Revision,
    ) -> ApiResult<DeployableRevision> {
        let path = self.revision_path(name, revision)?;
        self.client.get(&path).await
    }

    /// Uploads the bundle archive at `source` as a new revision of `name`.
    ///
    /// Creates the asset if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `name` is empty or `source`
    /// cannot be read, or any error of the request.
    pub async fn import(
        &self,
        name: &str,
        source: impl AsRef<Path> + Send,
    ) -> ApiResult<DeployableRevision> {
        require("name", name)?;
        let source = source.as_ref();
        let content = tokio::fs::read(source).await.map_err(|e| {
            ApiError::validation(format!(
                "cannot read bundle archive '{}': {e}",
                source.display()
            ))
        })?;
        let file_name = source
            .file_name()
            .map_or_else(|| format!("{name}.zip"), |f| f.to_string_lossy().into_owned());

        self.import_bytes(name, file_name, content).await
    }

    /// Uploads an in-memory bundle archive as a new revision of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `name` is empty or `content` is
    /// empty, or any error of the request.
    pub async fn import_bytes(
        &self,
        name: &str,
        file_name: impl Into<String> + Send,
        content: Vec<u8>,
    ) -> ApiResult<DeployableRevision> {
        require("name", name)?;
        if content.is_empty() {
            return Err(ApiError::validation("bundle archive must not be empty"));
        }

        let http = self.client.http_client();
        let request = http
            .request_builder(HttpMethod::Post, &self.collection_path())?
            .query_param(ACTION_PARAM, "import")
            .query_param("name", name)
            .body(RequestBody::Archive {
                file_name: file_name.into(),
                content,
            })
            .build()?;

        tracing::debug!(kind = %self.kind, name, "Importing bundle");
        http.execute(request).await
    }

    /// Downloads the bundle archive of one revision.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the platform answers with JSON instead
    /// of an archive, [`ApiError::Validation`] if `name` is empty, or any
    /// error of the request.
    pub async fn export(&self, name: &str, revision: Revision) -> ApiResult<Vec<u8>> {
        let path = self.revision_path(name, revision)?;
        let http = self.client.http_client();
        let request = http
            .request_builder(HttpMethod::Get, &path)?
            .query_param("format", "bundle")
            .header("Accept", "application/octet-stream")
            .build()?;
        http.execute_archive(request).await
    }

    /// Deletes one revision.
    ///
    /// The platform rejects deleting a revision that is deployed anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] if the revision is deployed,
    /// [`ApiError::Validation`] if `name` is empty, or any error of the
    /// request.
    pub async fn delete_revision(
        &self,
        name: &str,
        revision: Revision,
    ) -> ApiResult<DeployableRevision> {
        let path = self.revision_path(name, revision)?;
        self.client.delete(&path).await
    }

    /// Deletes an asset and all its revisions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] if any revision is deployed,
    /// [`ApiError::Validation`] if `name` is empty, or any error of the
    /// request.
    pub async fn delete(&self, name: &str) -> ApiResult<DeletedItemInfo> {
        let path = self.asset_path(name)?;
        self.client.delete(&path).await
    }

    /// Activates a revision in an environment.
    ///
    /// `override`, `delay`, and the optional `basepath` travel as query
    /// parameters on a body-less form POST.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] if another revision is active and
    /// `override_existing` is false, [`ApiError::Validation`] if `name` or
    /// `environment` is empty, or any error of the request.
    pub async fn deploy(
        &self,
        name: &str,
        environment: &str,
        revision: Revision,
        options: DeployOptions,
    ) -> ApiResult<RevisionDeployment> {
        let path = self.deployment_path(name, environment, revision)?;
        let http = self.client.http_client();
        let mut builder = http
            .request_builder(HttpMethod::Post, &path)?
            .header("Content-Type", FORM_CONTENT_TYPE)
            .query_param("override", options.override_existing)
            .query_param("delay", options.delay_seconds);
        if let Some(base_path) = options.base_path.as_deref() {
            require("base_path", base_path)?;
            builder = builder.query_param("basepath", base_path);
        }

        tracing::debug!(
            kind = %self.kind,
            name,
            environment,
            %revision,
            override_existing = options.override_existing,
            "Deploying revision"
        );
        http.execute(builder.build()?).await
    }

    /// Deactivates a revision in an environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `name` or `environment` is empty,
    /// or any error of the request.
    pub async fn undeploy(
        &self,
        name: &str,
        environment: &str,
        revision: Revision,
    ) -> ApiResult<RevisionDeployment> {
        let path = self.deployment_path(name, environment, revision)?;
        tracing::debug!(kind = %self.kind, name, environment, %revision, "Undeploying revision");
        self.client.delete(&path).await
    }

    /// Returns where the asset's revisions are deployed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `name` is empty, or any error of
    /// the request.
    pub async fn get_deployments(&self, name: &str) -> ApiResult<Deployment> {
        let path = self.asset_path(name)?.push(collections::DEPLOYMENTS);
        self.client.get(&path).await
    }
}

// Verify DeployableAssets is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DeployableAssets<'static>>();
};
