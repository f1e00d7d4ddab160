//! Top-level client for the Apigee management API.
//!
//! This module provides the [`ApigeeClient`] type, the entry point to every
//! resource service and to the deployable asset engine.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::ApiError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpMethod;
use crate::clients::path::ResourcePath;
use crate::clients::response::ApiResult;
use crate::config::{ApigeeConfig, OrgName};
use crate::deployable::{AssetKind, DeployableAssets};
use crate::resources::{
    CompanyAppService, CompanyService, CredentialService, DeveloperAppService, DeveloperService,
    KeyValueMapService, KvmEntryService, OrganizationService, TargetServerService,
    VirtualHostService,
};

/// Query parameter carrying status-change actions.
pub(crate) const ACTION_PARAM: &str = "action";

/// Client for the management API of one organization.
///
/// Provides typed accessors for each resource service plus untyped helpers
/// (`get`, `post`, `put`, `delete`) for endpoints without a dedicated service.
/// Each operation performs exactly one request.
///
/// # Thread Safety
///
/// `ApigeeClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use apigee_admin::{ApigeeClient, ApigeeConfig, BasicAuth, OrgName};
///
/// let config = ApigeeConfig::builder()
///     .organization(OrgName::new("acme")?)
///     .authenticator(BasicAuth::new("ops@acme.com", "secret")?)
///     .build()?;
/// let client = ApigeeClient::new(&config)?;
///
/// let developers = client.developers().list().await?;
/// let proxies = client.api_proxies().list().await?;
/// ```
#[derive(Debug)]
pub struct ApigeeClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify ApigeeClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApigeeClient>();
};

impl ApigeeClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the underlying HTTP client cannot be created.
    pub fn new(config: &ApigeeConfig) -> Result<Self, ApiError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(
            organization = %config.organization(),
            endpoint = %http_client.base_endpoint(),
            "Created management API client"
        );
        Ok(Self { http_client })
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns the organization this client is scoped to.
    #[must_use]
    pub const fn org_name(&self) -> &OrgName {
        self.http_client.organization()
    }

    /// Sends a GET request and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the reply does not decode.
    pub async fn get<T: DeserializeOwned>(&self, path: &ResourcePath) -> ApiResult<T> {
        self.get_with_query(path, &[]).await
    }

    /// Sends a GET request with query parameters and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the reply does not decode.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &ResourcePath,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let mut builder = self.http_client.request_builder(HttpMethod::Get, path)?;
        for (key, value) in query {
            builder = builder.query_param(*key, value);
        }
        self.http_client.execute(builder.build()?).await
    }

    /// Sends a POST request with a JSON body and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the reply does not decode.
    pub async fn post<B, T>(&self, path: &ResourcePath, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .new_request(HttpMethod::Post, path, Some(body))?;
        self.http_client.execute(request).await
    }

    /// Sends a PUT request with a JSON body and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the reply does not decode.
    pub async fn put<B, T>(&self, path: &ResourcePath, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .new_request(HttpMethod::Put, path, Some(body))?;
        self.http_client.execute(request).await
    }

    /// Sends a DELETE request and decodes the reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the reply does not decode.
    pub async fn delete<T: DeserializeOwned>(&self, path: &ResourcePath) -> ApiResult<T> {
        let request = self
            .http_client
            .new_request::<()>(HttpMethod::Delete, path, None)?;
        self.http_client.execute(request).await
    }

    /// Sends a DELETE request, ignoring the reply body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete_empty(&self, path: &ResourcePath) -> ApiResult<()> {
        let request = self
            .http_client
            .new_request::<()>(HttpMethod::Delete, path, None)?;
        self.http_client.execute_empty(request).await
    }

    /// Sends a body-less POST with `?action={action}`.
    ///
    /// This is how the platform changes the status of developers, apps, and
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn post_action(&self, path: &ResourcePath, action: &str) -> ApiResult<()> {
        let request = self
            .http_client
            .request_builder(HttpMethod::Post, path)?
            .query_param(ACTION_PARAM, action)
            .build()?;
        self.http_client.execute_empty(request).await
    }

    /// Returns the company service.
    #[must_use]
    pub const fn companies(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    /// Returns the company app service.
    #[must_use]
    pub const fn company_apps(&self) -> CompanyAppService<'_> {
        CompanyAppService::new(self)
    }

    /// Returns the app credential service.
    #[must_use]
    pub const fn credentials(&self) -> CredentialService<'_> {
        CredentialService::new(self)
    }

    /// Returns the developer service.
    #[must_use]
    pub const fn developers(&self) -> DeveloperService<'_> {
        DeveloperService::new(self)
    }

    /// Returns the developer app service.
    #[must_use]
    pub const fn developer_apps(&self) -> DeveloperAppService<'_> {
        DeveloperAppService::new(self)
    }

    /// Returns the key value map service.
    #[must_use]
    pub const fn key_value_maps(&self) -> KeyValueMapService<'_> {
        KeyValueMapService::new(self)
    }

    /// Returns the key value map entry service.
    #[must_use]
    pub const fn kvm_entries(&self) -> KvmEntryService<'_> {
        KvmEntryService::new(self)
    }

    /// Returns the target server service.
    #[must_use]
    pub const fn target_servers(&self) -> TargetServerService<'_> {
        TargetServerService::new(self)
    }

    /// Returns the virtual host service.
    #[must_use]
    pub const fn virtual_hosts(&self) -> VirtualHostService<'_> {
        VirtualHostService::new(self)
    }

    /// Returns the organization service.
    #[must_use]
    pub const fn organizations(&self) -> OrganizationService<'_> {
        OrganizationService::new(self)
    }

    /// Returns the deployable asset engine for API proxies.
    #[must_use]
    pub const fn api_proxies(&self) -> DeployableAssets<'_> {
        DeployableAssets::new(self, AssetKind::ApiProxy)
    }

    /// Returns the deployable asset engine for shared flows.
    #[must_use]
    pub const fn shared_flows(&self) -> DeployableAssets<'_> {
        DeployableAssets::new(self, AssetKind::SharedFlow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiRoot;

    fn create_test_client() -> ApigeeClient {
        let config = ApigeeConfig::builder()
            .organization(OrgName::new("acme").unwrap())
            .api_root(ApiRoot::new("https://mgmt.example.com/v1").unwrap())
            .build()
            .unwrap();
        ApigeeClient::new(&config).unwrap()
    }

    #[test]
    fn test_client_exposes_organization() {
        let client = create_test_client();
        assert_eq!(client.org_name().as_ref(), "acme");
        assert_eq!(
            client.http_client().base_endpoint().as_str(),
            "https://mgmt.example.com/v1/organizations/acme/"
        );
    }

    #[test]
    fn test_deployable_accessors_bind_asset_kind() {
        let client = create_test_client();
        assert_eq!(client.api_proxies().kind(), AssetKind::ApiProxy);
        assert_eq!(client.shared_flows().kind(), AssetKind::SharedFlow);
    }
}
