//! Organization lookup.
//!
//! Every other service is scoped under the configured organization. This one
//! reads the organization itself, or any other organization the credentials
//! can see.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{
    collections, require, ApiResult, ApigeeClient, HttpMethod, HttpRequest, ResourcePath,
};
use crate::resources::Properties;

/// A tenant organization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization name.
    pub name: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Organization type, e.g. `paid` or `trial`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    /// When the organization was created.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Who created the organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// When the organization was last modified.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Who last modified the organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    /// Environment names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<String>,
    /// Feature flags and settings.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

/// Read access to organizations.
#[derive(Clone, Copy, Debug)]
pub struct OrganizationService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> OrganizationService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    /// Fetches the organization this client is scoped to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`](crate::clients::ApiError) if the request fails.
    pub async fn get(&self) -> ApiResult<Organization> {
        self.client.get(&ResourcePath::root()).await
    }

    /// Fetches an organization by name, resolved against the API root.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`](crate::clients::ApiError) if `name` is empty or
    /// the request fails.
    pub async fn get_by_name(&self, name: &str) -> ApiResult<Organization> {
        require("organization name", name)?;
        let http = self.client.http_client();
        let path = ResourcePath::new(collections::ORGANIZATIONS).push(name);
        let request = HttpRequest::builder(HttpMethod::Get, http.url_for_root(&path)?).build()?;
        http.execute(request).await
    }
}
