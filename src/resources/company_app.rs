//! Apps owned by companies.

use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::{AppAction, Attribute, Credential};

/// An app registered to a company.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyApp {
    /// The app name, unique within the company.
    #[serde(default)]
    pub name: String,
    /// Platform-assigned app id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// The owning company.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// App family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_family: Option<String>,
    /// OAuth callback URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Status, e.g. `approved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// API products requested at creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_products: Vec<String>,
    /// OAuth scopes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// Issued credentials.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<Credential>,
}

/// Operations on `companies/{company}/apps`.
#[derive(Clone, Copy, Debug)]
pub struct CompanyAppService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> CompanyAppService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn apps_path(company: &str) -> Result<ResourcePath, ApiError> {
        require("company name", company)?;
        Ok(ResourcePath::new(collections::COMPANIES)
            .push(company)
            .push(collections::APPS))
    }

    fn app_path(company: &str, name: &str) -> Result<ResourcePath, ApiError> {
        require("app name", name)?;
        Ok(Self::apps_path(company)?.push(name))
    }

    /// Lists app names of a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `company` is empty or the request fails.
    pub async fn list(&self, company: &str) -> ApiResult<Vec<String>> {
        self.client.get(&Self::apps_path(company)?).await
    }

    /// Fetches an app.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn get(&self, company: &str, name: &str) -> ApiResult<CompanyApp> {
        self.client.get(&Self::app_path(company, name)?).await
    }

    /// Creates an app.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the company or app name is empty or the
    /// request fails.
    pub async fn create(&self, company: &str, app: &CompanyApp) -> ApiResult<CompanyApp> {
        require("app name", &app.name)?;
        self.client.post(&Self::apps_path(company)?, app).await
    }

    /// Replaces an app, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the company or app name is empty or the
    /// request fails.
    pub async fn update(&self, company: &str, app: &CompanyApp) -> ApiResult<CompanyApp> {
        self.client
            .put(&Self::app_path(company, &app.name)?, app)
            .await
    }

    /// Deletes an app.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, company: &str, name: &str) -> ApiResult<()> {
        self.client
            .delete_empty(&Self::app_path(company, name)?)
            .await
    }

    /// Approves an app (`?action=approve`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn approve(&self, company: &str, name: &str) -> ApiResult<()> {
        self.client
            .post_action(&Self::app_path(company, name)?, AppAction::Approve.as_str())
            .await
    }

    /// Revokes an app (`?action=revoke`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn revoke(&self, company: &str, name: &str) -> ApiResult<()> {
        self.client
            .post_action(&Self::app_path(company, name)?, AppAction::Revoke.as_str())
            .await
    }
}
