//! Companies.

use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::Attribute;

/// A company that owns apps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// The company name, its natural key.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Status, e.g. `active`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Names of the company's apps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<String>,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

/// Operations on `companies`.
#[derive(Clone, Copy, Debug)]
pub struct CompanyService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> CompanyService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn path(name: &str) -> Result<ResourcePath, crate::clients::ApiError> {
        require("company name", name)?;
        Ok(ResourcePath::new(collections::COMPANIES).push(name))
    }

    /// Fetches a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`](crate::clients::ApiError) if `name` is empty or
    /// the request fails.
    pub async fn get(&self, name: &str) -> ApiResult<Company> {
        self.client.get(&Self::path(name)?).await
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`](crate::clients::ApiError) if the company has no
    /// name or the request fails.
    pub async fn create(&self, company: &Company) -> ApiResult<Company> {
        require("company name", &company.name)?;
        self.client
            .post(&ResourcePath::new(collections::COMPANIES), company)
            .await
    }

    /// Replaces a company, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`](crate::clients::ApiError) if the company has no
    /// name or the request fails.
    pub async fn update(&self, company: &Company) -> ApiResult<Company> {
        self.client.put(&Self::path(&company.name)?, company).await
    }

    /// Deletes a company.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`](crate::clients::ApiError) if `name` is empty or
    /// the request fails.
    pub async fn delete(&self, name: &str) -> ApiResult<()> {
        self.client.delete_empty(&Self::path(name)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_serializes_only_set_fields() {
        let company = Company {
            name: "acme-corp".to_string(),
            display_name: Some("Acme Corp".to_string()),
            ..Company::default()
        };
        assert_eq!(
            serde_json::to_value(&company).unwrap(),
            json!({"name": "acme-corp", "displayName": "Acme Corp"})
        );
    }

    #[test]
    fn test_company_path() {
        let path = CompanyService::path("acme-corp").unwrap();
        assert_eq!(path.render().unwrap(), "companies/acme-corp");
        assert!(CompanyService::path("").is_err());
    }
}
