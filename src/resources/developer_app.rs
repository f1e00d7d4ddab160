//! Apps owned by developers.

use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::{AppAction, Attribute, Credential};

/// An app registered to a developer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperApp {
    /// The app name, unique within the developer.
    #[serde(default)]
    pub name: String,
    /// Platform-assigned app id.
    #[serde(default, rename = "appId", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id of the owning developer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    /// OAuth callback URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Lifetime of the initial credential in milliseconds; `-1` never expires.
    /// Only read by the platform on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_expires_in: Option<i64>,
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

/// Operations on `developers/{developer}/apps`.
#[derive(Clone, Copy, Debug)]
pub struct DeveloperAppService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> DeveloperAppService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    pub(crate) fn apps_path(developer: &str) -> Result<ResourcePath, ApiError> {
        require("developer", developer)?;
        Ok(ResourcePath::new(collections::DEVELOPERS)
            .push(developer)
            .push(collections::APPS))
    }

    fn app_path(developer: &str, name: &str) -> Result<ResourcePath, ApiError> {
        require("app name", name)?;
        Ok(Self::apps_path(developer)?.push(name))
    }

    /// Lists app names of a developer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `developer` is empty or the request fails.
    pub async fn list(&self, developer: &str) -> ApiResult<Vec<String>> {
        self.client.get(&Self::apps_path(developer)?).await
    }

    /// Fetches an app.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn get(&self, developer: &str, name: &str) -> ApiResult<DeveloperApp> {
        self.client.get(&Self::app_path(developer, name)?).await
    }

    /// Creates an app.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any request if the app has no
    /// name, or any error of the request.
    pub async fn create(&self, developer: &str, app: &DeveloperApp) -> ApiResult<DeveloperApp> {
        if app.name.trim().is_empty() {
            return Err(ApiError::validation("cannot create a developer app with no name"));
        }
        self.client.post(&Self::apps_path(developer)?, app).await
    }

    /// Replaces an app, addressed by its name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any request if the app has no
    /// name, or any error of the request.
    pub async fn update(&self, developer: &str, app: &DeveloperApp) -> ApiResult<DeveloperApp> {
        if app.name.trim().is_empty() {
            return Err(ApiError::validation("missing the name of the app to update"));
        }
        self.client
            .put(&Self::app_path(developer, &app.name)?, app)
            .await
    }

    /// Deletes an app, returning it as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, developer: &str, name: &str) -> ApiResult<DeveloperApp> {
        self.client.delete(&Self::app_path(developer, name)?).await
    }

    /// Approves an app (`?action=approve`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn approve(&self, developer: &str, name: &str) -> ApiResult<()> {
        self.client
            .post_action(&Self::app_path(developer, name)?, AppAction::Approve.as_str())
            .await
    }

    /// Revokes an app (`?action=revoke`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn revoke(&self, developer: &str, name: &str) -> ApiResult<()> {
        self.client
            .post_action(&Self::app_path(developer, name)?, AppAction::Revoke.as_str())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_developer_app_wire_names() {
        let app = DeveloperApp {
            name: "mobile".to_string(),
            callback_url: Some("https://example.com/cb".to_string()),
            key_expires_in: Some(-1),
            api_products: vec!["gold".to_string()],
            ..DeveloperApp::default()
        };

        assert_eq!(
            serde_json::to_value(&app).unwrap(),
            json!({
                "name": "mobile",
                "callbackUrl": "https://example.com/cb",
                "keyExpiresIn": -1,
                "apiProducts": ["gold"]
            })
        );
    }

    #[test]
    fn test_developer_app_reads_app_id() {
        let app: DeveloperApp = serde_json::from_value(json!({
            "name": "mobile",
            "appId": "a1b2",
            "developerId": "d3v",
            "status": "approved"
        }))
        .unwrap();
        assert_eq!(app.id.as_deref(), Some("a1b2"));
        assert_eq!(app.developer_id.as_deref(), Some("d3v"));
    }

    #[test]
    fn test_create_without_name_is_rejected() {
        let config = crate::config::ApigeeConfig::builder()
            .organization(crate::config::OrgName::new("acme").unwrap())
            .build()
            .unwrap();
        let client = ApigeeClient::new(&config).unwrap();

        let result = tokio_test::block_on(
            client
                .developer_apps()
                .create("ann@example.com", &DeveloperApp::default()),
        );
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}
