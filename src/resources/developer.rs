//! Developers.
//!
//! A developer is addressed by email or by id. Setting `status` in an
//! update has no effect on the platform; use [`DeveloperService::approve`]
//! and [`DeveloperService::revoke`] instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::developer_app::DeveloperAppService;
use crate::resources::{Attribute, DeveloperApp};

/// A registered developer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Platform-assigned id. Must be unset on create.
    #[serde(
        default,
        rename = "developerId",
        alias = "uuid",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// User name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Owning organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// `active` or `inactive`. Ignored by the platform on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Names of the developer's apps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apps: Vec<String>,
    /// Companies the developer belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<String>,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// When the developer was created.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// When the developer was last modified.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl Developer {
    /// Returns the identifier used in paths: the email if set, else the id.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        [self.email.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

/// The expanded app listing comes back either bare or wrapped in `app`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpandedApps {
    Bare(Vec<DeveloperApp>),
    Wrapped {
        #[serde(default)]
        app: Vec<DeveloperApp>,
    },
}

impl ExpandedApps {
    fn into_apps(self) -> Vec<DeveloperApp> {
        match self {
            Self::Bare(apps) | Self::Wrapped { app: apps } => apps,
        }
    }
}

/// Operations on `developers`.
#[derive(Clone, Copy, Debug)]
pub struct DeveloperService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> DeveloperService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn path(email_or_id: &str) -> Result<ResourcePath, ApiError> {
        require("developer email or id", email_or_id)?;
        Ok(ResourcePath::new(collections::DEVELOPERS).push(email_or_id))
    }

    /// Lists developer emails.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn list(&self) -> ApiResult<Vec<String>> {
        self.client
            .get(&ResourcePath::new(collections::DEVELOPERS))
            .await
    }

    /// Fetches a developer by email or id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `email_or_id` is empty or the request fails.
    pub async fn get(&self, email_or_id: &str) -> ApiResult<Developer> {
        self.client.get(&Self::path(email_or_id)?).await
    }

    /// Creates a developer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any request if `id` is set,
    /// or any error of the request.
    pub async fn create(&self, developer: &Developer) -> ApiResult<Developer> {
        if developer.id.as_deref().is_some_and(|id| !id.trim().is_empty()) {
            return Err(ApiError::validation(
                "cannot create a developer with a specific id",
            ));
        }
        self.client
            .post(&ResourcePath::new(collections::DEVELOPERS), developer)
            .await
    }

    /// Replaces a developer, addressed by email or else by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any request if neither email
    /// nor id is set, or any error of the request.
    pub async fn update(&self, developer: &Developer) -> ApiResult<Developer> {
        let identifier = developer.identifier().ok_or_else(|| {
            ApiError::validation("must specify the email or id of the developer to update")
        })?;
        self.client.put(&Self::path(identifier)?, developer).await
    }

    /// Deletes a developer, returning it as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `email_or_id` is empty or the request fails.
    pub async fn delete(&self, email_or_id: &str) -> ApiResult<Developer> {
        self.client.delete(&Self::path(email_or_id)?).await
    }

    /// Activates a developer (`?action=active`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `email_or_id` is empty or the request fails.
    pub async fn approve(&self, email_or_id: &str) -> ApiResult<()> {
        self.client
            .post_action(&Self::path(email_or_id)?, "active")
            .await
    }

    /// Deactivates a developer (`?action=inactive`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `email_or_id` is empty or the request fails.
    pub async fn revoke(&self, email_or_id: &str) -> ApiResult<()> {
        self.client
            .post_action(&Self::path(email_or_id)?, "inactive")
            .await
    }

    /// Fetches all of a developer's apps with details (`?expand=true`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if `email_or_id` is empty or the request fails.
    pub async fn get_apps(&self, email_or_id: &str) -> ApiResult<Vec<DeveloperApp>> {
        let path = DeveloperAppService::apps_path(email_or_id)?;
        let response = self
            .client
            .get_with_query::<ExpandedApps>(&path, &[("expand", "true")])
            .await?;
        Ok(response.map(ExpandedApps::into_apps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_prefers_email() {
        let developer = Developer {
            email: Some("ann@example.com".to_string()),
            id: Some("d3v".to_string()),
            ..Developer::default()
        };
        assert_eq!(developer.identifier(), Some("ann@example.com"));

        let developer = Developer {
            email: Some(String::new()),
            id: Some("d3v".to_string()),
            ..Developer::default()
        };
        assert_eq!(developer.identifier(), Some("d3v"));

        assert_eq!(Developer::default().identifier(), None);
    }

    #[test]
    fn test_developer_reads_either_id_field() {
        let a: Developer = serde_json::from_value(json!({"developerId": "x1"})).unwrap();
        let b: Developer = serde_json::from_value(json!({"uuid": "x1"})).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_developer_decodes_timestamps() {
        let developer: Developer = serde_json::from_value(json!({
            "email": "ann@example.com",
            "firstName": "Ann",
            "status": "active",
            "createdAt": 1_650_000_000_000_i64
        }))
        .unwrap();
        assert_eq!(
            developer.created_at.map(|t| t.timestamp_millis()),
            Some(1_650_000_000_000)
        );
        assert_eq!(developer.first_name.as_deref(), Some("Ann"));
    }

    #[test]
    fn test_expanded_apps_accepts_both_shapes() {
        let bare: ExpandedApps = serde_json::from_value(json!([{"name": "a"}])).unwrap();
        let wrapped: ExpandedApps =
            serde_json::from_value(json!({"app": [{"name": "a"}, {"name": "b"}]})).unwrap();
        assert_eq!(bare.into_apps().len(), 1);
        assert_eq!(wrapped.into_apps().len(), 2);
    }

    fn create_test_client() -> ApigeeClient {
        let config = crate::config::ApigeeConfig::builder()
            .organization(crate::config::OrgName::new("acme").unwrap())
            .build()
            .unwrap();
        ApigeeClient::new(&config).unwrap()
    }

    #[test]
    fn test_update_without_identifier_is_rejected() {
        let client = create_test_client();
        let result = tokio_test::block_on(client.developers().update(&Developer::default()));
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }

    #[test]
    fn test_create_with_id_is_rejected() {
        let client = create_test_client();
        let developer = Developer {
            email: Some("ann@example.com".to_string()),
            id: Some("d3v".to_string()),
            ..Developer::default()
        };
        let result = tokio_test::block_on(client.developers().create(&developer));
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }
}
