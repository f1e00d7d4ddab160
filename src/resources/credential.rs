//! App credentials (consumer key/secret pairs).
//!
//! Credentials hang off an app, and apps belong either to a company or to a
//! developer; [`AppOwner`] selects which. Key material is never regenerated
//! in place: `create` issues a new pair.
//!
//! The platform is inconsistent about `apiProducts`: reads return
//! `[{"apiproduct": "...", "status": "..."}]` while writes take a list of
//! product names. [`CredentialProduct`] accepts both on input and always
//! writes the name form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clients::{collections, require, ApiError, ApiResult, ApigeeClient, ResourcePath};
use crate::resources::{AppAction, Attribute};

/// The owner of an app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppOwner {
    /// A company, by name.
    Company(String),
    /// A developer, by email or id.
    Developer(String),
}

impl AppOwner {
    fn app_path(&self, app: &str) -> Result<ResourcePath, ApiError> {
        let (collection, owner) = match self {
            Self::Company(name) => (collections::COMPANIES, name),
            Self::Developer(id) => (collections::DEVELOPERS, id),
        };
        require("app owner", owner)?;
        require("app name", app)?;
        Ok(ResourcePath::new(collection)
            .push(owner)
            .push(collections::APPS)
            .push(app))
    }
}

/// An API product on a credential, with its approval status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialProduct {
    /// The product name.
    pub name: String,
    /// Approval status, present only on reads.
    pub status: Option<String>,
}

impl CredentialProduct {
    /// Names a product for a write.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
        }
    }
}

impl Serialize for CredentialProduct {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for CredentialProduct {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Entry {
                apiproduct: String,
                status: Option<String>,
            },
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Self { name, status: None },
            Raw::Entry { apiproduct, status } => Self {
                name: apiproduct,
                status,
            },
        })
    }
}

/// A consumer key/secret pair attached to an app.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// The consumer key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_key: Option<String>,
    /// The consumer secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_secret: Option<String>,
    /// Status, e.g. `approved` or `revoked`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Authorized API products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_products: Vec<CredentialProduct>,
    /// OAuth scopes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// Custom attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// When the credential was issued.
    #[serde(
        default,
        with = "epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub issued_at: Option<DateTime<Utc>>,
    /// When the credential expires. `None` means it never does.
    #[serde(
        default,
        with = "epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Returns the names of the authorized products.
    #[must_use]
    pub fn product_names(&self) -> Vec<&str> {
        self.api_products.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Epoch milliseconds where a negative value (the platform sends `-1`)
/// means "not set".
mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_i64(t.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<i64>::deserialize(deserializer)?;
        Ok(raw
            .filter(|ms| *ms >= 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis))
    }
}

/// Operations on app credentials.
#[derive(Clone, Copy, Debug)]
pub struct CredentialService<'a> {
    client: &'a ApigeeClient,
}

impl<'a> CredentialService<'a> {
    pub(crate) const fn new(client: &'a ApigeeClient) -> Self {
        Self { client }
    }

    fn keys_path(owner: &AppOwner, app: &str) -> Result<ResourcePath, ApiError> {
        Ok(owner.app_path(app)?.push(collections::KEYS))
    }

    fn key_path(owner: &AppOwner, app: &str, consumer_key: &str) -> Result<ResourcePath, ApiError> {
        require("consumer key", consumer_key)?;
        Ok(Self::keys_path(owner, app)?.push(consumer_key))
    }

    /// Issues a new credential on an app.
    ///
    /// POSTs to `.../apps/{app}/keys/create`. Set `consumer_key` and
    /// `consumer_secret` to import existing key material.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn create(
        &self,
        owner: &AppOwner,
        app: &str,
        credential: &Credential,
    ) -> ApiResult<Credential> {
        let path = Self::keys_path(owner, app)?.push(collections::CREATE);
        self.client.post(&path, credential).await
    }

    /// Fetches a credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn get(
        &self,
        owner: &AppOwner,
        app: &str,
        consumer_key: &str,
    ) -> ApiResult<Credential> {
        self.client
            .get(&Self::key_path(owner, app, consumer_key)?)
            .await
    }

    /// Updates a credential in place, e.g. to add API products.
    ///
    /// The platform takes credential updates as POST, not PUT.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn update(
        &self,
        owner: &AppOwner,
        app: &str,
        consumer_key: &str,
        credential: &Credential,
    ) -> ApiResult<Credential> {
        self.client
            .post(&Self::key_path(owner, app, consumer_key)?, credential)
            .await
    }

    /// Deletes a credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn delete(&self, owner: &AppOwner, app: &str, consumer_key: &str) -> ApiResult<()> {
        self.client
            .delete_empty(&Self::key_path(owner, app, consumer_key)?)
            .await
    }

    /// Removes one API product from a credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn remove_api_product(
        &self,
        owner: &AppOwner,
        app: &str,
        consumer_key: &str,
        api_product: &str,
    ) -> ApiResult<()> {
        require("API product", api_product)?;
        let path = Self::key_path(owner, app, consumer_key)?
            .push(collections::API_PRODUCTS)
            .push(api_product);
        self.client.delete_empty(&path).await
    }

    /// Approves a credential (`?action=approve`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn approve(&self, owner: &AppOwner, app: &str, consumer_key: &str) -> ApiResult<()> {
        self.set_status(owner, app, consumer_key, AppAction::Approve)
            .await
    }

    /// Revokes a credential (`?action=revoke`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if an identifier is empty or the request fails.
    pub async fn revoke(&self, owner: &AppOwner, app: &str, consumer_key: &str) -> ApiResult<()> {
        self.set_status(owner, app, consumer_key, AppAction::Revoke)
            .await
    }

    async fn set_status(
        &self,
        owner: &AppOwner,
        app: &str,
        consumer_key: &str,
        action: AppAction,
    ) -> ApiResult<()> {
        let path = Self::key_path(owner, app, consumer_key)?;
        self.client.post_action(&path, action.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_decodes_read_shape() {
        let credential: Credential = serde_json::from_value(json!({
            "consumerKey": "key-1",
            "consumerSecret": "secret-1",
            "status": "approved",
            "apiProducts": [{"apiproduct": "gold", "status": "approved"}],
            "attributes": [],
            "issuedAt": 1_600_000_000_000_i64,
            "expiresAt": -1,
            "scopes": []
        }))
        .unwrap();

        assert_eq!(credential.consumer_key.as_deref(), Some("key-1"));
        assert_eq!(credential.product_names(), vec!["gold"]);
        assert_eq!(credential.api_products[0].status.as_deref(), Some("approved"));
        assert!(credential.issued_at.is_some());
        assert!(credential.expires_at.is_none());
    }

    #[test]
    fn test_credential_serializes_write_shape() {
        let credential = Credential {
            api_products: vec![CredentialProduct::new("gold"), CredentialProduct::new("silver")],
            ..Credential::default()
        };
        assert_eq!(
            serde_json::to_value(&credential).unwrap(),
            json!({"apiProducts": ["gold", "silver"]})
        );
    }

    #[test]
    fn test_owner_paths() {
        let company = AppOwner::Company("acme-corp".to_string());
        let developer = AppOwner::Developer("ann@example.com".to_string());

        assert_eq!(
            CredentialService::key_path(&company, "portal", "key-1")
                .unwrap()
                .render()
                .unwrap(),
            "companies/acme-corp/apps/portal/keys/key-1"
        );
        assert_eq!(
            CredentialService::keys_path(&developer, "mobile")
                .unwrap()
                .push(collections::CREATE)
                .render()
                .unwrap(),
            "developers/ann@example.com/apps/mobile/keys/create"
        );
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        let owner = AppOwner::Company(String::new());
        assert!(matches!(
            CredentialService::keys_path(&owner, "portal"),
            Err(ApiError::Validation { .. })
        ));
        let owner = AppOwner::Developer("ann@example.com".to_string());
        assert!(matches!(
            CredentialService::key_path(&owner, "mobile", ""),
            Err(ApiError::Validation { .. })
        ));
    }
}
