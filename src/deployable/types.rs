//! Wire types for deployable assets.
//!
//! The platform reports revisions as numeric strings in most places and as
//! integers in a few; [`Revision`] accepts both. Timestamps are epoch
//! milliseconds.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A revision number of a deployable asset.
///
/// # Example
///
/// ```rust
/// use apigee_admin::deployable::Revision;
///
/// let from_string: Revision = serde_json::from_str(r#""12""#).unwrap();
/// let from_number: Revision = serde_json::from_str("12").unwrap();
/// assert_eq!(from_string, from_number);
/// assert_eq!(from_string.to_string(), "12");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u32);

impl Revision {
    /// Creates a revision from its number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the revision number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl From<u32> for Revision {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

impl FromStr for Revision {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Revision {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Revision {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid revision '{s}'"))),
        }
    }
}

/// Audit metadata attached to assets and revisions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    /// When the asset was created.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Who created the asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// When the asset was last modified.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Who last modified the asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    /// Platform sub-type, e.g. `Proxy` or `SharedFlow`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

/// A named asset and its revisions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployableAsset {
    /// The asset name, unique within its collection.
    pub name: String,
    /// All revisions, in the order the platform lists them.
    #[serde(default, rename = "revision")]
    pub revisions: Vec<Revision>,
    /// Audit metadata.
    #[serde(default, rename = "metaData")]
    pub metadata: AssetMetadata,
}

impl DeployableAsset {
    /// Returns the highest revision, if any.
    #[must_use]
    pub fn latest_revision(&self) -> Option<Revision> {
        self.revisions.iter().max().copied()
    }
}

/// One revision of an asset, as returned by import and revision reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployableRevision {
    /// The asset name.
    pub name: String,
    /// The revision number.
    pub revision: Revision,
    /// Display name from the bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Description from the bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Bundle type reported by the platform.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,
    /// Base paths served by the revision's proxy endpoints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub basepaths: Vec<String>,
    /// Policy names in the bundle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,
    /// Proxy endpoint names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proxy_endpoints: Vec<String>,
    /// Target endpoint names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_endpoints: Vec<String>,
    /// Resource file references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    /// Shared flows referenced by the bundle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_flows: Vec<String>,
    /// When the revision was created.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Who created the revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// When the revision was last modified.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_modified_at: Option<DateTime<Utc>>,
    /// Who last modified the revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
}

/// Summary of a deleted asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedItemInfo {
    /// The deleted asset's name.
    pub name: String,
    /// The revisions removed with it.
    #[serde(default, rename = "revision")]
    pub revisions: Vec<Revision>,
    /// Audit metadata as of deletion.
    #[serde(default, rename = "metaData")]
    pub metadata: AssetMetadata,
}

/// Deployment state of a revision in one environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentState {
    /// Serving traffic.
    Deployed,
    /// Rollout has not completed on every server.
    Pending,
    /// No longer serving traffic.
    Undeployed,
    /// Rollout failed.
    #[serde(alias = "failed")]
    Error,
    /// A state this client does not know.
    #[serde(other)]
    Unknown,
}

/// Status of one runtime server in a deployment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// The server's state (e.g. `deployed`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Server roles (e.g. `message-processor`).
    #[serde(default, rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// The server's UUID.
    #[serde(default, rename = "uUID", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// Result of a deploy or undeploy call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionDeployment {
    /// The asset name. Proxies report it as `aPIProxy`, shared flows as `sharedFlow`.
    #[serde(
        default,
        rename = "aPIProxy",
        alias = "sharedFlow",
        skip_serializing_if = "Option::is_none"
    )]
    pub asset: Option<String>,
    /// The environment the call targeted.
    pub environment: String,
    /// The organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// The revision the call targeted.
    pub revision: Revision,
    /// Resulting state.
    pub state: DeploymentState,
    /// Per-server status.
    #[serde(default, rename = "server", skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerStatus>,
}

/// One revision's state inside a [`Deployment`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedRevision {
    /// The revision number, reported under `name`.
    #[serde(rename = "name")]
    pub revision: Revision,
    /// The revision's state in the enclosing environment.
    pub state: DeploymentState,
    /// Per-server status.
    #[serde(default, rename = "server", skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerStatus>,
}

/// Deployments of an asset in one environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDeployment {
    /// The environment name.
    pub name: String,
    /// Revisions present in the environment.
    #[serde(default, rename = "revision")]
    pub revisions: Vec<DeployedRevision>,
}

/// Where an asset's revisions are deployed, across all environments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// The asset name.
    pub name: String,
    /// The organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Per-environment deployments.
    #[serde(default, rename = "environment")]
    pub environments: Vec<EnvironmentDeployment>,
}

impl Deployment {
    /// Returns the revisions in state `deployed` in `environment`.
    #[must_use]
    pub fn active_revisions(&self, environment: &str) -> Vec<Revision> {
        self.environments
            .iter()
            .filter(|env| env.name == environment)
            .flat_map(|env| &env.revisions)
            .filter(|rev| rev.state == DeploymentState::Deployed)
            .map(|rev| rev.revision)
            .collect()
    }

    /// Returns `true` if `revision` is deployed in any environment.
    #[must_use]
    pub fn is_deployed(&self, revision: Revision) -> bool {
        self.environments
            .iter()
            .flat_map(|env| &env.revisions)
            .any(|rev| rev.revision == revision && rev.state == DeploymentState::Deployed)
    }
}

/// Options for a deploy call.
///
/// `base_path` is sent as the `basepath` query parameter; the platform takes
/// routing configuration for this call from the URL, not a body.
///
/// # Example
///
/// ```rust
/// use apigee_admin::deployable::DeployOptions;
///
/// let options = DeployOptions::new().override_existing(true).delay_seconds(30);
/// assert!(options.override_existing);
/// assert_eq!(options.delay_seconds, 30);
/// assert!(options.base_path.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeployOptions {
    /// Replace a different revision already active in the environment.
    pub override_existing: bool,
    /// Grace period before the previous revision is torn down; 0 is immediate.
    pub delay_seconds: u32,
    /// Base path override.
    pub base_path: Option<String>,
}

impl DeployOptions {
    /// Creates options with no override, no delay, and no base path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to override an active revision.
    #[must_use]
    pub const fn override_existing(mut self, value: bool) -> Self {
        self.override_existing = value;
        self
    }

    /// Sets the teardown delay in seconds.
    #[must_use]
    pub const fn delay_seconds(mut self, seconds: u32) -> Self {
        self.delay_seconds = seconds;
        self
    }

    /// Sets the base path override.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }
}
