//! # Apigee Admin Rust SDK
//!
//! A typed client for the Apigee Edge management API: developers, apps,
//! credentials, key value maps, target servers, virtual hosts, organizations,
//! and the revisioned lifecycle of API proxies and shared flows.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ApigeeConfig`] and [`ApigeeConfigBuilder`]
//! - Validated newtypes for the organization, API root, and secrets
//! - A pluggable [`Authenticator`] hook with [`BasicAuth`] and [`BearerToken`]
//! - An async transport that returns the raw reply with every result or error
//! - A deployable asset engine for importing, exporting, deploying and
//!   undeploying bundle revisions
//!
//! ## Quick Start
//!
//! ```rust
//! use apigee_admin::{ApigeeConfig, ApiRoot, BasicAuth, OrgName};
//!
//! let config = ApigeeConfig::builder()
//!     .organization(OrgName::new("acme").unwrap())
//!     .api_root(ApiRoot::new("https://api.enterprise.apigee.com/v1").unwrap())
//!     .authenticator(BasicAuth::new("ops@acme.com", "secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.organization().as_ref(), "acme");
//! ```
//!
//! ## Managing Resources
//!
//! ```rust,ignore
//! use apigee_admin::ApigeeClient;
//! use apigee_admin::resources::{KvmEntry, KeyValueMap};
//!
//! let client = ApigeeClient::new(&config)?;
//!
//! let developer = client.developers().get("ann@example.com").await?;
//! println!("{:?} has {} apps", developer.email, developer.apps.len());
//!
//! let map = KeyValueMap {
//!     name: "settings".to_string(),
//!     encrypted: false,
//!     entries: vec![KvmEntry::new("timeout", "30")],
//! };
//! client.key_value_maps().create("test", &map).await?;
//! ```
//!
//! ## Deploying a Bundle
//!
//! ```rust,ignore
//! use apigee_admin::deployable::DeployOptions;
//!
//! let proxies = client.api_proxies();
//! let imported = proxies.import("orders", "bundles/orders.zip").await?;
//!
//! let options = DeployOptions::new().override_existing(true).delay_seconds(30);
//! proxies.deploy("orders", "prod", imported.revision, options).await?;
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`ApiResult`]. A failure tells the caller whether
//! their input was rejected before sending ([`ApiError::Validation`]), the
//! request could not be built or delivered, the platform refused the call
//! ([`ApiError::Platform`] or [`ApiError::Conflict`]), or a successful reply
//! did not have the expected shape ([`ApiError::Decode`]). Whenever a reply
//! was received, [`ApiError::response`] returns it.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction and empty
//!   identifiers are rejected before any request
//! - **Thread-safe**: The client and every service handle are `Send + Sync`
//! - **One call, one request**: No retries and no hidden orchestration

pub mod clients;
pub mod config;
pub mod deployable;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{
    ApiRoot, ApigeeConfig, ApigeeConfigBuilder, Authenticator, BasicAuth, BearerToken, OrgName,
    Secret,
};
pub use error::ConfigError;

// Re-export client types
pub use clients::{ApiError, ApiResponse, ApiResult, ApigeeClient, HttpResponse, PlatformError};
