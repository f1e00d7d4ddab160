//! Transport layer for the Apigee management API.
//!
//! This module turns a (method, relative path, optional payload) triple into
//! a completed, decoded remote call. Every resource service and the
//! deployable asset engine are built on it.
//!
//! # Overview
//!
//! - [`ApigeeClient`]: entry point, service accessors and untyped helpers
//! - [`HttpClient`]: path resolution, credential attachment, send and decode
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a raw reply, kept for diagnostics
//! - [`ResourcePath`]: ordered path segments below the organization endpoint
//! - [`ApiResponse`]: a decoded value with the status and headers it came with
//! - [`ApiError`]: the error taxonomy of every operation
//!
//! # Example
//!
//! ```rust,ignore
//! use apigee_admin::clients::{collections, HttpMethod, ResourcePath};
//!
//! let http = client.http_client();
//! let path = ResourcePath::new(collections::ENVIRONMENTS);
//! let request = http.new_request::<()>(HttpMethod::Get, &path, None)?;
//! let environments: Vec<String> = http.execute(request).await?.into_inner();
//! ```
//!
//! # Retry Behavior
//!
//! None. Transport failures surface immediately as [`ApiError::Transport`];
//! platform POST semantics are not uniformly idempotent.

mod client;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod path;
mod response;

pub(crate) use client::ACTION_PARAM;
pub(crate) use errors::require;

pub use client::ApigeeClient;
pub use errors::{ApiError, InvalidHttpRequestError, PlatformError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use http_response::HttpResponse;
pub use path::{collections, ResourcePath};
pub use response::{ApiResponse, ApiResult};
