//! Error types for management API calls.
//!
//! Every operation in this crate fails with [`ApiError`]. The variants
//! separate problems detected before anything is sent from problems the
//! transport or the platform reported:
//!
//! - [`ApiError::Validation`]: caller input rejected before sending
//! - [`ApiError::Construction`]: the request could not be assembled
//! - [`ApiError::Transport`]: connection, TLS, or timeout failure
//! - [`ApiError::Platform`]: non-2xx reply from the platform
//! - [`ApiError::Conflict`]: HTTP 409 from the platform
//! - [`ApiError::Decode`]: 2xx reply whose body did not match the expected shape
//!
//! Platform, conflict, and decode errors keep the raw [`HttpResponse`] so
//! callers can inspect status, headers, and body.
//!
//! # Example
//!
//! ```rust,ignore
//! use apigee_admin::clients::ApiError;
//!
//! match client.developers().get("ann@example.com").await {
//!     Ok(developer) => println!("{}", developer.email),
//!     Err(ApiError::Platform(e)) if e.status == 404 => println!("no such developer"),
//!     Err(ApiError::Conflict(e)) => println!("conflict: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::http_response::HttpResponse;

/// Error returned when a request cannot be assembled.
///
/// Raised before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A GET or DELETE request carried a body.
    #[error("Cannot send a body with a {method} request")]
    BodyNotAllowed {
        /// The HTTP method that was used.
        method: String,
    },

    /// A path segment is empty or contains characters that would escape the path.
    #[error("Invalid path segment '{segment}' in '{path}'")]
    InvalidPathSegment {
        /// The offending segment.
        segment: String,
        /// The path as composed so far.
        path: String,
    },

    /// The composed URL did not parse.
    #[error("Invalid request URL '{url}'")]
    InvalidUrl {
        /// The URL text that failed to parse.
        url: String,
    },

    /// The payload could not be serialized.
    #[error("Failed to serialize request body: {message}")]
    Serialization {
        /// The serializer's error message.
        message: String,
    },
}

/// A non-2xx reply from the management API.
///
/// `code` and `message` are extracted from the platform's error body when it
/// has the expected shape. A body that does not parse leaves both `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformError {
    /// The HTTP status code.
    pub status: u16,
    /// The platform's error code (e.g. `keymanagement.service.DeveloperDoesNotExist`).
    pub code: Option<String>,
    /// The platform's human-readable message.
    pub message: Option<String>,
    /// The raw response.
    pub response: HttpResponse,
}

impl PlatformError {
    /// Builds a platform error from a raw response.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        let (code, message) = match serde_json::from_slice::<ErrorBody>(&response.body) {
            Ok(body) => body.into_parts(),
            Err(e) => {
                tracing::debug!(
                    status = response.status,
                    error = %e,
                    "Error body did not match the platform error shape"
                );
                (None, None)
            }
        };

        Self {
            status: response.status,
            code,
            message,
            response,
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Platform returned status {}", self.status)?;
        if let Some(code) = &self.code {
            write!(f, " ({code})")?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PlatformError {}

/// The two error body shapes the platform produces.
///
/// Management calls reply with `{"code", "message", "contexts"}`; faults
/// raised by the gateway in front of them use `{"fault": {...}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Fault {
        fault: Fault,
    },
    Management {
        code: Option<String>,
        message: Option<String>,
    },
}

#[derive(Deserialize)]
struct Fault {
    faultstring: Option<String>,
    detail: Option<FaultDetail>,
}

#[derive(Deserialize)]
struct FaultDetail {
    errorcode: Option<String>,
}

impl ErrorBody {
    fn into_parts(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Management { code, message } => (code, message),
            Self::Fault { fault } => (
                fault.detail.and_then(|d| d.errorcode),
                fault.faultstring,
            ),
        }
    }
}

/// Unified error type for management API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input was rejected before any request was sent.
    #[error("Invalid input: {message}")]
    Validation {
        /// Description of the rejected input.
        message: String,
    },

    /// The request could not be assembled.
    #[error(transparent)]
    Construction(#[from] InvalidHttpRequestError),

    /// The request could not be delivered or the reply could not be read.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform answered with a non-2xx status other than 409.
    #[error(transparent)]
    Platform(PlatformError),

    /// The platform answered 409, e.g. a revision is already deployed.
    #[error("Conflict: {0}")]
    Conflict(PlatformError),

    /// A 2xx reply whose body did not match the expected shape.
    #[error("Failed to decode response (status {}): {message}", .response.status)]
    Decode {
        /// The decoder's error message.
        message: String,
        /// The raw response.
        response: HttpResponse,
    },
}

impl ApiError {
    /// Creates an [`ApiError::Validation`] error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classifies a non-2xx response.
    #[must_use]
    pub fn from_response(response: HttpResponse) -> Self {
        let error = PlatformError::from_response(response);
        if error.status == 409 {
            Self::Conflict(error)
        } else {
            Self::Platform(error)
        }
    }

    /// Returns the raw response, if the error carries one.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Platform(e) | Self::Conflict(e) => Some(&e.response),
            Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// Returns `true` for [`ApiError::Conflict`].
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Returns `true` if the platform answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Platform(e) if e.status == 404)
    }
}

/// Rejects an empty or whitespace-only identifier.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
