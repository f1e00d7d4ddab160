//! Decoded response wrapper.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use crate::clients::errors::ApiError;
use crate::clients::http_response::HttpResponse;

/// Result type returned by every management operation.
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// A decoded value together with the response it came from.
///
/// Dereferences to the decoded value, so fields can be read directly.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use apigee_admin::clients::ApiResponse;
///
/// let response = ApiResponse::new(vec!["ann@example.com".to_string()], 200, HashMap::new());
/// assert_eq!(response.len(), 1);
/// assert_eq!(response.status(), 200);
/// ```
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    data: T,
    status: u16,
    headers: HashMap<String, Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Creates a new response wrapper.
    #[must_use]
    pub const fn new(data: T, status: u16, headers: HashMap<String, Vec<String>>) -> Self {
        Self {
            data,
            status,
            headers,
        }
    }

    /// Wraps `data`, taking status and headers from `response`.
    #[must_use]
    pub fn from_http(data: T, response: HttpResponse) -> Self {
        Self::new(data, response.status, response.headers)
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns all response headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Consumes the wrapper and returns the decoded value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the decoded value, keeping status and headers.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            status: self.status,
            headers: self.headers,
        }
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ApiResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
