//! HTTP request types for the Apigee admin SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder. Requests
//! carry a fully-qualified URL; use
//! [`HttpClient::request_builder`](crate::clients::HttpClient::request_builder)
//! to resolve a [`ResourcePath`](crate::clients::ResourcePath) against the
//! organization endpoint.

use std::collections::HashMap;
use std::fmt;

use reqwest::Url;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the management API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and triggering actions.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method may carry a body.
    #[must_use]
    pub const fn allows_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A request payload.
#[derive(Clone, PartialEq)]
pub enum RequestBody {
    /// A JSON document sent as `application/json`.
    Json(serde_json::Value),
    /// A bundle archive uploaded as the `file` part of a multipart form.
    Archive {
        /// File name reported in the multipart part.
        file_name: String,
        /// Raw archive bytes.
        content: Vec<u8>,
    },
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Archive { file_name, content } => f
                .debug_struct("Archive")
                .field("file_name", file_name)
                .field("len", &content.len())
                .finish(),
        }
    }
}

/// An HTTP request to be sent to the management API.
///
/// # Example
///
/// ```rust
/// use apigee_admin::clients::{HttpMethod, HttpRequest};
///
/// let url = "https://api.enterprise.apigee.com/v1/organizations/acme/developers"
///     .parse()
///     .unwrap();
/// let request = HttpRequest::builder(HttpMethod::Get, url).build().unwrap();
/// assert!(request.body.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The fully-qualified URL, without query string.
    pub url: Url,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: Url) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Returns the value of a query parameter, if present.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::BodyNotAllowed`] if a GET or DELETE
    /// request carries a body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && !self.method.allows_body() {
            return Err(InvalidHttpRequestError::BodyNotAllowed {
                method: self.method.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    url: Url,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    extra_headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
            extra_headers: HashMap::new(),
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json(self, value: serde_json::Value) -> Self {
        self.body(RequestBody::Json(value))
    }

    /// Appends a query parameter. Values are percent-encoded when sent.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            url: self.url,
            query: self.query,
            body: self.body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
