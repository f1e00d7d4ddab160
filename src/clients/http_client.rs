//! HTTP client for management API communication.
//!
//! This module provides the [`HttpClient`] type, which resolves
//! [`ResourcePath`]s against the organization endpoint, attaches
//! credentials, sends requests, and classifies replies.

use std::collections::HashMap;

use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::{ApiError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::path::{collections, ResourcePath};
use crate::clients::response::{ApiResponse, ApiResult};
use crate::config::{ApigeeConfig, Authenticator, OrgName};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the management API of one organization.
///
/// The client handles:
/// - Path resolution against `{api_root}organizations/{org}/`
/// - Default headers including User-Agent and Accept
/// - Credential attachment through the configured [`Authenticator`]
/// - Classification of non-2xx replies into [`ApiError`]
///
/// There is no retry; each call sends exactly one request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use apigee_admin::{ApigeeConfig, OrgName};
/// use apigee_admin::clients::{HttpClient, ResourcePath};
///
/// let config = ApigeeConfig::builder()
///     .organization(OrgName::new("acme").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config).unwrap();
///
/// let url = client.url_for(&ResourcePath::new("developers")).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://api.enterprise.apigee.com/v1/organizations/acme/developers"
/// );
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The organization every path is scoped to.
    organization: OrgName,
    /// API root, ending with `/`.
    api_root: Url,
    /// Organization endpoint, ending with `/`.
    base_endpoint: Url,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Credential hook applied to every request.
    authenticator: Option<std::sync::Arc<dyn Authenticator>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] if the organization endpoint does
    /// not form a valid URL, or [`ApiError::Transport`] if the underlying
    /// reqwest client cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &ApigeeConfig) -> Result<Self, ApiError> {
        let api_root = config.api_root().url().clone();
        let base_text = format!(
            "{}{}/{}/",
            api_root,
            collections::ORGANIZATIONS,
            config.organization()
        );
        let base_endpoint = Url::parse(&base_text)
            .map_err(|_| InvalidHttpRequestError::InvalidUrl { url: base_text })?;

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Apigee Admin Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            organization: config.organization().clone(),
            api_root,
            base_endpoint,
            default_headers,
            authenticator: config.shared_authenticator(),
        })
    }

    /// Returns the organization this client is scoped to.
    #[must_use]
    pub const fn organization(&self) -> &OrgName {
        &self.organization
    }

    /// Returns the organization endpoint (`{api_root}organizations/{org}/`).
    #[must_use]
    pub const fn base_endpoint(&self) -> &Url {
        &self.base_endpoint
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a path against the organization endpoint.
    ///
    /// The root path resolves to the endpoint without its trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] if the path has an invalid segment
    /// or the combined URL does not parse.
    pub fn url_for(&self, path: &ResourcePath) -> Result<Url, ApiError> {
        Self::resolve(&self.base_endpoint, path)
    }

    /// Resolves a path against the API root instead of the organization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] under the same conditions as
    /// [`HttpClient::url_for`].
    pub fn url_for_root(&self, path: &ResourcePath) -> Result<Url, ApiError> {
        Self::resolve(&self.api_root, path)
    }

    fn resolve(base: &Url, path: &ResourcePath) -> Result<Url, ApiError> {
        let rendered = path.render()?;
        let text = if rendered.is_empty() {
            base.as_str().trim_end_matches('/').to_string()
        } else {
            format!("{base}{rendered}")
        };
        let url =
            Url::parse(&text).map_err(|_| InvalidHttpRequestError::InvalidUrl { url: text })?;
        Ok(url)
    }

    /// Starts a request to a path under the organization endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] if the path does not resolve.
    pub fn request_builder(
        &self,
        method: HttpMethod,
        path: &ResourcePath,
    ) -> Result<HttpRequestBuilder, ApiError> {
        Ok(HttpRequest::builder(method, self.url_for(path)?))
    }

    /// Builds a request, serializing `payload` as its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Construction`] if the path does not resolve, the
    /// payload does not serialize, or a body is given for GET or DELETE.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &ResourcePath,
        payload: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let mut builder = self.request_builder(method, path)?;
        if let Some(payload) = payload {
            let value = serde_json::to_value(payload).map_err(|e| {
                InvalidHttpRequestError::Serialization {
                    message: e.to_string(),
                }
            })?;
            builder = builder.json(value);
        }
        Ok(builder.build()?)
    }

    /// Sends a request and returns the raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - Request validation fails (`Construction`)
    /// - The request cannot be delivered (`Transport`)
    /// - The reply is not 2xx (`Platform` or `Conflict`)
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        request.verify()?;

        let HttpRequest {
            method,
            url,
            query,
            body,
            extra_headers,
        } = request;

        let mut req_builder = self.client.request(method.into(), url.clone());

        let mut headers = self.default_headers.clone();
        headers.extend(extra_headers);
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if !query.is_empty() {
            req_builder = req_builder.query(&query);
        }

        match body {
            Some(RequestBody::Json(value)) => {
                req_builder = req_builder.json(&value);
            }
            Some(RequestBody::Archive { file_name, content }) => {
                let part = Part::bytes(content)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")?;
                req_builder = req_builder.multipart(Form::new().part("file", part));
            }
            None => {}
        }

        if let Some(authenticator) = &self.authenticator {
            req_builder = authenticator.authenticate(req_builder);
        }

        tracing::debug!(%method, %url, "Sending management API request");

        let res = req_builder.send().await?;

        let status = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();
        let response = HttpResponse::new(status, res_headers, body);

        if response.is_ok() {
            tracing::debug!(%method, %url, status, "Management API request succeeded");
            return Ok(response);
        }

        tracing::warn!(%method, %url, status, "Management API request failed");
        Err(ApiError::from_response(response))
    }

    /// Sends a request and decodes the JSON reply into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the 2xx body does not decode into `T`,
    /// plus everything [`HttpClient::send`] returns.
    pub async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<T> {
        let response = self.send(request).await?;
        match serde_json::from_slice::<T>(&response.body) {
            Ok(data) => Ok(ApiResponse::from_http(data, response)),
            Err(e) => Err(ApiError::Decode {
                message: e.to_string(),
                response,
            }),
        }
    }

    /// Sends a request whose reply body is not needed.
    ///
    /// # Errors
    ///
    /// Returns everything [`HttpClient::send`] returns.
    pub async fn execute_empty(&self, request: HttpRequest) -> ApiResult<()> {
        let response = self.send(request).await?;
        Ok(ApiResponse::from_http((), response))
    }

    /// Sends a request expecting a binary archive in reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if a 2xx reply is declared as JSON
    /// instead of an archive, plus everything [`HttpClient::send`] returns.
    pub async fn execute_archive(&self, request: HttpRequest) -> ApiResult<Vec<u8>> {
        let mut response = self.send(request).await?;
        if response.is_json() {
            return Err(ApiError::Decode {
                message: "expected a bundle archive but received JSON".to_string(),
                response,
            });
        }
        let body = std::mem::take(&mut response.body);
        Ok(ApiResponse::from_http(body, response))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiRoot;
    use serde_json::json;

    fn create_test_client(root: &str) -> HttpClient {
        let config = ApigeeConfig::builder()
            .organization(OrgName::new("acme").unwrap())
            .api_root(ApiRoot::new(root).unwrap())
            .user_agent_prefix("ci-pipeline")
            .build()
            .unwrap();
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_endpoint_includes_organization() {
        let client = create_test_client("https://mgmt.example.com/v1");
        assert_eq!(
            client.base_endpoint().as_str(),
            "https://mgmt.example.com/v1/organizations/acme/"
        );
        assert_eq!(client.organization().as_ref(), "acme");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = create_test_client("https://mgmt.example.com/v1");
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("ci-pipeline | Apigee Admin Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_url_for_nested_path() {
        let client = create_test_client("https://mgmt.example.com/v1/");
        let path = ResourcePath::new(collections::ENVIRONMENTS)
            .push("test")
            .push(collections::TARGET_SERVERS)
            .push("backend-1");
        assert_eq!(
            client.url_for(&path).unwrap().as_str(),
            "https://mgmt.example.com/v1/organizations/acme/environments/test/targetservers/backend-1"
        );
    }

    #[test]
    fn test_url_for_root_path_is_organization() {
        let client = create_test_client("https://mgmt.example.com/v1");
        assert_eq!(
            client.url_for(&ResourcePath::root()).unwrap().as_str(),
            "https://mgmt.example.com/v1/organizations/acme"
        );
    }

    #[test]
    fn test_url_for_root_resolves_against_api_root() {
        let client = create_test_client("https://mgmt.example.com/v1");
        let path = ResourcePath::new(collections::ORGANIZATIONS).push("other");
        assert_eq!(
            client.url_for_root(&path).unwrap().as_str(),
            "https://mgmt.example.com/v1/organizations/other"
        );
    }

    #[test]
    fn test_url_for_rejects_bad_segment() {
        let client = create_test_client("https://mgmt.example.com/v1");
        let path = ResourcePath::new(collections::DEVELOPERS).push("");
        assert!(matches!(
            client.url_for(&path),
            Err(ApiError::Construction(
                InvalidHttpRequestError::InvalidPathSegment { .. }
            ))
        ));
    }

    #[test]
    fn test_new_request_serializes_payload() {
        let client = create_test_client("https://mgmt.example.com/v1");
        let payload = json!({"name": "settings"});
        let request = client
            .new_request(
                HttpMethod::Post,
                &ResourcePath::new(collections::KEY_VALUE_MAPS),
                Some(&payload),
            )
            .unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(RequestBody::Json(payload)));
    }

    #[test]
    fn test_new_request_rejects_body_on_get() {
        let client = create_test_client("https://mgmt.example.com/v1");
        let result = client.new_request(
            HttpMethod::Get,
            &ResourcePath::new(collections::DEVELOPERS),
            Some(&json!({})),
        );
        assert!(matches!(
            result,
            Err(ApiError::Construction(InvalidHttpRequestError::BodyNotAllowed { .. }))
        ));
    }

    #[test]
    fn test_new_request_without_payload() {
        let client = create_test_client("https://mgmt.example.com/v1");
        let request = client
            .new_request::<()>(
                HttpMethod::Delete,
                &ResourcePath::new(collections::COMPANIES).push("acme-corp"),
                None,
            )
            .unwrap();
        assert!(request.body.is_none());
    }
}
