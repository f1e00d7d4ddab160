//! Resource path composition.
//!
//! A [`ResourcePath`] is an ordered list of segments relative to the
//! organization endpoint (`{api_root}organizations/{org}/`). Segments are
//! joined with `/` as given; they are not percent-encoded individually, so
//! identifiers such as developer emails appear in the URL verbatim.
//!
//! # Example
//!
//! ```rust
//! use apigee_admin::clients::{collections, ResourcePath};
//!
//! let path = ResourcePath::new(collections::DEVELOPERS)
//!     .push("ann@example.com")
//!     .push(collections::APPS);
//! assert_eq!(path.render().unwrap(), "developers/ann@example.com/apps");
//! ```

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Collection names of the management API.
pub mod collections {
    /// Companies.
    pub const COMPANIES: &str = "companies";
    /// Developers.
    pub const DEVELOPERS: &str = "developers";
    /// Apps, under a company or developer.
    pub const APPS: &str = "apps";
    /// Credentials of an app, and entry keys of a key value map.
    pub const KEYS: &str = "keys";
    /// Suffix of the credential creation path.
    pub const CREATE: &str = "create";
    /// API products, under a credential.
    pub const API_PRODUCTS: &str = "apiproducts";
    /// Key value maps.
    pub const KEY_VALUE_MAPS: &str = "keyvaluemaps";
    /// Entries of a key value map.
    pub const ENTRIES: &str = "entries";
    /// Target servers, under an environment.
    pub const TARGET_SERVERS: &str = "targetservers";
    /// Virtual hosts, under an environment.
    pub const VIRTUAL_HOSTS: &str = "virtualhosts";
    /// Environments.
    pub const ENVIRONMENTS: &str = "environments";
    /// Organizations, relative to the API root.
    pub const ORGANIZATIONS: &str = "organizations";
    /// API proxies.
    pub const API_PROXIES: &str = "apis";
    /// Shared flows.
    pub const SHARED_FLOWS: &str = "sharedflows";
    /// Revisions of a deployable asset.
    pub const REVISIONS: &str = "revisions";
    /// Deployments of a deployable asset or revision.
    pub const DEPLOYMENTS: &str = "deployments";
}

/// A path relative to the organization endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Starts a path at the given collection.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            segments: vec![collection.into()],
        }
    }

    /// The empty path, addressing the organization endpoint itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Appends a segment.
    #[must_use]
    pub fn push(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Returns the raw segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Joins the segments with `/`.
    ///
    /// Leading and trailing `/` are trimmed from each segment. Every segment
    /// must then address exactly one path level.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidPathSegment`] if a segment is
    /// empty after trimming, is a dot segment (`.`, `..`, or a percent-encoded
    /// form of either), or contains `/`, `\`, `?`, or `#`.
    pub fn render(&self) -> Result<String, InvalidHttpRequestError> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for raw in &self.segments {
            let segment = raw.trim_matches('/');
            let invalid = segment.is_empty()
                || is_dot_segment(segment)
                || segment.contains(['/', '\\', '?', '#']);
            if invalid {
                return Err(InvalidHttpRequestError::InvalidPathSegment {
                    segment: raw.clone(),
                    path: parts.join("/"),
                });
            }
            parts.push(segment);
        }
        Ok(parts.join("/"))
    }
}

// URL parsers collapse `%2e` the same way as `.`.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_segments() {
        let path = ResourcePath::new(collections::COMPANIES)
            .push("acme-corp")
            .push(collections::APPS)
            .push("portal")
            .push(collections::KEYS)
            .push(collections::CREATE);

        assert_eq!(
            path.render().unwrap(),
            "companies/acme-corp/apps/portal/keys/create"
        );
    }

    #[test]
    fn test_render_trims_slashes() {
        let path = ResourcePath::new("/keyvaluemaps/").push("/settings");
        assert_eq!(path.render().unwrap(), "keyvaluemaps/settings");
    }

    #[test]
    fn test_render_keeps_emails_verbatim() {
        let path = ResourcePath::new(collections::DEVELOPERS).push("ann+ops@example.com");
        assert_eq!(path.render().unwrap(), "developers/ann+ops@example.com");
    }

    #[test]
    fn test_render_rejects_empty_segment() {
        let path = ResourcePath::new(collections::DEVELOPERS).push("").push(collections::APPS);
        match path.render() {
            Err(InvalidHttpRequestError::InvalidPathSegment { segment, path }) => {
                assert_eq!(segment, "");
                assert_eq!(path, "developers");
            }
            other => panic!("expected InvalidPathSegment, got {other:?}"),
        }
    }

    #[test]
    fn test_render_rejects_escaping_segments() {
        for bad in ["/", "..", ".", "a?b=1", "x#frag", "a//b", "%2e%2E", ".%2e", "a\\b"] {
            let path = ResourcePath::new(collections::APPS).push(bad);
            assert!(path.render().is_err(), "segment {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_render_rejects_interior_slash() {
        let path = ResourcePath::new(collections::API_PROXIES).push("a/b");
        match path.render() {
            Err(InvalidHttpRequestError::InvalidPathSegment { segment, path }) => {
                assert_eq!(segment, "a/b");
                assert_eq!(path, "apis");
            }
            other => panic!("expected InvalidPathSegment, got {other:?}"),
        }
    }

    #[test]
    fn test_render_rejects_embedded_dot_segments() {
        for bad in ["x/../y", "x/../../developers/bob", "orders/revisions/1", "./x"] {
            let path = ResourcePath::new(collections::API_PROXIES).push(bad);
            assert!(path.render().is_err(), "segment {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_render_allows_dots_inside_names() {
        let path = ResourcePath::new(collections::DEVELOPERS).push("ann.lee@example.com");
        assert_eq!(path.render().unwrap(), "developers/ann.lee@example.com");
    }

    #[test]
    fn test_root_path_renders_empty() {
        let path = ResourcePath::root();
        assert!(path.is_root());
        assert_eq!(path.render().unwrap(), "");
    }
}
