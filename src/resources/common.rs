//! Types shared by several resource kinds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clients::{collections, require, ApiError, ResourcePath};

/// Builds `environments/{environment}/{collection}`.
pub(crate) fn environment_collection(
    environment: &str,
    collection: &str,
) -> Result<ResourcePath, ApiError> {
    require("environment", environment)?;
    Ok(ResourcePath::new(collections::ENVIRONMENTS)
        .push(environment)
        .push(collection))
}

/// A generic `{name, value}` metadata pair.
///
/// # Example
///
/// ```rust
/// use apigee_admin::resources::Attribute;
///
/// let attr = Attribute::new("tier", "gold");
/// assert_eq!(
///     serde_json::to_string(&attr).unwrap(),
///     r#"{"name":"tier","value":"gold"}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// The attribute value.
    #[serde(default)]
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Returns the value of the named attribute, if present.
#[must_use]
pub fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}

/// A list of attributes the platform wraps as `{"property": [...]}`.
///
/// Some payloads carry the bare list instead; both decode. Encoding always
/// produces the wrapped form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties(pub Vec<Attribute>);

impl Properties {
    /// Returns `true` if there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value of the named property, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        find_attribute(&self.0, name)
    }
}

#[derive(Serialize, Deserialize)]
struct WrappedProperties {
    #[serde(default)]
    property: Vec<Attribute>,
}

impl Serialize for Properties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WrappedProperties {
            property: self.0.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bare(Vec<Attribute>),
            Wrapped(WrappedProperties),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Bare(list) => Self(list),
            Raw::Wrapped(wrapped) => Self(wrapped.property),
        })
    }
}

/// Status actions accepted by app and credential endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Approve the app or credential.
    Approve,
    /// Revoke the app or credential.
    Revoke,
}

impl AppAction {
    /// Returns the `action` query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Revoke => "revoke",
        }
    }
}
