//! # Resource Instances & URL Resolution
//!
//! A [`ResourceInstance`] is what an action hands back: a property map plus an
//! optional route extension. Its URL is derived on demand by [`resolve`], which
//! substitutes every `<pk>` placeholder of the base URL with the string form of
//! the matching property and then appends the extension, if any.
//!
//! Values are not URL-encoded here; that belongs to the transport boundary.
//!
//! ```rust
//! use resource_routes::{resolve, ResourceDescriptor, ResourceInstance};
//!
//! let descriptor = ResourceDescriptor::new("", "resource", ["id"]).unwrap();
//! let instance = ResourceInstance::new().with_property("id", 1);
//! assert_eq!(resolve(&descriptor, &instance.properties, None).unwrap(), "/resource/1");
//! assert_eq!(
//!     resolve(&descriptor, &instance.properties, Some("extension/2")).unwrap(),
//!     "/resource/1/extension/2"
//! );
//! ```

use crate::descriptor::ResourceDescriptor;
use crate::error::ResourceError;
use crate::path::{canonical_join, pieces, placeholder_name};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Property map of an instance.
pub type Properties = Map<String, Value>;

/// A resource instance returned by an action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceInstance {
    pub properties: Properties,
    /// Path suffix that replaces the default template tail when deriving the URL.
    pub route_extension: Option<String>,
}

impl ResourceInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(properties: Properties) -> Self {
        Self {
            properties,
            route_extension: None,
        }
    }

    /// Builds an instance from anything that serializes to a map.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            Value::Object(properties) => Ok(Self::from_properties(properties)),
            other => Err(serde::ser::Error::custom(format!(
                "resource properties must serialize to a map, got {other}"
            ))),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_route_extension(mut self, extension: impl Into<String>) -> Self {
        self.route_extension = Some(extension.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Derives this instance's URL from the resource's descriptor.
    pub fn url(&self, descriptor: &ResourceDescriptor) -> Result<String, ResourceError> {
        resolve(descriptor, &self.properties, self.route_extension.as_deref())
    }
}

/// String form of a property used in URLs.
///
/// Strings are used verbatim; `null` and `""` count as missing.
fn url_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Computes the concrete URL of an instance.
///
/// A primary key has a usable value when its property is present, not `null`
/// and not the empty string. Strings are substituted verbatim; other JSON values
/// use their JSON text (`1`, `true`).
///
/// # Errors
///
/// [`ResourceError::MissingPrimaryKeyValue`] for the first primary key (in declared
/// order) with no usable value in `properties`: absent, `null` or `""`.
pub fn resolve(
    descriptor: &ResourceDescriptor,
    properties: &Properties,
    route_extension: Option<&str>,
) -> Result<String, ResourceError> {
    let mut values = Vec::with_capacity(descriptor.primary_keys().len());
    for key in descriptor.primary_keys() {
        let value = properties.get(key).and_then(url_value).ok_or_else(|| {
            ResourceError::MissingPrimaryKeyValue {
                resource: descriptor.resource_name().to_string(),
                key: key.clone(),
            }
        })?;
        values.push((key.as_str(), value));
    }

    let mut url = String::with_capacity(descriptor.base_url().len());
    for piece in pieces(descriptor.base_url()) {
        url.push('/');
        let substituted = placeholder_name(piece)
            .and_then(|name| values.iter().find(|(key, _)| *key == name))
            .map(|(_, value)| value.as_str());
        url.push_str(substituted.unwrap_or(piece));
    }
    if url.is_empty() {
        url.push('/');
    }

    Ok(match route_extension {
        Some(extension) => canonical_join([url.as_str(), extension]),
        None => url,
    })
}

/// The outward view of an instance: its URL (when derivable) and properties.
///
/// Serializes as one flat map with `url` first. When a URL was derived it takes
/// the `url` key, and a property of the same name is left out.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceView {
    pub url: Option<String>,
    pub properties: Properties,
}

impl Serialize for InstanceView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        if let Some(url) = &self.url {
            map.serialize_entry("url", url)?;
        }
        for (name, value) in &self.properties {
            if name != "url" || self.url.is_none() {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}
