//! # Resource Descriptor
//!
//! A [`ResourceDescriptor`] is the immutable, per-resource-type metadata every
//! other stage reads from: the namespace prefix, the resource name and the ordered
//! primary keys. Its [`base_url`](ResourceDescriptor::base_url) is the canonical URL
//! template, e.g. `/api/order/<user_id>/<order_id>`.
//!
//! Descriptors are built from a [`ResourceConfig`], the only configuration surface
//! of a resource. The config derives `serde` traits so definitions can also be
//! loaded from a file.

use crate::error::ResourceError;
use crate::path::{canonical_join, placeholder};
use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Declarative configuration for a resource type.
///
/// Every field is optional: an empty namespace, a name derived from the Rust type
/// and no primary keys.
///
/// ```rust
/// use resource_routes::ResourceConfig;
///
/// let config = ResourceConfig::new()
///     .namespace("/api")
///     .name("orders")
///     .primary_keys(["user_id", "order_id"]);
/// assert_eq!(config.primary_keys, vec!["user_id", "order_id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub namespace: String,
    pub resource_name: Option<String>,
    pub primary_keys: Vec<String>,
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Overrides the name derived from the type.
    pub fn name(mut self, resource_name: impl Into<String>) -> Self {
        self.resource_name = Some(resource_name.into());
        self
    }

    pub fn primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_keys.push(key.into());
        self
    }

    pub fn primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys.extend(keys.into_iter().map(Into::into));
        self
    }
}

/// Immutable metadata for one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    namespace: String,
    resource_name: String,
    primary_keys: Vec<String>,
    base_url: String,
}

impl ResourceDescriptor {
    /// Builds a descriptor from explicit parts.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidResourceName`] if the name is empty after stripping separators.
    /// - [`ResourceError::InvalidPrimaryKey`] for a blank key or one containing `/`, `<` or `>`.
    /// - [`ResourceError::DuplicatePrimaryKey`] if a key is listed twice.
    pub fn new<I, S>(
        namespace: impl Into<String>,
        resource_name: impl Into<String>,
        primary_keys: I,
    ) -> Result<Self, ResourceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let namespace = namespace.into();
        let resource_name = resource_name.into();
        let primary_keys: Vec<String> = primary_keys.into_iter().map(Into::into).collect();

        if canonical_join([resource_name.as_str()]) == "/" {
            return Err(ResourceError::InvalidResourceName {
                name: resource_name,
                reason: "name is empty".into(),
            });
        }

        let mut seen = HashSet::new();
        for key in &primary_keys {
            if key.trim().is_empty() || key.contains(['/', '<', '>']) {
                return Err(ResourceError::InvalidPrimaryKey {
                    resource: resource_name,
                    key: key.clone(),
                });
            }
            if !seen.insert(key.as_str()) {
                return Err(ResourceError::DuplicatePrimaryKey {
                    resource: resource_name,
                    key: key.clone(),
                });
            }
        }

        let placeholders = primary_keys.iter().map(|key| placeholder(key));
        let base_url = canonical_join(
            [namespace.clone(), resource_name.clone()]
                .into_iter()
                .chain(placeholders),
        );
        debug!(resource = %resource_name, %base_url, "Descriptor built");

        Ok(Self {
            namespace,
            resource_name,
            primary_keys,
            base_url,
        })
    }

    /// Builds a descriptor from a config, using `default_name` when the config has no name.
    pub fn from_config(config: &ResourceConfig, default_name: &str) -> Result<Self, ResourceError> {
        let name = config
            .resource_name
            .clone()
            .unwrap_or_else(|| default_name.to_string());
        Self::new(config.namespace.clone(), name, config.primary_keys.iter().cloned())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Primary keys in declaration order.
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// The canonical URL template: namespace, name, then one placeholder per key.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Derives the default resource name for a Rust type.
///
/// Takes the last path segment of the type name (generic arguments dropped) and
/// converts it to lower snake case.
pub fn default_resource_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    let short = without_generics.rsplit("::").next().unwrap_or(without_generics);
    to_snake_case(short)
}

/// Converts `CamelCase` (including acronyms like `HTTPServer`) to `snake_case`.
pub fn to_snake_case(name: &str) -> String {
    name.to_snake_case()
}
