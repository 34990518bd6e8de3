//! # Action Registry
//!
//! Collects the actions a resource type exposes. Actions are looked up by name;
//! iteration follows declaration order so compiled route tables are stable.

use crate::action::Action;
use crate::error::ResourceError;
use std::collections::HashMap;
use tracing::debug;

/// The set of actions declared for one resource type.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    resource: String,
    actions: Vec<Action>,
    index: HashMap<String, usize>,
}

impl ActionRegistry {
    /// Creates an empty registry. `resource` is only used in diagnostics.
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            actions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registers an action.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidActionDeclaration`] for a blank name or an empty/blank method set.
    /// - [`ResourceError::DuplicateActionName`] if the name is already taken.
    pub fn register(&mut self, action: Action) -> Result<&mut Self, ResourceError> {
        if let Err(reason) = action.validate() {
            return Err(ResourceError::InvalidActionDeclaration {
                resource: self.resource.clone(),
                action: action.name().to_string(),
                reason,
            });
        }
        if self.index.contains_key(action.name()) {
            return Err(ResourceError::DuplicateActionName {
                resource: self.resource.clone(),
                action: action.name().to_string(),
            });
        }
        debug!(
            resource = %self.resource,
            action = action.name(),
            methods = %action.http_methods(),
            "Action registered"
        );
        self.index.insert(action.name().to_string(), self.actions.len());
        self.actions.push(action);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.index.get(name).map(|&i| &self.actions[i])
    }

    /// Actions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}
