//! # Resource Errors
//!
//! This module defines the error type shared by every stage of the route compiler:
//! resource definition, action registration, endpoint compilation, instance URL
//! resolution and action invocation.
//!
//! All variants are local, synchronous failures. They carry the resource and
//! action names (and the offending key, route or method set where relevant) so a
//! dispatcher can render them into diagnostics without extra bookkeeping.

use crate::action::{HandlerError, MethodSet};

/// Errors raised while defining, compiling or using a resource type.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The same primary key was listed twice in the resource configuration.
    #[error("resource `{resource}`: primary key `{key}` is declared more than once")]
    DuplicatePrimaryKey { resource: String, key: String },

    /// A primary key is blank or contains path syntax (`/`, `<`, `>`).
    #[error("resource `{resource}`: invalid primary key `{key}`")]
    InvalidPrimaryKey { resource: String, key: String },

    /// The resource name is empty once separators are stripped.
    #[error("invalid resource name `{name}`: {reason}")]
    InvalidResourceName { name: String, reason: String },

    /// An action was declared with no HTTP methods, a blank method or a blank name.
    #[error("resource `{resource}`: invalid declaration for action `{action}`: {reason}")]
    InvalidActionDeclaration {
        resource: String,
        action: String,
        reason: String,
    },

    /// Two actions share a name on the same resource.
    #[error("resource `{resource}`: action `{action}` is registered more than once")]
    DuplicateActionName { resource: String, action: String },

    /// Two endpoints compile to the same route with overlapping methods.
    #[error(
        "resource `{resource}`: actions `{first}` and `{second}` both bind {methods} on `{route}`"
    )]
    RouteMethodConflict {
        resource: String,
        route: String,
        first: String,
        second: String,
        methods: MethodSet,
    },

    /// An instance URL was requested but a primary-key value is absent.
    #[error("resource `{resource}`: no value for primary key `{key}`")]
    MissingPrimaryKeyValue { resource: String, key: String },

    /// An action handler returned something other than a resource instance.
    #[error("resource `{resource}`: action `{action}` returned {returned} instead of a resource instance")]
    ActionContractViolation {
        resource: String,
        action: String,
        returned: &'static str,
    },

    /// The dispatcher asked for an action the resource does not expose.
    #[error("resource `{resource}`: unknown action `{action}`")]
    UnknownAction { resource: String, action: String },

    /// The action handler itself failed.
    #[error("resource `{resource}`: action `{action}` failed: {source}")]
    ActionFailed {
        resource: String,
        action: String,
        #[source]
        source: HandlerError,
    },

    /// A catalog already holds a resource with this name.
    #[error("resource `{resource}` is already registered")]
    DuplicateResource { resource: String },
}

impl ResourceError {
    /// Returns `true` for errors that make a resource definition unusable.
    ///
    /// These must be fixed by the resource author; everything else is raised
    /// per request and may be handled by the caller.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            ResourceError::DuplicatePrimaryKey { .. }
                | ResourceError::InvalidPrimaryKey { .. }
                | ResourceError::InvalidResourceName { .. }
                | ResourceError::InvalidActionDeclaration { .. }
                | ResourceError::DuplicateActionName { .. }
                | ResourceError::RouteMethodConflict { .. }
                | ResourceError::DuplicateResource { .. }
        )
    }

    /// The name of the resource the error was raised for.
    pub fn resource(&self) -> &str {
        match self {
            ResourceError::DuplicatePrimaryKey { resource, .. }
            | ResourceError::InvalidPrimaryKey { resource, .. }
            | ResourceError::InvalidActionDeclaration { resource, .. }
            | ResourceError::DuplicateActionName { resource, .. }
            | ResourceError::RouteMethodConflict { resource, .. }
            | ResourceError::MissingPrimaryKeyValue { resource, .. }
            | ResourceError::ActionContractViolation { resource, .. }
            | ResourceError::UnknownAction { resource, .. }
            | ResourceError::ActionFailed { resource, .. }
            | ResourceError::DuplicateResource { resource } => resource,
            ResourceError::InvalidResourceName { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_errors_are_fatal() {
        let err = ResourceError::DuplicatePrimaryKey {
            resource: "user".into(),
            key: "id".into(),
        };
        assert!(err.is_definition_error());
        assert_eq!(err.resource(), "user");

        let err = ResourceError::MissingPrimaryKeyValue {
            resource: "user".into(),
            key: "id".into(),
        };
        assert!(!err.is_definition_error());
        assert_eq!(err.to_string(), "resource `user`: no value for primary key `id`");
    }

    #[test]
    fn test_action_failed_keeps_source() {
        use std::error::Error;

        let err = ResourceError::ActionFailed {
            resource: "product".into(),
            action: "reserve".into(),
            source: "insufficient stock".into(),
        };
        assert_eq!(err.source().unwrap().to_string(), "insufficient stock");
        assert!(err.to_string().ends_with("failed: insufficient stock"));
    }
}
