//! # Endpoint Compiler
//!
//! Turns a [`ResourceDescriptor`] and an [`ActionRegistry`] into a [`RouteTable`]:
//! for every action, one [`Endpoint`] per declared route.
//!
//! A route is `canonical_join(base_url, fragment)` when the action declares a
//! fragment, otherwise the base URL itself. Two endpoints may share a route only
//! if their method sets are disjoint; placeholder names are ignored for that check
//! (`/user/<id>` and `/user/<uid>` are the same route to a dispatcher).
//!
//! The table is the whole contract with the dispatcher. It is a pure function of
//! its inputs, so tests can verify routing without a server:
//!
//! ```rust
//! use resource_routes::{compile, Action, ActionRegistry, HandlerError, RequestContainer,
//!     ResourceDescriptor, ResourceInstance};
//!
//! async fn show(_: RequestContainer) -> Result<ResourceInstance, HandlerError> {
//!     Ok(ResourceInstance::new())
//! }
//!
//! let descriptor = ResourceDescriptor::new("/api", "user", ["id"]).unwrap();
//! let mut registry = ActionRegistry::new("user");
//! registry.register(Action::new("show", ["GET"], show)).unwrap();
//! registry.register(Action::new("avatar", ["GET"], show).route("avatar")).unwrap();
//!
//! let table = compile(&descriptor, &registry).unwrap();
//! assert_eq!(table.endpoints("show")[0].route, "/api/user/<id>");
//! assert_eq!(table.endpoints("avatar")[0].route, "/api/user/<id>/avatar");
//! ```

use crate::action::MethodSet;
use crate::descriptor::ResourceDescriptor;
use crate::error::ResourceError;
use crate::path::{canonical_join, pieces, placeholder_name};
use crate::registry::ActionRegistry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A compiled `(route, methods)` pair for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub route: String,
    pub methods: MethodSet,
    pub action_name: String,
}

/// All endpoints of one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRoutes {
    pub action: String,
    pub endpoints: Vec<Endpoint>,
}

/// The compiled route table of a resource, in action declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub resource: String,
    pub actions: Vec<ActionRoutes>,
}

impl RouteTable {
    /// Endpoints of `action`; empty if the action is unknown.
    pub fn endpoints(&self, action: &str) -> &[Endpoint] {
        self.actions
            .iter()
            .find(|a| a.action == action)
            .map(|a| a.endpoints.as_slice())
            .unwrap_or(&[])
    }

    /// Every endpoint, flattened in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.actions.iter().flat_map(|a| a.endpoints.iter())
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.action.as_str())
    }
}

/// The route an action fragment compiles to.
pub fn action_route(base_url: &str, fragment: Option<&str>) -> String {
    match fragment {
        Some(fragment) => canonical_join([base_url, fragment]),
        None => canonical_join([base_url]),
    }
}

/// Route with placeholder names erased, used for conflict detection.
fn route_shape(route: &str) -> Vec<&str> {
    pieces(route)
        .map(|piece| match placeholder_name(piece) {
            Some(_) => "<>",
            None => piece,
        })
        .collect()
}

/// First placeholder name that occurs more than once in `route`.
fn repeated_placeholder(route: &str) -> Option<&str> {
    let mut names = Vec::new();
    for name in pieces(route).filter_map(placeholder_name) {
        if names.contains(&name) {
            return Some(name);
        }
        names.push(name);
    }
    None
}

/// Compiles the route table for a resource.
///
/// # Errors
///
/// - [`ResourceError::InvalidActionDeclaration`] if a route names the same
///   placeholder twice (e.g. a `<id>` fragment under a `<id>` base URL).
/// - [`ResourceError::RouteMethodConflict`] if two endpoints share a route shape
///   and at least one method.
pub fn compile(
    descriptor: &ResourceDescriptor,
    registry: &ActionRegistry,
) -> Result<RouteTable, ResourceError> {
    let resource = descriptor.resource_name();
    let mut actions = Vec::with_capacity(registry.len());

    for action in registry.iter() {
        let endpoints: Vec<Endpoint> = action
            .routes()
            .iter()
            .map(|r| Endpoint {
                route: action_route(descriptor.base_url(), r.fragment.as_deref()),
                methods: r.methods.clone(),
                action_name: action.name().to_string(),
            })
            .collect();
        for endpoint in &endpoints {
            if let Some(name) = repeated_placeholder(&endpoint.route) {
                return Err(ResourceError::InvalidActionDeclaration {
                    resource: resource.to_string(),
                    action: action.name().to_string(),
                    reason: format!(
                        "placeholder `<{name}>` appears more than once in route `{}`",
                        endpoint.route
                    ),
                });
            }
        }
        actions.push(ActionRoutes {
            action: action.name().to_string(),
            endpoints,
        });
    }

    let mut seen: Vec<(Vec<&str>, &Endpoint)> = Vec::new();
    for endpoint in actions.iter().flat_map(|a: &ActionRoutes| a.endpoints.iter()) {
        let shape = route_shape(&endpoint.route);
        if let Some((_, earlier)) = seen
            .iter()
            .find(|(s, e)| *s == shape && e.methods.overlaps(&endpoint.methods))
        {
            return Err(ResourceError::RouteMethodConflict {
                resource: resource.to_string(),
                route: endpoint.route.clone(),
                first: earlier.action_name.clone(),
                second: endpoint.action_name.clone(),
                methods: earlier.methods.intersection(&endpoint.methods),
            });
        }
        debug!(resource, action = %endpoint.action_name, route = %endpoint.route, methods = %endpoint.methods, "Endpoint compiled");
        seen.push((shape, endpoint));
    }

    Ok(RouteTable {
        resource: resource.to_string(),
        actions,
    })
}
