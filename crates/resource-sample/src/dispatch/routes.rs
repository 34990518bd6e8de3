//! The dispatcher's routing table, filled through [`RouteBinder`].

use super::error::DispatchError;
use super::pattern::RoutePattern;
use resource_routes::{Endpoint, MethodSet, ResourceType, RouteBinder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// One bound endpoint.
#[derive(Debug, Clone)]
pub struct BoundRoute {
    pub pattern: RoutePattern,
    pub methods: MethodSet,
    pub resource: Arc<ResourceType>,
    pub action: String,
}

/// All endpoints bound into a dispatcher, across resources.
#[derive(Debug, Default)]
pub struct RouteSet {
    routes: Vec<BoundRoute>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundRoute> {
        self.routes.iter()
    }

    /// Finds the route for a request, preferring the most literal match.
    pub fn resolve(
        &self,
        method: &str,
        path: &str,
    ) -> Result<(&BoundRoute, BTreeMap<String, String>), DispatchError> {
        let mut candidates: Vec<(&BoundRoute, BTreeMap<String, String>)> = self
            .routes
            .iter()
            .filter_map(|route| route.pattern.matches(path).map(|params| (route, params)))
            .collect();
        if candidates.is_empty() {
            return Err(DispatchError::NotFound(path.to_string()));
        }
        candidates.sort_by_key(|(route, _)| std::cmp::Reverse(route.pattern.specificity()));

        let allowed: MethodSet = candidates
            .iter()
            .flat_map(|(route, _)| route.methods.iter())
            .collect();
        candidates
            .into_iter()
            .find(|(route, _)| route.methods.contains(method))
            .ok_or_else(|| DispatchError::MethodNotAllowed {
                path: path.to_string(),
                method: method.to_string(),
                allowed,
            })
    }
}

impl RouteBinder for RouteSet {
    type Error = DispatchError;

    fn bind(&mut self, resource: &Arc<ResourceType>, endpoint: &Endpoint) -> Result<(), DispatchError> {
        let pattern = RoutePattern::parse(&endpoint.route);
        if let Some(existing) = self
            .routes
            .iter()
            .find(|r| r.pattern.same_shape(&pattern) && r.methods.overlaps(&endpoint.methods))
        {
            return Err(DispatchError::RouteConflict {
                route: endpoint.route.clone(),
                methods: existing.methods.intersection(&endpoint.methods),
                first: format!("{}.{}", existing.resource.name(), existing.action),
                second: format!("{}.{}", resource.name(), endpoint.action_name),
            });
        }
        debug!(
            resource = resource.name(),
            action = %endpoint.action_name,
            route = %endpoint.route,
            methods = %endpoint.methods,
            "Route bound"
        );
        self.routes.push(BoundRoute {
            pattern,
            methods: endpoint.methods.clone(),
            resource: Arc::clone(resource),
            action: endpoint.action_name.clone(),
        });
        Ok(())
    }
}
