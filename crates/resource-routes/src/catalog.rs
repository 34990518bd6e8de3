//! # Resource Catalog
//!
//! Holds every resource type of an application so a dispatcher can bind them in
//! one pass. Each Rust type is compiled once; registering it again returns the
//! existing [`ResourceType`].

use crate::compiler::RouteTable;
use crate::error::ResourceError;
use crate::resource::{Resource, ResourceType, RouteBinder};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A registry of resource types, in registration order.
#[derive(Debug, Default)]
pub struct ResourceCatalog {
    resources: Vec<Arc<ResourceType>>,
    by_name: HashMap<String, usize>,
    by_type: HashMap<TypeId, usize>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and registers `R`, or returns it if already registered.
    ///
    /// `ctx` is only used the first time a type is registered.
    ///
    /// # Errors
    ///
    /// Any definition error raised by [`ResourceType::of`], or
    /// [`ResourceError::DuplicateResource`] if another type already uses the name.
    pub fn register<R: Resource>(
        &mut self,
        ctx: &R::Context,
    ) -> Result<Arc<ResourceType>, ResourceError> {
        if let Some(&i) = self.by_type.get(&TypeId::of::<R>()) {
            return Ok(Arc::clone(&self.resources[i]));
        }
        let resource = ResourceType::of::<R>(ctx)?;
        let index = self.insert(Arc::clone(&resource))?;
        self.by_type.insert(TypeId::of::<R>(), index);
        Ok(resource)
    }

    /// Registers an already-built resource type.
    pub fn insert(&mut self, resource: Arc<ResourceType>) -> Result<usize, ResourceError> {
        if self.by_name.contains_key(resource.name()) {
            return Err(ResourceError::DuplicateResource {
                resource: resource.name().to_string(),
            });
        }
        let index = self.resources.len();
        self.by_name.insert(resource.name().to_string(), index);
        info!(resource = resource.name(), total = index + 1, "Resource registered");
        self.resources.push(resource);
        Ok(index)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ResourceType>> {
        self.by_name.get(name).map(|&i| &self.resources[i])
    }

    pub fn get_type<R: Resource>(&self) -> Option<&Arc<ResourceType>> {
        self.by_type.get(&TypeId::of::<R>()).map(|&i| &self.resources[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ResourceType>> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Route tables of every resource, in registration order.
    pub fn route_tables(&self) -> Vec<&RouteTable> {
        self.resources.iter().map(|r| r.routes()).collect()
    }

    /// Binds every endpoint of every resource.
    pub fn bind_all<B: RouteBinder>(&self, binder: &mut B) -> Result<(), B::Error> {
        for resource in &self.resources {
            resource.bind_to(binder)?;
        }
        Ok(())
    }
}
