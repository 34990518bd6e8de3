//! # Resource Types
//!
//! The [`Resource`] trait is how a Rust type declares itself as an HTTP resource:
//! its [`ResourceConfig`] and the actions it exposes. [`ResourceType::of`] turns a
//! declaration into the immutable bundle the rest of the system shares: descriptor,
//! action registry and compiled route table, built exactly once.
//!
//! ```rust
//! use resource_routes::{Action, ActionRegistry, HandlerError, RequestContainer, Resource,
//!     ResourceConfig, ResourceError, ResourceInstance, ResourceType};
//!
//! struct OrderItem;
//!
//! impl Resource for OrderItem {
//!     type Context = ();
//!
//!     fn config() -> ResourceConfig {
//!         ResourceConfig::new().namespace("/shop").primary_key("id")
//!     }
//!
//!     fn actions(registry: &mut ActionRegistry, _ctx: &()) -> Result<(), ResourceError> {
//!         registry.register(Action::new("show", ["GET"], |req: RequestContainer| async move {
//!             let id = req.url_param("id").unwrap_or_default().to_string();
//!             Ok::<_, HandlerError>(ResourceInstance::new().with_property("id", id))
//!         }))?;
//!         Ok(())
//!     }
//! }
//!
//! let order_item = ResourceType::of::<OrderItem>(&()).unwrap();
//! assert_eq!(order_item.base_url(), "/shop/order_item/<id>");
//! ```
//!
//! ## The Dispatcher Boundary
//!
//! A dispatcher implements [`RouteBinder`] and receives every compiled endpoint
//! through [`ResourceType::bind_to`]. When a request matches, it builds a
//! [`RequestContainer`] and calls [`ResourceType::invoke`]; the returned instance
//! is rendered with [`ResourceType::present`].

use crate::action::ActionOutput;
use crate::compiler::{compile, Endpoint, RouteTable};
use crate::descriptor::{default_resource_name, ResourceConfig, ResourceDescriptor};
use crate::error::ResourceError;
use crate::instance::{InstanceView, ResourceInstance};
use crate::registry::ActionRegistry;
use crate::request::RequestContainer;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};

/// A type that can be exposed as an HTTP resource.
///
/// # Context
///
/// Handlers usually need dependencies (a store, a client). `Context` is handed to
/// [`Resource::actions`] when the type is built, so handlers can capture clones of
/// it. Use `()` if no dependencies are needed.
///
/// # Provided Methods
///
/// [`Resource::config`] defaults to an empty namespace, a name derived from the
/// type (`OrderItem` -> `order_item`) and no primary keys.
pub trait Resource: Send + Sync + 'static {
    /// Dependencies injected into action handlers.
    type Context;

    /// Namespace, name override and primary keys.
    fn config() -> ResourceConfig {
        ResourceConfig::default()
    }

    /// Registers the actions this resource exposes.
    fn actions(registry: &mut ActionRegistry, ctx: &Self::Context) -> Result<(), ResourceError>;
}

/// Receives compiled endpoints; implemented by dispatchers.
pub trait RouteBinder {
    type Error;

    fn bind(&mut self, resource: &Arc<ResourceType>, endpoint: &Endpoint)
        -> Result<(), Self::Error>;
}

/// The compiled, immutable form of a resource type.
#[derive(Debug)]
pub struct ResourceType {
    descriptor: ResourceDescriptor,
    registry: ActionRegistry,
    routes: RouteTable,
}

impl ResourceType {
    /// Builds the resource type declared by `R`, wiring `ctx` into its handlers.
    pub fn of<R: Resource>(ctx: &R::Context) -> Result<Arc<Self>, ResourceError> {
        let config = R::config();
        let descriptor = ResourceDescriptor::from_config(&config, &default_resource_name::<R>())?;
        let mut registry = ActionRegistry::new(descriptor.resource_name());
        R::actions(&mut registry, ctx)?;
        Self::build(descriptor, registry)
    }

    /// Compiles an explicit descriptor and registry.
    pub fn build(
        descriptor: ResourceDescriptor,
        registry: ActionRegistry,
    ) -> Result<Arc<Self>, ResourceError> {
        let routes = compile(&descriptor, &registry)?;
        info!(
            resource = descriptor.resource_name(),
            base_url = descriptor.base_url(),
            actions = registry.len(),
            "Resource type defined"
        );
        Ok(Arc::new(Self {
            descriptor,
            registry,
            routes,
        }))
    }

    pub fn name(&self) -> &str {
        self.descriptor.resource_name()
    }

    pub fn base_url(&self) -> &str {
        self.descriptor.base_url()
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The compiled route table handed to dispatchers.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Feeds every endpoint, in declaration order, to `binder`.
    pub fn bind_to<B: RouteBinder>(self: &Arc<Self>, binder: &mut B) -> Result<(), B::Error> {
        for endpoint in self.routes.iter() {
            binder.bind(self, endpoint)?;
        }
        Ok(())
    }

    /// Runs an action and enforces the handler contract.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnknownAction`] if no action has this name.
    /// - [`ResourceError::ActionFailed`] if the handler fails.
    /// - [`ResourceError::ActionContractViolation`] if it returns anything but an instance.
    pub async fn invoke(
        &self,
        action: &str,
        request: RequestContainer,
    ) -> Result<ResourceInstance, ResourceError> {
        let resource = self.name();
        let declared = self
            .registry
            .get(action)
            .ok_or_else(|| ResourceError::UnknownAction {
                resource: resource.to_string(),
                action: action.to_string(),
            })?;

        let span = tracing::debug_span!("invoke", resource, action);
        let output = async {
            debug!(?request, "Calling handler");
            declared.handler().call(request).await
        }
        .instrument(span)
        .await;

        match output {
            Ok(ActionOutput::Instance(instance)) => Ok(instance),
            Ok(other) => {
                warn!(resource, action, returned = other.kind(), "Handler broke its contract");
                Err(ResourceError::ActionContractViolation {
                    resource: resource.to_string(),
                    action: action.to_string(),
                    returned: other.kind(),
                })
            }
            Err(source) => {
                warn!(resource, action, error = %source, "Handler failed");
                Err(ResourceError::ActionFailed {
                    resource: resource.to_string(),
                    action: action.to_string(),
                    source,
                })
            }
        }
    }

    /// The URL of an instance of this resource.
    pub fn url_for(&self, instance: &ResourceInstance) -> Result<String, ResourceError> {
        instance.url(&self.descriptor)
    }

    /// The outward view of an instance. A missing primary key drops the URL
    /// instead of failing.
    pub fn present(&self, instance: ResourceInstance) -> InstanceView {
        let url = match self.url_for(&instance) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(resource = self.name(), error = %e, "Instance URL omitted");
                None
            }
        };
        InstanceView {
            url,
            properties: instance.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, HandlerError};
    use serde_json::json;

    struct OrderItem;

    impl Resource for OrderItem {
        type Context = ();

        fn config() -> ResourceConfig {
            ResourceConfig::new().namespace("/api/").primary_key("id")
        }

        fn actions(registry: &mut ActionRegistry, _ctx: &()) -> Result<(), ResourceError> {
            registry
                .register(Action::new("show", ["GET"], |req: RequestContainer| async move {
                    let id: u64 = req.url_param("id").unwrap_or("0").parse()?;
                    Ok::<_, HandlerError>(ResourceInstance::new().with_property("id", id))
                }))?
                .register(
                    Action::new("history", ["GET"], |req: RequestContainer| async move {
                        let id = req.url_param("id").unwrap_or_default().to_string();
                        Ok::<_, HandlerError>(
                            ResourceInstance::new()
                                .with_property("id", id)
                                .with_route_extension("history/2"),
                        )
                    })
                    .route("history"),
                )?
                .register(Action::new("count", ["GET"], |_req: RequestContainer| async {
                    Ok::<_, HandlerError>(json!(3))
                }).route("count"))?;
            Ok(())
        }
    }

    #[test]
    fn test_default_name_and_routes() {
        let order_item = ResourceType::of::<OrderItem>(&()).unwrap();
        assert_eq!(order_item.name(), "order_item");
        assert_eq!(order_item.base_url(), "/api/order_item/<id>");
        assert_eq!(
            order_item.routes().endpoints("history")[0].route,
            "/api/order_item/<id>/history"
        );
        let names: Vec<&str> = order_item.routes().action_names().collect();
        assert_eq!(names, ["show", "history", "count"]);
    }

    #[tokio::test]
    async fn test_invoke_and_present() {
        let order_item = ResourceType::of::<OrderItem>(&()).unwrap();
        let request = RequestContainer::new().with_url_param("id", "5");
        let instance = order_item.invoke("show", request).await.unwrap();
        let view = order_item.present(instance);
        assert_eq!(view.url.as_deref(), Some("/api/order_item/5"));
    }

    #[tokio::test]
    async fn test_extension_wins_for_instance_url() {
        let order_item = ResourceType::of::<OrderItem>(&()).unwrap();
        let request = RequestContainer::new().with_url_param("id", "5");
        let instance = order_item.invoke("history", request).await.unwrap();
        assert_eq!(
            order_item.url_for(&instance).unwrap(),
            "/api/order_item/5/history/2"
        );
    }

    #[tokio::test]
    async fn test_invoke_errors() {
        let order_item = ResourceType::of::<OrderItem>(&()).unwrap();

        let err = order_item
            .invoke("missing", RequestContainer::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResourceError::UnknownAction { .. }));

        let err = order_item
            .invoke("count", RequestContainer::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::ActionContractViolation { returned: "a plain value", .. }
        ));

        let bad = RequestContainer::new().with_url_param("id", "abc");
        let err = order_item.invoke("show", bad).await.unwrap_err();
        assert!(matches!(err, ResourceError::ActionFailed { .. }));
        assert!(!err.is_definition_error());
    }

    #[test]
    fn test_present_omits_url_without_primary_key() {
        let order_item = ResourceType::of::<OrderItem>(&()).unwrap();
        let view = order_item.present(ResourceInstance::new().with_property("name", "x"));
        assert_eq!(view.url, None);
        assert_eq!(view.properties.get("name"), Some(&json!("x")));
    }

    #[test]
    fn test_bind_to_feeds_every_endpoint() {
        struct Collect(Vec<String>);

        impl RouteBinder for Collect {
            type Error = std::convert::Infallible;

            fn bind(
                &mut self,
                resource: &Arc<ResourceType>,
                endpoint: &Endpoint,
            ) -> Result<(), Self::Error> {
                self.0.push(format!("{} {} {}", resource.name(), endpoint.methods, endpoint.route));
                Ok(())
            }
        }

        let order_item = ResourceType::of::<OrderItem>(&()).unwrap();
        let mut binder = Collect(Vec::new());
        order_item.bind_to(&mut binder).unwrap();
        assert_eq!(
            binder.0,
            [
                "order_item GET /api/order_item/<id>",
                "order_item GET /api/order_item/<id>/history",
                "order_item GET /api/order_item/<id>/count",
            ]
        );
    }
}
