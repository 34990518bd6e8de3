//! # Resource Routes
//!
//! Declare a **resource** once (a named entity with identifying keys and a set of
//! actions) and derive everything a web layer needs to serve it:
//!
//! 1. a canonical URL template (`/api/order/<user_id>/<order_id>`),
//! 2. a per-action route table any request router can consume,
//! 3. concrete instance URLs once property values are known.
//!
//! Nothing here opens a socket. The same resource description produces the same
//! routing metadata whichever dispatcher ends up binding it.
//!
//! ## Architecture Overview
//!
//! The crate is layered leaf-first:
//!
//! 1. **Paths** ([`path`]) - canonical joining of URL segments
//! 2. **Descriptors** ([`ResourceDescriptor`]) - namespace, name, primary keys, base URL
//! 3. **Actions** ([`Action`], [`ActionRegistry`]) - named, method-tagged operations
//! 4. **Compilation** ([`compile`]) - descriptor + registry into a [`RouteTable`]
//! 5. **Resolution** ([`resolve`]) - primary-key substitution into instance URLs
//!
//! [`Resource`] and [`ResourceType`] tie the layers together: a type declares its
//! config and actions, and `ResourceType::of` builds the immutable bundle once.
//! [`ResourceCatalog`] collects many of them for a dispatcher.
//!
//! ## Example
//!
//! ```rust
//! use resource_routes::{Action, ActionRegistry, HandlerError, RequestContainer, Resource,
//!     ResourceCatalog, ResourceConfig, ResourceError, ResourceInstance};
//!
//! struct Product;
//!
//! impl Resource for Product {
//!     type Context = ();
//!
//!     fn config() -> ResourceConfig {
//!         ResourceConfig::new().namespace("/api").name("products").primary_key("id")
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
//! #[tokio::main]
//! async fn main() -> Result<(), ResourceError> {
//!     let mut catalog = ResourceCatalog::new();
//!     let products = catalog.register::<Product>(&())?;
//!
//!     assert_eq!(products.routes().endpoints("show")[0].route, "/api/products/<id>");
//!
//!     let request = RequestContainer::new().with_url_param("id", "42");
//!     let instance = products.invoke("show", request).await?;
//!     assert_eq!(products.url_for(&instance)?, "/api/products/42");
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! Descriptors, registries and route tables are built once and never mutated, so
//! an `Arc<ResourceType>` is shared across tasks without locks. Requests and
//! instances are request-local.

pub mod action;
pub mod catalog;
pub mod compiler;
pub mod descriptor;
pub mod error;
pub mod instance;
pub mod path;
pub mod registry;
pub mod request;
pub mod resource;
pub mod tracing;

// Re-export core types for convenience
pub use action::{Action, ActionHandler, ActionOutput, ActionRoute, HandlerError, MethodSet};
pub use catalog::ResourceCatalog;
pub use compiler::{compile, ActionRoutes, Endpoint, RouteTable};
pub use descriptor::{ResourceConfig, ResourceDescriptor};
pub use error::ResourceError;
pub use instance::{resolve, InstanceView, Properties, ResourceInstance};
pub use path::canonical_join;
pub use registry::ActionRegistry;
pub use request::RequestContainer;
pub use resource::{Resource, ResourceType, RouteBinder};
