//! # System Lifecycle
//!
//! [`ResourceSystem`] wires the sample together:
//!
//! 1. **Stores** - create the shared in-memory stores
//! 2. **Resources** - register `User`, `Product` and `Order` in a
//!    [`ResourceCatalog`], injecting the stores as each resource's context
//! 3. **Binding** - feed every compiled endpoint into a [`RouteSet`]
//! 4. **Dispatch** - spawn the [`Dispatcher`] and keep its client
//!
//! ```rust,ignore
//! let system = ResourceSystem::new()?;
//! let reply = system.client.get("/users/1").await?;
//! system.shutdown().await?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! Dropping the last [`DispatchClient`] closes the channel; the dispatcher loop
//! ends and [`ResourceSystem::shutdown`] awaits its task.

use crate::dispatch::{DispatchClient, DispatchError, Dispatcher, RouteSet};
use crate::model::{Order, OrderContext, Product, ProductStore, User, UserStore};
use resource_routes::ResourceCatalog;
use tokio::task::JoinHandle;
use tracing::info;

/// Request channel capacity of the dispatcher.
const DISPATCH_BUFFER: usize = 32;

/// The running sample application.
pub struct ResourceSystem {
    pub client: DispatchClient,
    pub catalog: ResourceCatalog,
    pub users: UserStore,
    pub products: ProductStore,
    pub order_context: OrderContext,
    handle: JoinHandle<()>,
}

impl ResourceSystem {
    /// Builds every resource, binds their routes and starts the dispatcher.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Result<Self, DispatchError> {
        let users = UserStore::new();
        let products = ProductStore::new();
        let order_context = OrderContext {
            orders: Default::default(),
            products: products.clone(),
        };

        let mut catalog = ResourceCatalog::new();
        catalog.register::<User>(&users)?;
        catalog.register::<Product>(&products)?;
        catalog.register::<Order>(&order_context)?;

        let mut routes = RouteSet::new();
        catalog.bind_all(&mut routes)?;
        info!(resources = catalog.len(), routes = routes.len(), "Routes bound");

        let (dispatcher, client) = Dispatcher::new(DISPATCH_BUFFER, routes);
        let handle = tokio::spawn(dispatcher.run());

        Ok(Self {
            client,
            catalog,
            users,
            products,
            order_context,
            handle,
        })
    }

    /// Drops the client and waits for the dispatcher to stop.
    ///
    /// # Errors
    ///
    /// [`DispatchError::DispatcherTask`] if the dispatcher task panicked.
    pub async fn shutdown(self) -> Result<(), DispatchError> {
        drop(self.client);
        self.handle.await?;
        info!("System shutdown complete");
        Ok(())
    }
}
