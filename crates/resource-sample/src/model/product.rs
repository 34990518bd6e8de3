//! The `Product` resource: `/api/products/<id>`, with a stock reservation action.
//!
//! `reserve` is implemented as a struct handler rather than a closure, and its
//! instances carry a route extension (`reservations/<n>`) so their URL points at
//! the reservation rather than the product.

use super::error::{id_param, SampleError};
use crate::store::Store;
use async_trait::async_trait;
use resource_routes::{
    Action, ActionHandler, ActionOutput, ActionRegistry, HandlerError, RequestContainer, Resource,
    ResourceConfig, ResourceError, ResourceInstance,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Products keyed by id.
pub type ProductStore = Store<u64, Product>;

/// A product with available stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Request body of `PUT /api/products/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSave {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Request body of `POST /api/products/<id>/reserve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reserve {
    pub quantity: u32,
}

impl Resource for Product {
    type Context = ProductStore;

    fn config() -> ResourceConfig {
        ResourceConfig::new()
            .namespace("/api")
            .name("products")
            .primary_key("id")
    }

    fn actions(registry: &mut ActionRegistry, products: &ProductStore) -> Result<(), ResourceError> {
        let store = products.clone();
        registry.register(Action::new("show", ["GET"], move |req: RequestContainer| {
            show(store.clone(), req)
        }))?;

        let store = products.clone();
        registry.register(Action::new("save", ["PUT"], move |req: RequestContainer| {
            save(store.clone(), req)
        }))?;

        registry.register(
            Action::new("reserve", ["POST"], ReserveStock::new(products.clone())).route("reserve"),
        )?;
        Ok(())
    }
}

async fn show(products: ProductStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let id = id_param(&req, "id")?;
    let product = products
        .get(&id)
        .await
        .ok_or_else(|| SampleError::not_found("product", id))?;
    Ok(ResourceInstance::from_serialize(&product)?)
}

async fn save(products: ProductStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let id = id_param(&req, "id")?;
    let body: ProductSave = req.json().map_err(SampleError::from)?;
    let product = Product {
        id,
        name: body.name,
        price: body.price,
        quantity: body.quantity,
    };
    products.put(id, product.clone()).await;
    Ok(ResourceInstance::from_serialize(&product)?)
}

/// Takes stock out of a product.
///
/// Public so other resources (orders) can reserve stock directly.
pub async fn reserve_stock(
    products: &ProductStore,
    id: u64,
    quantity: u32,
) -> Result<Product, SampleError> {
    products
        .update(&id, |product| {
            if product.quantity < quantity {
                return Err(SampleError::InsufficientStock {
                    requested: quantity,
                    available: product.quantity,
                });
            }
            product.quantity -= quantity;
            Ok(product.clone())
        })
        .await
        .ok_or_else(|| SampleError::not_found("product", id))?
}

/// Handler for `POST /api/products/<id>/reserve`.
///
/// `?dry_run=true` checks availability without taking stock.
#[derive(Debug, Clone)]
pub struct ReserveStock {
    products: ProductStore,
    next_reservation: Arc<AtomicU64>,
}

impl ReserveStock {
    pub fn new(products: ProductStore) -> Self {
        Self {
            products,
            next_reservation: Arc::new(AtomicU64::new(1)),
        }
    }
}

#[async_trait]
impl ActionHandler for ReserveStock {
    async fn call(&self, request: RequestContainer) -> Result<ActionOutput, HandlerError> {
        let id = id_param(&request, "id")?;
        let Reserve { quantity } = request.json().map_err(SampleError::from)?;
        let dry_run = request.query_param("dry_run") == Some("true");
        debug!(id, quantity, dry_run, "Reserve");

        if dry_run {
            let product = self
                .products
                .get(&id)
                .await
                .ok_or_else(|| SampleError::not_found("product", id))?;
            if product.quantity < quantity {
                return Err(SampleError::InsufficientStock {
                    requested: quantity,
                    available: product.quantity,
                }
                .into());
            }
            return Ok(ResourceInstance::from_serialize(&product)?.into());
        }

        let product = reserve_stock(&self.products, id, quantity).await?;
        let reservation = self.next_reservation.fetch_add(1, Ordering::SeqCst);
        info!(id, quantity, reservation, remaining = product.quantity, "Stock reserved");
        let instance = ResourceInstance::from_serialize(&product)?
            .with_property("reserved", quantity)
            .with_route_extension(format!("reservations/{reservation}"));
        Ok(instance.into())
    }
}
