//! The `Order` resource: `/shop/orders/<user_id>/<order_id>`.
//!
//! Orders depend on products: placing one reserves stock, so the resource
//! context carries both stores.

use super::error::{id_param, SampleError};
use super::product::{reserve_stock, ProductStore};
use crate::store::Store;
use resource_routes::{
    Action, ActionRegistry, HandlerError, RequestContainer, Resource, ResourceConfig,
    ResourceError, ResourceInstance,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Orders keyed by `(user_id, order_id)`.
pub type OrderStore = Store<(u64, u64), Order>;

/// An order placed by a user for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub user_id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub total: f64,
}

/// Request body of `PUT /shop/orders/<user_id>/<order_id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlace {
    pub product_id: u64,
    pub quantity: u32,
}

/// Dependencies of the order handlers.
#[derive(Debug, Clone, Default)]
pub struct OrderContext {
    pub orders: OrderStore,
    pub products: ProductStore,
}

impl Resource for Order {
    type Context = OrderContext;

    fn config() -> ResourceConfig {
        ResourceConfig::new()
            .namespace("shop")
            .name("orders")
            .primary_keys(["user_id", "order_id"])
    }

    fn actions(registry: &mut ActionRegistry, ctx: &OrderContext) -> Result<(), ResourceError> {
        let orders = ctx.orders.clone();
        registry.register(
            Action::new("show", ["GET"], move |req: RequestContainer| {
                show(orders.clone(), req)
            })
            .also_route(Some("summary"), ["GET"]),
        )?;

        let deps = ctx.clone();
        registry.register(Action::new("place", ["PUT"], move |req: RequestContainer| {
            place(deps.clone(), req)
        }))?;

        let orders = ctx.orders.clone();
        registry.register(
            Action::new("receipt", ["GET"], move |req: RequestContainer| {
                receipt(orders.clone(), req)
            })
            .route("receipt"),
        )?;
        Ok(())
    }
}

fn order_key(req: &RequestContainer) -> Result<(u64, u64), SampleError> {
    Ok((id_param(req, "user_id")?, id_param(req, "order_id")?))
}

async fn load(orders: &OrderStore, req: &RequestContainer) -> Result<Order, SampleError> {
    let key = order_key(req)?;
    orders
        .get(&key)
        .await
        .ok_or_else(|| SampleError::not_found("order", format!("{}/{}", key.0, key.1)))
}

async fn show(orders: OrderStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let order = load(&orders, &req).await?;
    Ok(ResourceInstance::from_serialize(&order)?)
}

async fn place(ctx: OrderContext, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let (user_id, order_id) = order_key(&req)?;
    let body: OrderPlace = req.json().map_err(SampleError::from)?;

    let product = reserve_stock(&ctx.products, body.product_id, body.quantity).await?;
    let order = Order {
        user_id,
        order_id,
        product_id: body.product_id,
        quantity: body.quantity,
        total: product.price * f64::from(body.quantity),
    };
    ctx.orders.put((user_id, order_id), order.clone()).await;
    info!(user_id, order_id, product_id = body.product_id, total = order.total, "Order placed");
    Ok(ResourceInstance::from_serialize(&order)?)
}

async fn receipt(orders: OrderStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let order = load(&orders, &req).await?;
    Ok(ResourceInstance::from_serialize(&order)?.with_route_extension("receipt"))
}
