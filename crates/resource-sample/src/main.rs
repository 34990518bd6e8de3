//! Runs the sample: prints the compiled route tables, then drives a short
//! user -> product -> order workflow through the dispatcher.

use resource_routes::tracing::setup_tracing;
use resource_sample::lifecycle::ResourceSystem;
use resource_sample::model::{OrderPlace, ProductSave, Reserve, UserSave};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    info!("Starting resource sample");

    let system = ResourceSystem::new()?;
    for table in system.catalog.route_tables() {
        println!("{}", serde_json::to_string_pretty(table)?);
    }

    let client = &system.client;
    let user = UserSave {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    };
    let reply = client
        .put("/users/1", &user)
        .instrument(tracing::info_span!("user_creation"))
        .await?;
    info!(url = ?reply.body.url, "User saved");

    let product = ProductSave {
        name: "Widget".to_string(),
        price: 25.0,
        quantity: 10,
    };
    let reply = client.put("/api/products/7", &product).await?;
    info!(url = ?reply.body.url, "Product saved");

    let reply = client
        .post("/api/products/7/reserve", &Reserve { quantity: 2 })
        .await?;
    info!(url = ?reply.body.url, "Stock reserved");

    let span = tracing::info_span!("order_processing");
    let order = OrderPlace {
        product_id: 7,
        quantity: 3,
    };
    match client.put("/shop/orders/1/100", &order).instrument(span).await {
        Ok(reply) => println!("{}", serde_json::to_string_pretty(&reply)?),
        Err(e) => error!(status = e.status(), error = %e, "Order failed"),
    }

    let reply = client.get("/shop/orders/1/100/receipt").await?;
    info!(url = ?reply.body.url, "Receipt");

    if let Err(e) = client.get("/nowhere").await {
        info!(status = e.status(), error = %e, "Expected miss");
    }

    system.shutdown().await?;
    info!("Sample completed");
    Ok(())
}
