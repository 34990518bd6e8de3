use resource_sample::lifecycle::ResourceSystem;
use resource_sample::model::{OrderPlace, ProductSave, Reserve, UserSave};
use serde_json::json;

fn alice() -> UserSave {
    UserSave {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

fn widget(quantity: u32) -> ProductSave {
    ProductSave {
        name: "Widget".to_string(),
        price: 25.5,
        quantity,
    }
}

/// Full end-to-end test through the dispatcher with all sample resources.
#[tokio::test]
async fn test_full_order_workflow() {
    let system = ResourceSystem::new().expect("Failed to start system");
    let client = system.client.clone();

    // Create a user and read it back
    let saved = client.put("/users/1", &alice()).await.expect("Failed to save user");
    assert_eq!(saved.status, 200);
    assert_eq!(saved.resource, "users");
    assert_eq!(saved.action, "save");
    assert_eq!(saved.body.url.as_deref(), Some("/users/1"));

    let fetched = client.get("/users/1").await.expect("Failed to get user");
    assert_eq!(fetched.action, "show");
    assert_eq!(
        serde_json::to_value(&fetched.body).unwrap(),
        json!({"url": "/users/1", "id": 1, "name": "Alice", "email": "alice@example.com"})
    );

    // Create a product and reserve stock
    client
        .put("/api/products/7", &widget(100))
        .await
        .expect("Failed to save product");
    let reserved = client
        .post("/api/products/7/reserve", &Reserve { quantity: 5 })
        .await
        .expect("Failed to reserve");
    assert_eq!(reserved.body.url.as_deref(), Some("/api/products/7/reservations/1"));
    assert_eq!(reserved.body.properties["quantity"], json!(95));
    assert_eq!(reserved.body.properties["reserved"], json!(5));

    // Place an order (reserves more stock through the product store)
    let order = OrderPlace {
        product_id: 7,
        quantity: 4,
    };
    let placed = client
        .put("/shop/orders/1/100", &order)
        .await
        .expect("Failed to place order");
    assert_eq!(placed.body.url.as_deref(), Some("/shop/orders/1/100"));
    assert_eq!(placed.body.properties["total"], json!(102.0));

    let product = system.products.get(&7).await.expect("Product missing");
    assert_eq!(product.quantity, 91);

    // The same action reachable on two routes
    let summary = client.get("/shop/orders/1/100/summary").await.unwrap();
    assert_eq!(summary.action, "show");
    assert_eq!(summary.body.url.as_deref(), Some("/shop/orders/1/100"));

    // Route extension wins for the instance URL
    let receipt = client.get("/shop/orders/1/100/receipt").await.unwrap();
    assert_eq!(receipt.body.url.as_deref(), Some("/shop/orders/1/100/receipt"));

    // Delete the user
    let deleted = client.delete("/users/1").await.unwrap();
    assert_eq!(deleted.body.properties["name"], json!("Alice"));
    assert!(system.users.is_empty().await);

    drop(client);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_dry_run_reservation_keeps_stock() {
    let system = ResourceSystem::new().unwrap();
    system.client.put("/api/products/1", &widget(3)).await.unwrap();

    let reply = system
        .client
        .post("/api/products/1/reserve?dry_run=true", &Reserve { quantity: 3 })
        .await
        .unwrap();
    assert_eq!(reply.body.url.as_deref(), Some("/api/products/1"));
    assert_eq!(system.products.get(&1).await.unwrap().quantity, 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_error_statuses() {
    let system = ResourceSystem::new().unwrap();
    let client = system.client.clone();

    let err = client.get("/nowhere").await.unwrap_err();
    assert_eq!(err.status(), 404);

    let err = client.send("POST", "/users/1", Vec::new()).await.unwrap_err();
    assert_eq!(err.status(), 405);
    assert!(err.to_string().contains("allowed: DELETE|GET|HEAD|PUT"));

    let err = client.get("/users/1").await.unwrap_err();
    assert_eq!(err.status(), 400);
    assert!(err.to_string().contains("user not found: 1"));

    let err = client.get("/users/abc").await.unwrap_err();
    assert_eq!(err.status(), 400);

    client.put("/api/products/2", &widget(1)).await.unwrap();
    let order = OrderPlace {
        product_id: 2,
        quantity: 5,
    };
    let err = client.put("/shop/orders/1/1", &order).await.unwrap_err();
    assert!(err.to_string().contains("insufficient stock: requested 5, available 1"));
    assert!(system.order_context.orders.is_empty().await);

    drop(client);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_route_tables_are_exposed() {
    let system = ResourceSystem::new().unwrap();
    let routes: Vec<String> = system
        .catalog
        .iter()
        .flat_map(|r| r.routes().iter().map(|e| format!("{} {}", e.methods, e.route)).collect::<Vec<_>>())
        .collect();
    assert_eq!(
        routes,
        [
            "GET|HEAD /users/<id>",
            "PUT /users/<id>",
            "DELETE /users/<id>",
            "GET /api/products/<id>",
            "PUT /api/products/<id>",
            "POST /api/products/<id>/reserve",
            "GET /shop/orders/<user_id>/<order_id>",
            "GET /shop/orders/<user_id>/<order_id>/summary",
            "PUT /shop/orders/<user_id>/<order_id>",
            "GET /shop/orders/<user_id>/<order_id>/receipt",
        ]
    );
    system.shutdown().await.unwrap();
}
