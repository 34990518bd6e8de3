use resource_routes::{
    Action, ActionRegistry, HandlerError, RequestContainer, Resource, ResourceCatalog,
    ResourceConfig, ResourceError, ResourceInstance,
};
use resource_sample::dispatch::{DispatchError, Dispatcher, RouteSet};
use serde_json::json;

async fn echo(req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let mut instance = ResourceInstance::new();
    for (name, value) in &req.url_params {
        instance = instance.with_property(name.clone(), value.clone());
    }
    for (name, values) in &req.query_params {
        instance = instance.with_property(name.clone(), json!(values));
    }
    Ok(instance)
}

async fn no_instance(_: RequestContainer) -> Result<(), HandlerError> {
    Ok(())
}

struct Widget;
struct Gadget;

impl Resource for Widget {
    type Context = ();

    fn config() -> ResourceConfig {
        ResourceConfig::new().namespace("/v1").primary_key("id")
    }

    fn actions(registry: &mut ActionRegistry, _ctx: &()) -> Result<(), ResourceError> {
        registry
            .register(Action::new("show", ["GET"], echo))?
            .register(Action::new("special", ["GET"], echo).route("special"))?
            .register(Action::new("broken", ["POST"], no_instance))?;
        Ok(())
    }
}

/// Same route shape as `Widget` under a different name.
impl Resource for Gadget {
    type Context = ();

    fn config() -> ResourceConfig {
        ResourceConfig::new().namespace("/v1").name("widget").primary_key("gid")
    }

    fn actions(registry: &mut ActionRegistry, _ctx: &()) -> Result<(), ResourceError> {
        registry.register(Action::new("show", ["GET"], echo))?;
        Ok(())
    }
}

#[tokio::test]
async fn test_dispatch_builds_request_container() {
    let mut catalog = ResourceCatalog::new();
    catalog.register::<Widget>(&()).unwrap();
    let mut routes = RouteSet::new();
    catalog.bind_all(&mut routes).unwrap();

    let (dispatcher, client) = Dispatcher::new(4, routes);
    let handle = tokio::spawn(dispatcher.run());

    let reply = client.get("/v1/widget/9?tag=a&tag=b").await.unwrap();
    assert_eq!(reply.body.url.as_deref(), Some("/v1/widget/9"));
    assert_eq!(reply.body.properties["tag"], json!(["a", "b"]));

    // Fragment routes resolve to their own action
    let reply = client.get("/v1/widget/9/special").await.unwrap();
    assert_eq!(reply.action, "special");

    let err = client.send("post", "/v1/widget/9", Vec::new()).await.unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Resource(ResourceError::ActionContractViolation { .. })
    ));
    assert_eq!(err.status(), 500);

    drop(client);
    handle.await.unwrap();
}

#[test]
fn test_cross_resource_conflict_is_rejected() {
    let mut first = ResourceCatalog::new();
    first.register::<Widget>(&()).unwrap();
    let mut second = ResourceCatalog::new();
    second.register::<Gadget>(&()).unwrap();

    let mut routes = RouteSet::new();
    first.bind_all(&mut routes).unwrap();
    let err = second.bind_all(&mut routes).unwrap_err();
    match err {
        DispatchError::RouteConflict { route, first, second, .. } => {
            assert_eq!(route, "/v1/widget/<gid>");
            assert_eq!(first, "widget.show");
            assert_eq!(second, "widget.show");
        }
        other => panic!("unexpected error: {other}"),
    }
}
