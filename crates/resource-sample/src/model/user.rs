//! The `User` resource: `/users/<id>`.

use super::error::{id_param, SampleError};
use crate::store::Store;
use resource_routes::{
    Action, ActionRegistry, HandlerError, RequestContainer, Resource, ResourceConfig,
    ResourceError, ResourceInstance,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Users keyed by id.
pub type UserStore = Store<u64, User>;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Request body of `PUT /users/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSave {
    pub name: String,
    pub email: String,
}

impl Resource for User {
    type Context = UserStore;

    fn config() -> ResourceConfig {
        ResourceConfig::new().name("users").primary_key("id")
    }

    fn actions(registry: &mut ActionRegistry, users: &UserStore) -> Result<(), ResourceError> {
        let store = users.clone();
        registry.register(Action::new("show", ["GET", "HEAD"], move |req: RequestContainer| {
            show(store.clone(), req)
        }))?;

        let store = users.clone();
        registry.register(Action::new("save", ["PUT"], move |req: RequestContainer| {
            save(store.clone(), req)
        }))?;

        let store = users.clone();
        registry.register(Action::new("delete", ["DELETE"], move |req: RequestContainer| {
            delete(store.clone(), req)
        }))?;
        Ok(())
    }
}

async fn show(users: UserStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let id = id_param(&req, "id")?;
    let user = users
        .get(&id)
        .await
        .ok_or_else(|| SampleError::not_found("user", id))?;
    Ok(ResourceInstance::from_serialize(&user)?)
}

async fn save(users: UserStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let id = id_param(&req, "id")?;
    let body: UserSave = req.json().map_err(SampleError::from)?;
    let user = User {
        id,
        name: body.name,
        email: body.email,
    };
    let replaced = users.put(id, user.clone()).await.is_some();
    debug!(id, replaced, "User saved");
    Ok(ResourceInstance::from_serialize(&user)?)
}

async fn delete(users: UserStore, req: RequestContainer) -> Result<ResourceInstance, HandlerError> {
    let id = id_param(&req, "id")?;
    let user = users
        .remove(&id)
        .await
        .ok_or_else(|| SampleError::not_found("user", id))?;
    Ok(ResourceInstance::from_serialize(&user)?)
}
