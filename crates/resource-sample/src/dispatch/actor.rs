//! # Dispatcher Actor
//!
//! The server half of the sample dispatcher. It owns the [`RouteSet`] and the
//! receiving end of the request channel, matching requests one at a time.
//! Matching is cheap and sequential; each matched action then runs in its own
//! task, so slow handlers never block routing.

use super::client::DispatchClient;
use super::error::DispatchError;
use super::pattern::parse_query;
use super::routes::RouteSet;
use resource_routes::{InstanceView, RequestContainer};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Type alias for the one-shot response channel used by the dispatcher.
pub type Response = oneshot::Sender<Result<Reply, DispatchError>>;

/// A request sent to the dispatcher.
#[derive(Debug)]
pub struct Dispatch {
    pub method: String,
    /// Path with an optional `?query`.
    pub target: String,
    pub body: Vec<u8>,
    pub respond_to: Response,
}

/// A served request.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub status: u16,
    pub resource: String,
    pub action: String,
    pub body: InstanceView,
}

/// Routes requests to resource actions.
pub struct Dispatcher {
    receiver: mpsc::Receiver<Dispatch>,
    routes: RouteSet,
}

impl Dispatcher {
    /// Creates the dispatcher and its client.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize, routes: RouteSet) -> (Self, DispatchClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let dispatcher = Self { receiver, routes };
        (dispatcher, DispatchClient::new(sender))
    }

    /// Runs the dispatch loop until every client is dropped.
    pub async fn run(mut self) {
        info!(routes = self.routes.len(), "Dispatcher started");
        let mut served = 0usize;

        while let Some(msg) = self.receiver.recv().await {
            let Dispatch {
                method,
                target,
                body,
                respond_to,
            } = msg;
            let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
            debug!(%method, path, "Dispatch");

            let (route, url_params) = match self.routes.resolve(&method, path) {
                Ok(found) => found,
                Err(e) => {
                    warn!(%method, path, error = %e, "Unroutable");
                    let _ = respond_to.send(Err(e));
                    continue;
                }
            };
            served += 1;

            let request = RequestContainer {
                url_params,
                query_params: parse_query(query),
                body,
            };
            let resource = Arc::clone(&route.resource);
            let action = route.action.clone();
            tokio::spawn(async move {
                let result = match resource.invoke(&action, request).await {
                    Ok(instance) => Ok(Reply {
                        status: 200,
                        resource: resource.name().to_string(),
                        body: resource.present(instance),
                        action,
                    }),
                    Err(e) => Err(DispatchError::from(e)),
                };
                let _ = respond_to.send(result);
            });
        }

        info!(served, "Dispatcher shutdown");
    }
}
