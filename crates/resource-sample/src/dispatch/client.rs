//! # Dispatch Client
//!
//! The cloneable front-end of the [`Dispatcher`](super::Dispatcher): sends a
//! request over the channel and awaits the reply.

use super::actor::{Dispatch, Reply};
use super::error::DispatchError;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// A type-safe client for the dispatcher.
#[derive(Clone)]
pub struct DispatchClient {
    sender: mpsc::Sender<Dispatch>,
}

impl DispatchClient {
    pub fn new(sender: mpsc::Sender<Dispatch>) -> Self {
        Self { sender }
    }

    /// Sends a raw request.
    #[instrument(skip(self, body))]
    pub async fn send(
        &self,
        method: &str,
        target: &str,
        body: Vec<u8>,
    ) -> Result<Reply, DispatchError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Dispatch {
                method: method.to_ascii_uppercase(),
                target: target.to_string(),
                body,
                respond_to,
            })
            .await
            .map_err(|_| DispatchError::DispatcherClosed)?;
        response.await.map_err(|_| DispatchError::DispatcherDropped)?
    }

    pub async fn get(&self, target: &str) -> Result<Reply, DispatchError> {
        self.send("GET", target, Vec::new()).await
    }

    pub async fn delete(&self, target: &str) -> Result<Reply, DispatchError> {
        self.send("DELETE", target, Vec::new()).await
    }

    /// Sends `body` as JSON.
    pub async fn put<T: Serialize>(&self, target: &str, body: &T) -> Result<Reply, DispatchError> {
        let body = serde_json::to_vec(body)?;
        self.send("PUT", target, body).await
    }

    /// Sends `body` as JSON.
    pub async fn post<T: Serialize>(&self, target: &str, body: &T) -> Result<Reply, DispatchError> {
        let body = serde_json::to_vec(body)?;
        self.send("POST", target, body).await
    }
}
