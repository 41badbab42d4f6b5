//! Single-Writer Actor Runtime
//!
//! Each service owns its state inside one tokio task. Requests arrive through a
//! bounded mailbox and are handled strictly one at a time in arrival order, which
//! makes every action atomic with respect to the others on the same service
//! without any lock around the state.

use super::protocol::ActionRequest;
use crate::error::{Result, ServiceError};

use serde_json::Value;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// A service whose state is driven exclusively by its mailbox loop.
pub trait Service: Send + 'static {
    /// Name used in logs and error messages.
    const NAME: &'static str;

    fn handle(&mut self, request: ActionRequest) -> impl Future<Output = Result<Value>> + Send;
}

struct Envelope {
    request: ActionRequest,
    reply: oneshot::Sender<Result<Value>>,
}

/// Cloneable handle used to submit requests to a running service.
#[derive(Clone)]
pub struct Mailbox {
    name: &'static str,
    sender: mpsc::Sender<Envelope>,
}

impl Mailbox {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Sends a request and waits for the service's answer.
    pub async fn call(&self, request: ActionRequest) -> Result<Value> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(Envelope { request, reply })
            .await
            .map_err(|_| {
                ServiceError::ServiceUnavailable(format!("{} mailbox is closed", self.name))
            })?;

        response.await.map_err(|_| {
            ServiceError::ServiceUnavailable(format!("{} dropped the request", self.name))
        })?
    }

    pub async fn send(&self, action: &str, data: Option<String>) -> Result<Value> {
        self.call(ActionRequest::new(action, data)).await
    }
}

/// Spawns the service loop and returns its mailbox.
///
/// The loop ends when every `Mailbox` clone has been dropped.
pub fn spawn<S: Service>(mut service: S, capacity: usize) -> (Mailbox, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::channel::<Envelope>(capacity.max(1));

    let handle = tokio::spawn(async move {
        tracing::info!("{} service started", S::NAME);

        while let Some(Envelope { request, reply }) = receiver.recv().await {
            let action = request.action.clone();
            let result = service.handle(request).await;

            match &result {
                Ok(_) => tracing::debug!("{} handled {}", S::NAME, action),
                Err(e) => tracing::warn!("{} rejected {}: {}", S::NAME, action, e),
            }

            // The caller may have given up waiting; nothing to do then.
            let _ = reply.send(result);
        }

        tracing::info!("{} service stopped", S::NAME);
    });

    (
        Mailbox {
            name: S::NAME,
            sender,
        },
        handle,
    )
}
