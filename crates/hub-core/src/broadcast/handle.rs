//! Broadcaster handle
//!
//! A clonable bundle of the three event conduits, constructed once at
//! startup and passed to every connection handler. Join and leave travel
//! on unbounded conduits so a handler is never stalled registering or
//! deregistering; broadcast text travels on a small bounded conduit.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::session::Session;

/// Capacity of the broadcast-text conduit
pub(super) const MESSAGE_CAPACITY: usize = 8;

/// Error returned when the broadcaster loop is no longer running
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("broadcaster has shut down")]
pub struct BroadcasterClosed;

/// Submits events to the broadcaster
#[derive(Debug, Clone)]
pub struct BroadcasterHandle {
    pub(super) join_tx: mpsc::UnboundedSender<Arc<Session>>,
    pub(super) leave_tx: mpsc::UnboundedSender<Arc<Session>>,
    pub(super) message_tx: mpsc::Sender<String>,
}

impl BroadcasterHandle {
    /// Register a session with the broadcaster. Never blocks.
    pub fn join(&self, session: Arc<Session>) -> Result<(), BroadcasterClosed> {
        self.join_tx.send(session).map_err(|_| BroadcasterClosed)
    }

    /// Deregister a session. Never blocks; unknown sessions are ignored
    /// by the broadcaster.
    pub fn leave(&self, session: Arc<Session>) -> Result<(), BroadcasterClosed> {
        self.leave_tx.send(session).map_err(|_| BroadcasterClosed)
    }

    /// Submit a line for fan-out to every registered session
    ///
    /// Waits when the conduit is full.
    pub async fn broadcast(&self, text: impl Into<String>) -> Result<(), BroadcasterClosed> {
        self.message_tx
            .send(text.into())
            .await
            .map_err(|_| BroadcasterClosed)
    }
}
