//! Broadcaster event loop
//!
//! Sole owner of the session registry. Joins, leaves, and broadcast text
//! all pass through one loop that consumes a single event per iteration,
//! so registry mutation can never race with fan-out: each event is atomic
//! relative to the registry. A session registered after a broadcast was
//! consumed does not receive it.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::handle::{BroadcasterHandle, MESSAGE_CAPACITY};
use crate::session::{Session, SessionId};

/// The coordination core: the registry plus the receiving ends of the
/// three event conduits.
///
/// Known limitation, preserved deliberately: fan-out enqueues into each
/// recipient's bounded queue and waits when one is full, so a single slow
/// consumer stalls delivery to every other session and stalls intake of
/// further events. Per-recipient fan-out tasks or drop-on-overflow would
/// remove the stall at the cost of changed delivery semantics.
pub struct Broadcaster {
    registry: HashMap<SessionId, Arc<Session>>,
    join_rx: mpsc::UnboundedReceiver<Arc<Session>>,
    leave_rx: mpsc::UnboundedReceiver<Arc<Session>>,
    message_rx: mpsc::Receiver<String>,
}

impl Broadcaster {
    /// Create the broadcaster and the handle used to feed it
    #[must_use]
    pub fn new() -> (Self, BroadcasterHandle) {
        let (join_tx, join_rx) = mpsc::unbounded_channel();
        let (leave_tx, leave_rx) = mpsc::unbounded_channel();
        let (message_tx, message_rx) = mpsc::channel(MESSAGE_CAPACITY);

        let broadcaster = Self {
            registry: HashMap::new(),
            join_rx,
            leave_rx,
            message_rx,
        };
        let handle = BroadcasterHandle {
            join_tx,
            leave_tx,
            message_tx,
        };

        (broadcaster, handle)
    }

    /// Consume events until every handle has been dropped
    ///
    /// In the server this runs for the process lifetime; shutdown simply
    /// abandons the loop, there is no graceful drain.
    ///
    /// Polling is biased towards registrations: pending joins and leaves
    /// are applied before the next broadcast is consumed, so a session
    /// whose join was submitted before a broadcast is guaranteed to
    /// receive it.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                Some(session) = self.join_rx.recv() => self.register(session),
                Some(session) = self.leave_rx.recv() => self.unregister(&session),
                Some(text) = self.message_rx.recv() => self.fan_out(&text).await,
                else => break,
            }
        }
        tracing::debug!("broadcaster loop ended");
    }

    fn register(&mut self, session: Arc<Session>) {
        tracing::debug!(id = %session.id(), addr = %session.addr(), "session registered");
        self.registry.insert(session.id(), session);
        tracing::trace!(online = self.registry.len(), "registry updated");
    }

    /// Remove a session and close its queue
    ///
    /// Removing an absent key is a no-op, and the queue is closed only by
    /// the call that actually removed the session, so closure happens
    /// exactly once even under duplicate leave events.
    fn unregister(&mut self, session: &Session) {
        if let Some(removed) = self.registry.remove(&session.id()) {
            removed.close();
            tracing::debug!(
                id = %session.id(),
                online = self.registry.len(),
                "session deregistered"
            );
        }
    }

    async fn fan_out(&self, text: &str) {
        for session in self.registry.values() {
            // A recipient torn down mid-route is skipped, not an error.
            if session.enqueue(text.to_owned()).await.is_err() {
                tracing::trace!(id = %session.id(), "skipping closed queue during fan-out");
            }
        }
    }
}
