//! Per-client session record
//!
//! A `Session` is created when a connection is accepted, registered with
//! the broadcaster on join, and has its outbound queue closed by the
//! broadcaster when it leaves. The connection's writer task drains the
//! receiver handed out at creation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::id::{SessionId, SessionIdGenerator};

/// Outbound queue capacity per session
pub const OUTBOUND_CAPACITY: usize = 8;

/// Error returned when enqueuing to a session whose outbound queue has
/// been closed (or whose writer task is gone)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session outbound queue is closed")]
pub struct QueueClosed;

/// One connected client and its pending outbound messages
pub struct Session {
    /// Unique identity, assigned at creation
    id: SessionId,

    /// Peer address as reported by the transport (not unique)
    addr: String,

    /// When the connection was accepted
    enter_at: DateTime<Utc>,

    /// Sender half of the outbound queue. Taken out exactly once, by the
    /// broadcaster, after the session has left the registry.
    outbound: Mutex<Option<mpsc::Sender<String>>>,
}

impl Session {
    /// Create a session and the receiver its writer task will drain
    pub fn create(
        addr: impl Into<String>,
        ids: &SessionIdGenerator,
    ) -> (Arc<Self>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let session = Arc::new(Self {
            id: ids.next_id(),
            addr: addr.into(),
            enter_at: Utc::now(),
            outbound: Mutex::new(Some(tx)),
        });
        (session, rx)
    }

    /// Get the session identity
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the peer address
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Get the time the connection was accepted
    pub fn enter_at(&self) -> DateTime<Utc> {
        self.enter_at
    }

    /// Place a line on the outbound queue
    ///
    /// Waits for space when the queue is full, which makes the caller the
    /// backpressure point (see the limitation note on
    /// [`Broadcaster`](crate::broadcast::Broadcaster)). Fails only once
    /// the queue has been closed.
    pub async fn enqueue(&self, text: String) -> Result<(), QueueClosed> {
        // Clone the sender out of the slot so the lock is never held
        // across an await.
        let sender = self.outbound.lock().clone().ok_or(QueueClosed)?;
        sender.send(text).await.map_err(|_| QueueClosed)
    }

    /// Close the outbound queue
    ///
    /// Idempotent. Returns whether this call performed the closure; a
    /// second call finds the slot already empty and does nothing.
    pub fn close(&self) -> bool {
        self.outbound.lock().take().is_some()
    }

    /// Whether the outbound queue has been closed
    pub fn is_closed(&self) -> bool {
        self.outbound.lock().is_none()
    }

    /// Render address, identity, and entry time for the welcome banner
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{}, UID:{}, Enter At:{}",
            self.addr,
            self.id,
            self.enter_at.format("%Y-%m-%d %H:%M:%S%z")
        )
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("addr", &self.addr)
            .field("enter_at", &self.enter_at)
            .field("closed", &self.is_closed())
            .finish()
    }
}
