//! Broadcast text convention
//!
//! Everything the hub puts on the wire is plain newline-delimited text:
//! the welcome banner, join/leave notices, and chat-line prefixing.
//! Newline framing is applied by the writer, not here.

use crate::session::{Session, SessionId};

/// Welcome banner, sent only to the newly attached session
#[must_use]
pub fn welcome(session: &Session) -> String {
    format!("Welcome, {}", session.describe())
}

/// Announcement that a session has joined
#[must_use]
pub fn enter(id: SessionId) -> String {
    format!("user:`{id}`has enter")
}

/// Announcement that a session has left
#[must_use]
pub fn left(id: SessionId) -> String {
    format!("user: `{id}` has left")
}

/// A chat line: the sender's identity immediately followed by the raw text
#[must_use]
pub fn chat(id: SessionId, text: &str) -> String {
    format!("{id}{text}")
}
