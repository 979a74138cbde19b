//! # hub-core
//!
//! Core of the line-broadcast hub: the session data model, the textual
//! notice convention, and the broadcaster that owns the session registry.
//! This crate performs no socket I/O; it speaks only through channels.

pub mod broadcast;
pub mod notice;
pub mod session;

// Re-export commonly used types at crate root
pub use broadcast::{Broadcaster, BroadcasterClosed, BroadcasterHandle};
pub use session::{QueueClosed, Session, SessionId, SessionIdGenerator};
