//! Broadcasting
//!
//! The broadcaster event loop that owns the session registry, and the
//! handle connection handlers use to feed it.

mod broadcaster;
mod handle;

pub use broadcaster::Broadcaster;
pub use handle::{BroadcasterClosed, BroadcasterHandle};
