//! Session model
//!
//! Identity issuing and the per-client session record with its outbound
//! delivery queue.

mod id;
mod session;

pub use id::{SessionId, SessionIdGenerator};
pub use session::{QueueClosed, Session, OUTBOUND_CAPACITY};
