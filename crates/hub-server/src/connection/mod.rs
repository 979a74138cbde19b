//! Connection handling
//!
//! One handler per accepted connection: an inbound read loop translating
//! lines into broadcast events, and an outbound writer task draining the
//! session's queue.

mod handler;

pub use handler::handle_connection;
