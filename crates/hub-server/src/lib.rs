//! # hub-server
//!
//! TCP server for the line-broadcast hub: listener, accept loop, and the
//! per-connection handlers bridging sockets to the broadcaster.

pub mod connection;
pub mod server;

pub use server::{run, serve};
