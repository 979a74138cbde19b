//! Integration test support for the hub
//!
//! See [`helpers`] for the in-process test server and line client.

pub mod helpers;
