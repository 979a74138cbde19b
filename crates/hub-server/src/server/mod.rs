//! Server setup
//!
//! Binds the listener, starts the broadcaster loop, and spawns one
//! handler per accepted connection.

use std::sync::Arc;

use hub_common::{AppError, HubConfig};
use hub_core::broadcast::Broadcaster;
use hub_core::session::SessionIdGenerator;
use tokio::net::TcpListener;

use crate::connection::handle_connection;

/// Bind the configured address and serve connections forever
///
/// A bind failure is the only fatal error; everything past it is handled
/// per connection.
pub async fn run(config: HubConfig) -> Result<(), AppError> {
    let addr = config.server.address();
    let listener = TcpListener::bind(&addr).await.map_err(|source| AppError::Bind {
        addr: addr.clone(),
        source,
    })?;

    tracing::info!(%addr, "Hub listening");

    serve(listener).await
}

/// Serve connections on an already-bound listener
///
/// Split out from [`run`] so tests can bind an ephemeral port first. The
/// broadcaster and the identity generator are created here, once, and
/// handed to every connection handler.
pub async fn serve(listener: TcpListener) -> Result<(), AppError> {
    let (broadcaster, hub) = Broadcaster::new();
    tokio::spawn(broadcaster.run());

    let ids = Arc::new(SessionIdGenerator::new());

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let hub = hub.clone();
                let ids = ids.clone();
                tokio::spawn(async move {
                    handle_connection(stream, peer, hub, ids).await;
                });
            }
            Err(e) => {
                // A failed accept must not take the server down.
                tracing::warn!(error = %e, "Failed to accept connection");
            }
        }
    }
}
