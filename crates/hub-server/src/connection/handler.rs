//! Per-connection handler
//!
//! Bridges one TCP connection to the broadcaster. The read loop and the
//! writer task run independently and meet only at the session's outbound
//! queue; teardown is driven by whichever side dies first. A failure here
//! never reaches the broadcaster or any other connection.

use std::net::SocketAddr;
use std::sync::Arc;

use hub_core::broadcast::BroadcasterHandle;
use hub_core::notice;
use hub_core::session::{Session, SessionIdGenerator};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;

/// Drive one client connection from accept to teardown
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    hub: BroadcasterHandle,
    ids: Arc<SessionIdGenerator>,
) {
    let (session, outbound_rx) = Session::create(peer.to_string(), &ids);
    let id = session.id();
    tracing::info!(%id, %peer, "Connection established");

    let (read_half, write_half) = stream.into_split();
    let mut writer = tokio::spawn(write_outbound(write_half, outbound_rx));

    // The welcome banner is addressed to this session alone, so it goes
    // straight into the queue and bypasses the broadcaster.
    if session.enqueue(notice::welcome(&session)).await.is_err() {
        tracing::warn!(%id, "Welcome undeliverable, dropping connection");
        return;
    }

    let _ = hub.broadcast(notice::enter(id)).await;
    let _ = hub.join(session.clone());

    let mut lines = BufReader::new(read_half).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(text)) => {
                    if hub.broadcast(notice::chat(id, &text)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    tracing::info!(%id, "Client disconnected");
                    break;
                }
                Err(e) => {
                    tracing::warn!(%id, error = %e, "Read failed");
                    break;
                }
            },
            // Writer death means the socket is gone; treat it like a
            // read failure and tear down.
            _ = &mut writer => {
                tracing::debug!(%id, "Writer task ended, closing connection");
                break;
            }
        }
    }

    // The broadcaster removes the session from the registry and closes
    // its queue; the departure notice then fans out to everyone left.
    let _ = hub.leave(session);
    let _ = hub.broadcast(notice::left(id)).await;
}

/// Forward queued lines to the socket until the queue closes
async fn write_outbound(mut conn: OwnedWriteHalf, mut outbound: mpsc::Receiver<String>) {
    while let Some(mut line) = outbound.recv().await {
        line.push('\n');
        if let Err(e) = conn.write_all(line.as_bytes()).await {
            tracing::warn!(error = %e, "Write failed");
            break;
        }
    }
}
