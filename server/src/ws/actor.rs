//! Actor-per-connection lifecycle for the realtime channel.
//!
//! Each connection moves through open (unjoined) -> open (joined) ->
//! closed. Joining happens via the protocol handler; closing is always
//! transport-initiated, and every exit path removes the connection from
//! the registry.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::ws::protocol;
use crate::ws::{ConnectionId, ConnectionRegistry};

/// Run the actor for one accepted WebSocket.
///
/// Splits the socket into reader and writer halves:
/// - Writer task: owns the sink, forwards messages from an mpsc channel
/// - Reader loop: decodes incoming frames and dispatches to the protocol
///
/// The mpsc sender is what the registry hands out, so any part of the
/// system can push messages to this client by cloning it.
pub async fn run_connection(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let conn_id = ConnectionId::next();
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<Message>();

    tracing::info!(connection = %conn_id, "WebSocket actor started");

    // Spawn writer task: forwards mpsc messages to the WebSocket sink
    let writer_handle = tokio::spawn(writer_task(ws_sender, rx));

    // Reader loop: process incoming WebSocket messages
    loop {
        match ws_receiver.next().await {
            Some(Ok(msg)) => match msg {
                Message::Text(text) => {
                    protocol::handle_text_message(text.as_str(), conn_id, &tx, &registry);
                }
                Message::Binary(_) => {
                    // The protocol is JSON text frames; binary is not part of it
                    tracing::debug!(connection = %conn_id, "Ignoring binary frame");
                }
                Message::Ping(data) => {
                    // Respond to client pings with pong
                    let _ = tx.send(Message::Pong(data));
                }
                Message::Pong(_) => {}
                Message::Close(frame) => {
                    tracing::info!(connection = %conn_id, reason = ?frame, "Client initiated close");
                    break;
                }
            },
            Some(Err(e)) => {
                tracing::warn!(connection = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
            None => {
                // Stream ended — client disconnected
                tracing::info!(connection = %conn_id, "WebSocket stream ended");
                break;
            }
        }
    }

    // Cleanup: stop the writer and drop this connection from the registry.
    // remove() is a no-op if the connection never joined.
    writer_handle.abort();
    registry.remove(conn_id);

    tracing::info!(connection = %conn_id, "WebSocket actor stopped");
}

/// Writer task: receives messages from the mpsc channel and forwards them to
/// the WebSocket sink.
async fn writer_task(
    mut ws_sender: futures_util::stream::SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(msg) = rx.recv().await {
        if ws_sender.send(msg).await.is_err() {
            // WebSocket send failed — connection is broken
            break;
        }
    }
}
