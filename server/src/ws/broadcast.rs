//! Fan-out helpers: serialize an event once, then deliver to one connection
//! or to every registered connection.

use axum::extract::ws::Message;

use crate::ws::protocol::ServerEvent;
use crate::ws::{ConnectionRegistry, ConnectionSender};

/// Broadcast a community message to all registered connections, including
/// the sender. Sends to connections that die mid-fan-out fail silently.
pub fn broadcast_community_message(registry: &ConnectionRegistry, event: ServerEvent) {
    broadcast_to_all(registry, &event);
}

/// Broadcast an event to every registered connection.
pub fn broadcast_to_all(registry: &ConnectionRegistry, event: &ServerEvent) {
    let Some(msg) = encode(event) else { return };

    registry.for_each(|_, _, sender| {
        let _ = sender.send(msg.clone());
    });
}

/// Send an event to a single connection.
pub fn send_to_connection(tx: &ConnectionSender, event: &ServerEvent) {
    if let Some(msg) = encode(event) {
        let _ = tx.send(msg);
    }
}

fn encode(event: &ServerEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode realtime event");
            None
        }
    }
}
