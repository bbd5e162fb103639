//! Realtime wire protocol and message routing.
//!
//! Events are JSON text frames tagged by `type`. Inbound frames that fail
//! validation are dropped without a reply: the realtime channel has no
//! error-acknowledgement path, so every failure degrades to "message not
//! delivered".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mentor::responder;
use crate::ws::broadcast;
use crate::ws::{ConnectionId, ConnectionRegistry, ConnectionSender, Identity};

/// Client-to-server events.
///
/// `join-chat` fields are optional so a partial payload still decodes and
/// can be rejected explicitly instead of failing the whole frame.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinChat {
        display_name: Option<String>,
        user_id: Option<String>,
    },
    CommunityMessage {
        text: String,
    },
    MentorMessage {
        text: String,
    },
}

/// Server-to-client events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    CommunityMessage {
        text: String,
        user: String,
        timestamp: DateTime<Utc>,
    },
    MentorResponse {
        text: String,
        timestamp: DateTime<Utc>,
    },
}

/// Handle one incoming text frame: decode the tagged event and dispatch.
/// Undecodable frames are dropped.
pub fn handle_text_message(
    text: &str,
    conn_id: ConnectionId,
    tx: &ConnectionSender,
    registry: &ConnectionRegistry,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(connection = %conn_id, error = %e, "Undecodable realtime event, dropping");
            return;
        }
    };

    match event {
        ClientEvent::JoinChat {
            display_name,
            user_id,
        } => handle_join(conn_id, display_name, user_id, tx, registry),
        ClientEvent::CommunityMessage { text } => {
            handle_community_message(conn_id, text, registry)
        }
        ClientEvent::MentorMessage { text } => handle_mentor_message(conn_id, &text, tx, registry),
    }
}

/// Join handshake: bind the asserted identity to this connection.
///
/// A payload missing either field is dropped silently; the client gets no
/// acknowledgement either way and optimistically assumes success. Joining
/// again overwrites the previous identity.
fn handle_join(
    conn_id: ConnectionId,
    display_name: Option<String>,
    user_id: Option<String>,
    tx: &ConnectionSender,
    registry: &ConnectionRegistry,
) {
    let (Some(display_name), Some(user_id)) = (display_name, user_id) else {
        tracing::debug!(connection = %conn_id, "join-chat missing identity fields, dropping");
        return;
    };

    tracing::info!(connection = %conn_id, user_id = %user_id, display_name = %display_name, "Client joined chat");

    registry.bind(
        conn_id,
        Identity {
            display_name,
            user_id,
        },
        tx.clone(),
    );
}

/// Community chat: stamp the message with the sender's identity and fan it
/// out to every currently registered connection, sender included.
///
/// A sender that never joined has no attributable identity; its messages
/// are dropped.
fn handle_community_message(conn_id: ConnectionId, text: String, registry: &ConnectionRegistry) {
    let Some(identity) = registry.lookup(conn_id) else {
        tracing::debug!(connection = %conn_id, "community-message from unjoined connection, dropping");
        return;
    };

    broadcast::broadcast_community_message(
        registry,
        ServerEvent::CommunityMessage {
            text,
            user: identity.display_name,
            timestamp: Utc::now(),
        },
    );
}

/// Mentor chat: reply with a canned response, to the asking connection only.
fn handle_mentor_message(
    conn_id: ConnectionId,
    text: &str,
    tx: &ConnectionSender,
    registry: &ConnectionRegistry,
) {
    if registry.lookup(conn_id).is_none() {
        tracing::debug!(connection = %conn_id, "mentor-message from unjoined connection, dropping");
        return;
    }

    tracing::debug!(connection = %conn_id, chars = text.len(), "Mentor query received");

    let reply = responder::select_general(&mut rand::rng());
    broadcast::send_to_connection(
        tx,
        &ServerEvent::MentorResponse {
            text: reply.to_string(),
            timestamp: Utc::now(),
        },
    );
}
