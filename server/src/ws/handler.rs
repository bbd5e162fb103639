use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
};

use crate::state::AppState;
use crate::ws::actor;

/// GET /ws
/// WebSocket upgrade endpoint for community and mentor chat.
///
/// The realtime channel itself carries no credential: clients assert their
/// identity with a join-chat event after connecting, and the server takes
/// the payload at face value. Until a connection joins, anything it sends
/// is dropped.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let registry = state.connections.clone();
    ws.on_upgrade(move |socket| actor::run_connection(socket, registry))
}
