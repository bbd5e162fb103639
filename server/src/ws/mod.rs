pub mod actor;
pub mod broadcast;
pub mod handler;
pub mod protocol;
pub mod registry;

use std::sync::Arc;
use tokio::sync::mpsc;

pub use registry::{ConnectionId, ConnectionRegistry, Identity};

/// Sender half of a connection's outbound channel. Cloning this is how any
/// part of the system pushes a frame to that client.
pub type ConnectionSender = mpsc::UnboundedSender<axum::extract::ws::Message>;

/// Fresh, empty registry, ready to share across actors.
pub fn new_connection_registry() -> Arc<ConnectionRegistry> {
    Arc::new(ConnectionRegistry::new())
}
