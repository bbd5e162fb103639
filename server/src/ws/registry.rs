//! Connection registry: tracks which live WebSocket connections have
//! asserted a user identity, and holds the sender handle used to push
//! messages to each of them.
//!
//! A connection appears here if and only if it has completed the join
//! handshake and has not yet disconnected. The registry is created once in
//! main (or per test) and shared as an Arc — never a module-level global.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::ws::ConnectionSender;

/// Opaque identifier for one live WebSocket session.
///
/// Assigned at upgrade time from a process-wide counter; never reused within
/// a process lifetime. A reconnecting client gets a fresh id and must join
/// again from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

impl ConnectionId {
    /// Allocate the next connection id.
    pub fn next() -> Self {
        ConnectionId(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Identity a client asserted over the join handshake.
///
/// Taken at face value: the realtime channel does not re-verify it against
/// the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub display_name: String,
    pub user_id: String,
}

struct Registered {
    identity: Identity,
    sender: ConnectionSender,
}

/// Live connection -> identity mapping backing broadcast and attribution.
pub struct ConnectionRegistry {
    entries: DashMap<ConnectionId, Registered>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert or replace the identity bound to a connection. Last write wins;
    /// rebinding is not an error.
    pub fn bind(&self, id: ConnectionId, identity: Identity, sender: ConnectionSender) {
        self.entries.insert(id, Registered { identity, sender });
    }

    /// Currently bound identity for a connection, if any.
    pub fn lookup(&self, id: ConnectionId) -> Option<Identity> {
        self.entries.get(&id).map(|e| e.identity.clone())
    }

    /// Delete a connection's entry. No-op when absent: disconnects can race
    /// joins, and a connection may disconnect before ever joining.
    pub fn remove(&self, id: ConnectionId) {
        self.entries.remove(&id);
    }

    /// Number of currently bound connections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply `f` to a snapshot of all bound (connection, identity, sender)
    /// triples. The snapshot is collected before `f` runs, so the callback
    /// may bind/remove entries without deadlocking a shard lock, and an
    /// entry removed once iteration started still receives its copy
    /// (best-effort delivery; the send to a dead channel is a silent no-op).
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(ConnectionId, &Identity, &ConnectionSender),
    {
        let snapshot: Vec<(ConnectionId, Identity, ConnectionSender)> = self
            .entries
            .iter()
            .map(|entry| {
                (
                    *entry.key(),
                    entry.value().identity.clone(),
                    entry.value().sender.clone(),
                )
            })
            .collect();

        for (id, identity, sender) in &snapshot {
            f(*id, identity, sender);
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn sender() -> ConnectionSender {
        let (tx, _rx) = mpsc::unbounded_channel();
        tx
    }

    fn identity(name: &str, id: &str) -> Identity {
        Identity {
            display_name: name.to_string(),
            user_id: id.to_string(),
        }
    }

    #[test]
    fn bind_then_lookup_returns_identity() {
        let registry = ConnectionRegistry::new();
        let conn = ConnectionId::next();

        registry.bind(conn, identity("Alice", "1"), sender());

        let found = registry.lookup(conn).expect("bound connection");
        assert_eq!(found.display_name, "Alice");
        assert_eq!(found.user_id, "1");
    }

    #[test]
    fn lookup_of_unbound_connection_is_absent() {
        let registry = ConnectionRegistry::new();
        assert!(registry.lookup(ConnectionId::next()).is_none());
    }

    #[test]
    fn remove_deletes_entry_and_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let conn = ConnectionId::next();
        registry.bind(conn, identity("Alice", "1"), sender());

        registry.remove(conn);
        assert!(registry.lookup(conn).is_none());

        // Double disconnect is a no-op, not an error
        registry.remove(conn);
        assert!(registry.is_empty());
    }

    #[test]
    fn rebind_overwrites_previous_identity() {
        let registry = ConnectionRegistry::new();
        let conn = ConnectionId::next();

        registry.bind(conn, identity("Alice", "1"), sender());
        registry.bind(conn, identity("Alicia", "1"), sender());

        assert_eq!(registry.len(), 1);
        let found = registry.lookup(conn).expect("bound connection");
        assert_eq!(found.display_name, "Alicia");
    }

    #[test]
    fn for_each_visits_every_bound_connection() {
        let registry = ConnectionRegistry::new();
        let a = ConnectionId::next();
        let b = ConnectionId::next();
        registry.bind(a, identity("Alice", "1"), sender());
        registry.bind(b, identity("Bob", "2"), sender());

        let mut seen = Vec::new();
        registry.for_each(|id, ident, _| seen.push((id, ident.display_name.clone())));

        seen.sort_by_key(|(_, name)| name.clone());
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, "Alice");
        assert_eq!(seen[1].1, "Bob");
    }

    #[test]
    fn for_each_does_not_visit_removed_connections() {
        let registry = ConnectionRegistry::new();
        let a = ConnectionId::next();
        let b = ConnectionId::next();
        registry.bind(a, identity("Alice", "1"), sender());
        registry.bind(b, identity("Bob", "2"), sender());

        registry.remove(b);

        let mut seen = Vec::new();
        registry.for_each(|id, _, _| seen.push(id));
        assert_eq!(seen, vec![a]);
    }

    #[test]
    fn for_each_callback_may_mutate_the_registry() {
        let registry = ConnectionRegistry::new();
        let a = ConnectionId::next();
        let b = ConnectionId::next();
        registry.bind(a, identity("Alice", "1"), sender());
        registry.bind(b, identity("Bob", "2"), sender());

        // Removing mid-iteration must not deadlock or panic; the snapshot
        // taken at the start is still fully visited.
        let mut visits = 0;
        registry.for_each(|_, _, _| {
            registry.remove(a);
            registry.remove(b);
            visits += 1;
        });

        assert_eq!(visits, 2);
        assert!(registry.is_empty());
    }
}
