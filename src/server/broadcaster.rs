//! Notification broadcaster.
//!
//! Owns the set of currently-connected clients and fans one event out to
//! all of them. Delivery is best-effort and at-most-once per event per
//! connected client: no queuing, no replay for late joiners, no
//! acknowledgements. A dead client never prevents the others from being
//! notified.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::protocol::{Message, Params};

// ============================================================================
// ClientId
// ============================================================================

/// Opaque identity of one connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generates a fresh client ID.
    #[allow(clippy::new_without_default)]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ClientSink
// ============================================================================

/// Send half of one client's channel, as the broadcaster sees it.
///
/// The socket layer backs this with the per-connection writer; tests back
/// it with recorders or deliberate failures.
pub trait ClientSink: Send + Sync {
    /// Delivers one serialized frame to this client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client can no longer receive. The
    /// broadcaster logs and moves on; it never propagates this.
    fn send(&self, text: &str) -> Result<()>;
}

// ============================================================================
// ClientConnection
// ============================================================================

/// Server-side handle to one connected client.
///
/// Belongs to exactly one broadcaster's set at a time; the broadcaster owns
/// the set exclusively.
#[derive(Clone)]
pub struct ClientConnection {
    id: ClientId,
    sink: Arc<dyn ClientSink>,
}

impl ClientConnection {
    /// Creates a connection handle around a sink.
    #[must_use]
    pub fn new(sink: Arc<dyn ClientSink>) -> Self {
        Self {
            id: ClientId::new(),
            sink,
        }
    }

    /// Returns this connection's identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Delivers one serialized frame to this client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client can no longer receive.
    pub fn send(&self, text: &str) -> Result<()> {
        self.sink.send(text)
    }
}

impl fmt::Debug for ClientConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConnection")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Broadcaster
// ============================================================================

/// Fans build-lifecycle events out to every live client.
///
/// Thread-safe; the build hook and the socket layer share one instance.
///
/// # Example
///
/// ```ignore
/// let broadcaster = Arc::new(Broadcaster::new());
/// broadcaster.register(connection);
/// broadcaster.broadcast(&Message::Invalid)?;
/// ```
pub struct Broadcaster {
    /// Live connections by client ID.
    clients: RwLock<FxHashMap<ClientId, ClientConnection>>,
}

impl Broadcaster {
    /// Creates a broadcaster with an empty client set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(FxHashMap::default()),
        }
    }

    /// Adds a connection to the live set.
    ///
    /// Idempotent: registering an already-tracked connection replaces the
    /// stored handle for the same identity.
    pub fn register(&self, connection: ClientConnection) {
        let id = connection.id();
        self.clients.write().insert(id, connection);
        debug!(client = %id, "client registered");
    }

    /// Removes a connection from the live set.
    ///
    /// Safe to call for a connection that is not present.
    pub fn unregister(&self, id: &ClientId) {
        if self.clients.write().remove(id).is_some() {
            debug!(client = %id, "client unregistered");
        }
    }

    /// Returns the number of live connections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    /// Returns `true` if no clients are connected.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }

    /// Drops every connection, e.g. during server shutdown.
    pub fn clear(&self) {
        let drained = {
            let mut clients = self.clients.write();
            clients.drain().count()
        };
        if drained > 0 {
            debug!(count = drained, "client set cleared");
        }
    }

    /// Broadcasts one message to every live client.
    ///
    /// Returns the number of clients the frame was delivered to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if encoding fails.
    /// Per-client send failures are logged and skipped, never propagated.
    pub fn broadcast(&self, message: &Message) -> Result<usize> {
        self.broadcast_with(message, None, None)
    }

    /// Broadcasts with optional metadata and an optional recipient filter.
    ///
    /// The frame is encoded once; the filter defaults to "all clients".
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if encoding fails.
    pub fn broadcast_with(
        &self,
        message: &Message,
        params: Option<Params>,
        filter: Option<&dyn Fn(&ClientConnection) -> bool>,
    ) -> Result<usize> {
        let mut envelope = message.envelope();
        if let Some(params) = params {
            envelope = envelope.with_params(params);
        }
        let frame = serde_json::to_string(&envelope)?;

        // Snapshot the set so sends run without holding the lock.
        let recipients: Vec<ClientConnection> = self.clients.read().values().cloned().collect();

        let mut delivered = 0;
        for client in &recipients {
            if let Some(filter) = filter
                && !filter(client)
            {
                continue;
            }

            match client.send(&frame) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    // Partial-failure isolation: one dead client must not
                    // starve the rest.
                    warn!(client = %client.id(), error = %e, "send failed during broadcast");
                }
            }
        }

        debug!(
            kind = message.kind(),
            delivered,
            total = recipients.len(),
            "broadcast complete"
        );

        Ok(delivered)
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
