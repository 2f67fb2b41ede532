//! Service connections.
//!
//! A connection is two crossed channel pairs. The caller keeps the local
//! [`Endpoint`] inside its [`Connection`]; the remote endpoint is handed to
//! the service by value when it connects.

use crate::error::ServiceError;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Frames buffered per direction before senders wait.
const CHANNEL_CAPACITY: usize = 64;

static NEXT_HOST: AtomicU64 = AtomicU64::new(1);

/// Arbitrary per-connection state chosen by the service.
pub type Userdata = Box<dyn Any + Send>;

/// Process-unique identity of a service host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct HostId(u64);

impl HostId {
    pub(crate) fn next() -> Self {
        Self(NEXT_HOST.fetch_add(1, Ordering::Relaxed))
    }
}

/// Connection number, unique within one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub(crate) u64);

impl ConnectionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One side of a connection: writes go to the peer, reads come from it.
pub struct Endpoint {
    id: ConnectionId,
    tx: mpsc::Sender<Vec<u8>>,
    rx: mpsc::Receiver<Vec<u8>>,
}

impl Endpoint {
    /// Two crossed endpoints: `(local, remote)`.
    pub(crate) fn pair(id: ConnectionId) -> (Self, Self) {
        let (to_remote_tx, to_remote_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (to_local_tx, to_local_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let local = Self {
            id,
            tx: to_remote_tx,
            rx: to_local_rx,
        };
        let remote = Self {
            id,
            tx: to_local_tx,
            rx: to_remote_rx,
        };
        (local, remote)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub async fn send(&self, frame: Vec<u8>) -> Result<(), ServiceError> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| ServiceError::ConnectionClosed(self.id.0))
    }

    /// Send without waiting. Usable from the synchronous service hooks.
    pub fn try_send(&self, frame: Vec<u8>) -> Result<(), ServiceError> {
        self.tx.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => ServiceError::Backlogged(self.id.0),
            TrySendError::Closed(_) => ServiceError::ConnectionClosed(self.id.0),
        })
    }

    /// Next frame, or `None` once the peer has dropped its end.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.rx.recv().await
    }

    /// Next frame if one is already buffered.
    pub fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.rx.try_recv().ok()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("id", &self.id).finish()
    }
}

/// An open connection to a hosted service, held by the caller.
pub struct Connection {
    id: ConnectionId,
    host: HostId,
    service: &'static str,
    local: Endpoint,
    pub(crate) userdata: Option<Userdata>,
}

impl Connection {
    pub(crate) fn new(host: HostId, service: &'static str, local: Endpoint) -> Self {
        Self {
            id: local.id,
            host,
            service,
            local,
            userdata: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub(crate) fn host(&self) -> HostId {
        self.host
    }

    /// Name of the service this connection belongs to.
    pub fn service(&self) -> &'static str {
        self.service
    }

    /// The caller's end.
    pub fn local(&mut self) -> &mut Endpoint {
        &mut self.local
    }

    /// Userdata attached by the service at connect time.
    pub fn userdata(&self) -> Option<&(dyn Any + Send)> {
        self.userdata.as_deref()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("userdata", &self.userdata.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn frames_cross_between_ends() {
        let (local, mut remote) = Endpoint::pair(ConnectionId(7));
        let mut conn = Connection::new(HostId::next(), "monitor", local);

        conn.local().send(b"ping".to_vec()).await.unwrap();
        assert_eq!(remote.recv().await, Some(b"ping".to_vec()));

        remote.send(b"pong".to_vec()).await.unwrap();
        assert_eq!(conn.local().recv().await, Some(b"pong".to_vec()));
    }

    #[tokio::test]
    async fn ends_do_not_hear_themselves() {
        let (mut local, mut remote) = Endpoint::pair(ConnectionId(1));
        local.send(b"echo?".to_vec()).await.unwrap();
        assert_eq!(local.try_recv(), None);
        assert_eq!(remote.try_recv(), Some(b"echo?".to_vec()));
    }

    #[test]
    fn try_send_reports_backlog_and_closed_peer() {
        let (local, remote) = Endpoint::pair(ConnectionId(2));
        for n in 0..CHANNEL_CAPACITY {
            local.try_send(vec![n as u8]).unwrap();
        }
        assert_eq!(local.try_send(vec![0]), Err(ServiceError::Backlogged(2)));

        drop(remote);
        assert_eq!(local.try_send(vec![0]), Err(ServiceError::ConnectionClosed(2)));
    }

    #[tokio::test]
    async fn dropped_peer_ends_the_stream() {
        let (mut local, remote) = Endpoint::pair(ConnectionId(4));
        drop(remote);
        assert_eq!(local.recv().await, None);
    }

    #[test]
    fn hosts_get_distinct_ids() {
        assert_ne!(HostId::next(), HostId::next());
    }

    #[test]
    fn id_displays_with_hash() {
        assert_eq!(ConnectionId(3).to_string(), "#3");
        assert_eq!(ConnectionId(3).get(), 3);
    }
}
