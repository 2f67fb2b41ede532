//! Service lifecycle management.

use super::Service;
use super::connection::{Connection, ConnectionId, Endpoint, HostId};
use crate::error::ServiceError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The status of a loaded service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Ready,
    Started,
    Stopped,
}

/// Internal state of a loaded service.
struct Hosted {
    service: Arc<dyn Service>,
    status: ServiceStatus,
    connections: HashSet<ConnectionId>,
}

/// Owns the lifecycle state of every loaded service.
///
/// Connections are stamped with the host that opened them and are only
/// accepted back by that host.
pub struct ServiceHost {
    id: HostId,
    services: HashMap<&'static str, Hosted>,
    next_connection: u64,
}

impl Default for ServiceHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceHost {
    pub fn new() -> Self {
        Self {
            id: HostId::next(),
            services: HashMap::new(),
            next_connection: 0,
        }
    }

    /// Load a service. Runs `on_load` once the service is registered.
    pub fn load(&mut self, service: Arc<dyn Service>) -> Result<(), ServiceError> {
        let name = service.name();
        debug!(service = name, "Request to load service");

        if self.services.contains_key(name) {
            error!(service = name, "Service is already loaded");
            return Err(ServiceError::AlreadyLoaded(name.to_string()));
        }

        service.on_load();
        self.services.insert(
            name,
            Hosted {
                service,
                status: ServiceStatus::Ready,
                connections: HashSet::new(),
            },
        );
        info!(service = name, "Service loaded");
        Ok(())
    }

    /// Unload a service. Runs `on_unload` and drops all state.
    pub fn unload(&mut self, name: &str) -> Result<(), ServiceError> {
        debug!(service = name, "Request to unload service");

        let Some(hosted) = self.services.remove(name) else {
            error!(service = name, "Service is not loaded");
            return Err(ServiceError::NotLoaded(name.to_string()));
        };

        hosted.service.on_unload();
        info!(service = name, "Service unloaded");
        Ok(())
    }

    /// Start a service that is Ready or Stopped.
    pub fn start(&mut self, name: &str) -> Result<(), ServiceError> {
        debug!(service = name, "Request to start service");

        let hosted = match self.services.get_mut(name) {
            Some(hosted) if hosted.status != ServiceStatus::Started => hosted,
            _ => {
                error!(service = name, "Service is not ready");
                return Err(ServiceError::NotReady(name.to_string()));
            }
        };

        hosted.service.on_start();
        hosted.status = ServiceStatus::Started;
        info!(service = name, "Service started");
        info!(service = name, "{}", hosted.service.description());
        Ok(())
    }

    /// Stop a started service. Outstanding connections do not block the stop.
    pub fn stop(&mut self, name: &str) -> Result<(), ServiceError> {
        debug!(service = name, "Request to stop service");

        let hosted = match self.services.get_mut(name) {
            Some(hosted) if hosted.status == ServiceStatus::Started => hosted,
            _ => {
                error!(service = name, "Service is not started");
                return Err(ServiceError::NotStarted(name.to_string()));
            }
        };

        if !hosted.connections.is_empty() {
            warn!(
                service = name,
                outstanding = hosted.connections.len(),
                "Stopping service with outstanding connections"
            );
        }

        hosted.service.on_stop();
        hosted.status = ServiceStatus::Stopped;
        info!(service = name, "Service stopped");
        Ok(())
    }

    /// Open a connection to a started service.
    pub fn connect(&mut self, name: &str) -> Result<Connection, ServiceError> {
        debug!(service = name, "Request to connect to service");

        let Some(hosted) = self.services.get_mut(name) else {
            error!(service = name, "Service is not loaded");
            return Err(ServiceError::NotLoaded(name.to_string()));
        };
        if hosted.status != ServiceStatus::Started {
            error!(service = name, "Service is not running");
            return Err(ServiceError::NotRunning(name.to_string()));
        }

        self.next_connection += 1;
        let id = ConnectionId(self.next_connection);
        let (local, remote) = Endpoint::pair(id);
        let mut conn = Connection::new(self.id, hosted.service.name(), local);
        conn.userdata = hosted.service.on_connect(id, remote);
        hosted.connections.insert(id);

        debug!(service = name, connection = %id, "Connected to service");
        Ok(conn)
    }

    /// Close a connection, handing its userdata back to the service.
    pub fn disconnect(&mut self, mut conn: Connection) -> Result<(), ServiceError> {
        let id = conn.id();
        let name = conn.service();
        debug!(service = name, connection = %id, "Request to disconnect from service");

        if conn.host() != self.id {
            error!(service = name, connection = %id, "Connection belongs to another host");
            return Err(ServiceError::UnknownConnection(id.get()));
        }

        let Some(hosted) = self.services.get_mut(name) else {
            error!(service = name, connection = %id, "Connection is not open");
            return Err(ServiceError::UnknownConnection(id.get()));
        };
        if !hosted.connections.remove(&id) {
            error!(service = name, connection = %id, "Connection is not open");
            return Err(ServiceError::UnknownConnection(id.get()));
        }

        let userdata = conn.userdata.take();
        hosted.service.on_disconnect(id, userdata);
        debug!(service = name, connection = %id, "Disconnected from service");
        Ok(())
    }

    /// Disconnect `connections`, then stop and unload `services` in order.
    ///
    /// Keeps going past failures and returns every error hit on the way.
    /// Services that are not started are unloaded without a stop.
    pub fn shutdown(
        &mut self,
        connections: impl IntoIterator<Item = Connection>,
        services: &[&str],
    ) -> Vec<ServiceError> {
        let mut errors = Vec::new();
        for conn in connections {
            if let Err(e) = self.disconnect(conn) {
                errors.push(e);
            }
        }
        for &name in services {
            if self.status(name) != Some(ServiceStatus::Started) {
                continue;
            }
            if let Err(e) = self.stop(name) {
                errors.push(e);
            }
        }
        for &name in services {
            if let Err(e) = self.unload(name) {
                errors.push(e);
            }
        }
        errors
    }

    /// Status of a service, or `None` if it is not loaded.
    pub fn status(&self, name: &str) -> Option<ServiceStatus> {
        self.services.get(name).map(|hosted| hosted.status)
    }

    /// Number of open connections to a service.
    pub fn connections(&self, name: &str) -> usize {
        self.services
            .get(name)
            .map_or(0, |hosted| hosted.connections.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Userdata;
    use parking_lot::Mutex;

    /// Records every hook call in order.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        fn push(&self, call: impl Into<String>) {
            self.calls.lock().push(call.into());
        }
    }

    impl Service for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn description(&self) -> &'static str {
            "Records hook calls."
        }

        fn on_load(&self) {
            self.push("load");
        }

        fn on_unload(&self) {
            self.push("unload");
        }

        fn on_start(&self) {
            self.push("start");
        }

        fn on_stop(&self) {
            self.push("stop");
        }

        fn on_connect(&self, id: ConnectionId, _remote: Endpoint) -> Option<Userdata> {
            self.push(format!("connect {id}"));
            Some(Box::new(id.get() * 10))
        }

        fn on_disconnect(&self, id: ConnectionId, userdata: Option<Userdata>) {
            let data = userdata
                .and_then(|d| d.downcast::<u64>().ok())
                .map_or(0, |d| *d);
            self.push(format!("disconnect {id} {data}"));
        }
    }

    /// Writes every frame it receives straight back.
    struct Echo;

    impl Service for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echoes frames."
        }

        fn on_connect(&self, _id: ConnectionId, mut remote: Endpoint) -> Option<Userdata> {
            tokio::spawn(async move {
                while let Some(frame) = remote.recv().await {
                    if remote.send(frame).await.is_err() {
                        break;
                    }
                }
            });
            None
        }
    }

    fn loaded() -> (ServiceHost, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let mut host = ServiceHost::new();
        host.load(recorder.clone()).unwrap();
        (host, recorder)
    }

    #[test]
    fn full_lifecycle_runs_hooks_in_order() {
        let (mut host, recorder) = loaded();
        assert_eq!(host.status("recorder"), Some(ServiceStatus::Ready));

        host.start("recorder").unwrap();
        let conn = host.connect("recorder").unwrap();
        assert_eq!(conn.userdata().and_then(|d| d.downcast_ref::<u64>()), Some(&10));
        assert_eq!(host.connections("recorder"), 1);

        host.disconnect(conn).unwrap();
        host.stop("recorder").unwrap();
        host.unload("recorder").unwrap();

        assert_eq!(
            recorder.calls(),
            [
                "load",
                "start",
                "connect #1",
                "disconnect #1 10",
                "stop",
                "unload"
            ]
        );
        assert_eq!(host.status("recorder"), None);
    }

    #[test]
    fn double_load_rejected() {
        let (mut host, recorder) = loaded();
        assert_eq!(
            host.load(recorder.clone()),
            Err(ServiceError::AlreadyLoaded("recorder".into()))
        );
        assert_eq!(recorder.calls(), ["load"]);
    }

    #[test]
    fn unload_requires_load() {
        let mut host = ServiceHost::new();
        assert_eq!(
            host.unload("recorder"),
            Err(ServiceError::NotLoaded("recorder".into()))
        );
    }

    #[test]
    fn start_twice_is_not_ready() {
        let (mut host, _recorder) = loaded();
        host.start("recorder").unwrap();
        assert_eq!(
            host.start("recorder"),
            Err(ServiceError::NotReady("recorder".into()))
        );
        assert_eq!(
            ServiceHost::new().start("ghost"),
            Err(ServiceError::NotReady("ghost".into()))
        );
    }

    #[test]
    fn stop_requires_started() {
        let (mut host, _recorder) = loaded();
        assert_eq!(
            host.stop("recorder"),
            Err(ServiceError::NotStarted("recorder".into()))
        );
        host.start("recorder").unwrap();
        host.stop("recorder").unwrap();
        assert_eq!(
            host.stop("recorder"),
            Err(ServiceError::NotStarted("recorder".into()))
        );
    }

    #[test]
    fn stopped_service_can_restart() {
        let (mut host, _recorder) = loaded();
        host.start("recorder").unwrap();
        host.stop("recorder").unwrap();
        assert_eq!(host.status("recorder"), Some(ServiceStatus::Stopped));
        host.start("recorder").unwrap();
        assert_eq!(host.status("recorder"), Some(ServiceStatus::Started));
    }

    #[test]
    fn connect_requires_running_service() {
        let (mut host, _recorder) = loaded();
        assert_eq!(
            host.connect("recorder").unwrap_err(),
            ServiceError::NotRunning("recorder".into())
        );
        assert_eq!(
            host.connect("ghost").unwrap_err(),
            ServiceError::NotLoaded("ghost".into())
        );
    }

    #[test]
    fn stop_with_outstanding_connection_still_stops() {
        let (mut host, _recorder) = loaded();
        host.start("recorder").unwrap();
        let conn = host.connect("recorder").unwrap();

        host.stop("recorder").unwrap();
        assert_eq!(host.status("recorder"), Some(ServiceStatus::Stopped));
        assert_eq!(host.connections("recorder"), 1);

        host.disconnect(conn).unwrap();
        assert_eq!(host.connections("recorder"), 0);
    }

    #[test]
    fn disconnect_after_unload_is_unknown() {
        let (mut host, recorder) = loaded();
        host.start("recorder").unwrap();
        let conn = host.connect("recorder").unwrap();
        host.unload("recorder").unwrap();

        assert_eq!(
            host.disconnect(conn),
            Err(ServiceError::UnknownConnection(1))
        );
        assert!(!recorder.calls().iter().any(|c| c.starts_with("disconnect")));
    }

    #[test]
    fn disconnect_from_another_host_is_unknown() {
        let (mut a, _recorder_a) = loaded();
        let (mut b, recorder_b) = loaded();
        a.start("recorder").unwrap();
        b.start("recorder").unwrap();

        let from_a = a.connect("recorder").unwrap();
        let from_b = b.connect("recorder").unwrap();
        assert_eq!(from_a.id(), from_b.id());

        assert_eq!(b.disconnect(from_a), Err(ServiceError::UnknownConnection(1)));
        assert_eq!(b.connections("recorder"), 1);
        assert_eq!(a.connections("recorder"), 1);
        assert!(!recorder_b.calls().iter().any(|c| c.starts_with("disconnect")));

        b.disconnect(from_b).unwrap();
        assert_eq!(b.connections("recorder"), 0);
    }

    #[test]
    fn shutdown_keeps_going_past_failures() {
        let (mut host, recorder) = loaded();
        host.start("recorder").unwrap();
        let conn = host.connect("recorder").unwrap();

        let (mut other, _other_recorder) = loaded();
        other.start("recorder").unwrap();
        let stray = other.connect("recorder").unwrap();

        let errors = host.shutdown([stray, conn], &["recorder", "ghost"]);
        assert_eq!(
            errors,
            [
                ServiceError::UnknownConnection(1),
                ServiceError::NotLoaded("ghost".into())
            ]
        );
        assert_eq!(host.status("recorder"), None);
        assert_eq!(
            recorder.calls(),
            [
                "load",
                "start",
                "connect #1",
                "disconnect #1 10",
                "stop",
                "unload"
            ]
        );
    }

    #[test]
    fn shutdown_skips_stop_for_idle_services() {
        let (mut host, recorder) = loaded();
        assert!(host.shutdown(Vec::<Connection>::new(), &["recorder"]).is_empty());
        assert_eq!(recorder.calls(), ["load", "unload"]);
    }

    #[test]
    fn reload_starts_from_fresh_state() {
        let (mut host, recorder) = loaded();
        host.start("recorder").unwrap();
        host.unload("recorder").unwrap();
        host.load(recorder).unwrap();
        assert_eq!(host.status("recorder"), Some(ServiceStatus::Ready));
    }

    #[test]
    fn connection_ids_are_unique() {
        let (mut host, _recorder) = loaded();
        host.start("recorder").unwrap();
        let a = host.connect("recorder").unwrap();
        let b = host.connect("recorder").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn service_answers_over_its_endpoint() {
        let mut host = ServiceHost::new();
        host.load(Arc::new(Echo)).unwrap();
        host.start("echo").unwrap();

        let mut conn = host.connect("echo").unwrap();
        conn.local().send(b"ping".to_vec()).await.unwrap();
        assert_eq!(conn.local().recv().await, Some(b"ping".to_vec()));

        host.disconnect(conn).unwrap();
    }

    #[tokio::test]
    async fn dropping_the_remote_end_closes_the_connection() {
        let (mut host, _recorder) = loaded();
        host.start("recorder").unwrap();

        let mut conn = host.connect("recorder").unwrap();
        assert_eq!(conn.local().recv().await, None);
        assert_eq!(
            conn.local().send(b"hi".to_vec()).await,
            Err(ServiceError::ConnectionClosed(1))
        );
    }
}
