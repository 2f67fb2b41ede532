//! The client service.

use super::{ConnectionId, Endpoint, Service, Userdata};
use tracing::trace;

pub const NAME: &str = "client";

/// Hosts the entry point. The requested operation is dispatched while this
/// service is running.
pub struct ClientService;

impl Service for ClientService {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "The client service hosts the entry point and dispatches the requested operation."
    }

    fn on_load(&self) {
        trace!("Client service loaded");
    }

    fn on_start(&self) {
        trace!("Client service started");
    }

    fn on_stop(&self) {
        trace!("Client service stopping");
    }

    fn on_unload(&self) {
        trace!("Client service unloading");
    }

    fn on_connect(&self, id: ConnectionId, _remote: Endpoint) -> Option<Userdata> {
        trace!(connection = %id, "Client service connection opened");
        None
    }
}
