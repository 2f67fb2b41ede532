//! The monitor service.

use super::{ConnectionId, Endpoint, Service, Userdata};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{trace, warn};

pub const NAME: &str = "monitor";

/// Renders monitor views. Each connection is one attached view.
#[derive(Default)]
pub struct MonitorService {
    views: AtomicUsize,
}

/// Per-connection state: the view number and the service's end of the
/// connection.
struct View {
    number: usize,
    endpoint: Endpoint,
}

impl MonitorService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently attached views.
    pub fn views(&self) -> usize {
        self.views.load(Ordering::Relaxed)
    }

    /// First frame sent to a newly attached view.
    pub fn greeting(number: usize) -> Vec<u8> {
        format!("view {number}").into_bytes()
    }
}

impl Service for MonitorService {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "The monitor service renders monitor views."
    }

    fn on_load(&self) {
        trace!("Monitor service loaded");
    }

    fn on_start(&self) {
        trace!("Monitor service started");
    }

    fn on_stop(&self) {
        trace!("Monitor service stopping");
    }

    fn on_unload(&self) {
        trace!("Monitor service unloading");
    }

    fn on_connect(&self, id: ConnectionId, remote: Endpoint) -> Option<Userdata> {
        let number = self.views.fetch_add(1, Ordering::Relaxed) + 1;
        if let Err(e) = remote.try_send(Self::greeting(number)) {
            warn!(connection = %id, error = %e, "Failed to greet monitor view");
        }
        trace!(connection = %id, view = number, "Monitor view attached");
        Some(Box::new(View {
            number,
            endpoint: remote,
        }))
    }

    fn on_disconnect(&self, id: ConnectionId, userdata: Option<Userdata>) {
        let view = userdata.and_then(|d| d.downcast::<View>().ok());
        self.views.fetch_sub(1, Ordering::Relaxed);
        trace!(
            connection = %id,
            view = view.as_ref().map(|v| v.number),
            endpoint = ?view.as_ref().map(|v| v.endpoint.id()),
            "Monitor view detached"
        );
    }
}
