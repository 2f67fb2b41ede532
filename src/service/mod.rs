//! In-process services.
//!
//! A service is a component with a load/start/stop/unload lifecycle that
//! callers talk to over channel connections. The [`ServiceHost`] owns the
//! lifecycle state and enforces the transition rules; services only supply
//! hooks.
//!
//! ```text
//!        load              start               stop
//! (none) ─────► Ready ───────────► Started ──────────► Stopped
//!   ▲                                 ▲                    │
//!   │  unload (any loaded status)     └──────── start ─────┘
//!   └──────────────────────────────────
//! ```

pub mod client;
pub mod connection;
pub mod host;
pub mod monitor;

pub use client::ClientService;
pub use connection::{Connection, ConnectionId, Endpoint, Userdata};
pub use host::{ServiceHost, ServiceStatus};
pub use monitor::MonitorService;

/// Lifecycle hooks for a hosted service. All hooks default to no-ops.
pub trait Service: Send + Sync {
    /// Unique service name.
    fn name(&self) -> &'static str;

    /// One-line description, logged when the service starts.
    fn description(&self) -> &'static str;

    /// Called after the service loads.
    fn on_load(&self) {}

    /// Called before the service unloads.
    fn on_unload(&self) {}

    /// Called after the service starts.
    fn on_start(&self) {}

    /// Called before the service stops.
    fn on_stop(&self) {}

    /// Called when a client connects. `remote` is the service's end of the
    /// connection; dropping it closes the channel for the caller. The
    /// returned userdata travels with the connection and is handed back to
    /// [`Service::on_disconnect`].
    fn on_connect(&self, _id: ConnectionId, _remote: Endpoint) -> Option<Userdata> {
        None
    }

    /// Called when a client disconnects.
    fn on_disconnect(&self, _id: ConnectionId, _userdata: Option<Userdata>) {}
}
