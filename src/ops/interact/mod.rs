//! The interactive mode operation.

pub mod session;

pub use session::{Session, SessionError, SessionPhase, Termination};

use super::{Operation, OperationKind};
use crate::console::Console;
use crate::device::DeviceLink;
use crate::status::ExitStatus;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

pub const NOTICE: &str = "interact";

pub struct Interact {
    link: Box<dyn DeviceLink>,
    console: Console,
    session: Session,
    /// Set while the link is open and still owes a `close`.
    link_open: bool,
}

impl Interact {
    pub fn new(link: Box<dyn DeviceLink>, console: Console) -> Self {
        Self {
            link,
            console,
            session: Session::new(),
            link_open: false,
        }
    }

    /// Walk the session from Connecting to Terminated.
    async fn drive(&mut self) -> Result<Termination, SessionError> {
        debug!(device = %self.link.name(), phase = self.session.phase().label(), "Opening device link");
        if let Err(e) = self.link.open().await {
            warn!(device = %self.link.name(), error = %e, code = e.error_code(), "Device link failed to open");
            self.session.abort(Termination::DeviceDisconnected)?;
            return Ok(Termination::DeviceDisconnected);
        }
        self.link_open = true;

        self.session.activate()?;
        info!(device = %self.link.name(), "Session active");

        // No input loop yet: drain whatever the device already sent and leave.
        loop {
            match self.link.recv().await {
                Ok(Some(frame)) => debug!(bytes = frame.len(), "Discarding device frame"),
                Ok(None) => break,
                Err(e) => {
                    warn!(device = %self.link.name(), error = %e, "Device link dropped");
                    self.release_link().await;
                    self.session.abort(Termination::DeviceDisconnected)?;
                    return Ok(Termination::DeviceDisconnected);
                }
            }
        }

        self.session.begin_close(Termination::UserExit)?;
        debug!(device = %self.link.name(), phase = self.session.phase().label(), "Closing device link");
        self.link_open = false;
        if let Err(e) = self.link.close().await {
            warn!(device = %self.link.name(), error = %e, code = e.error_code(), "Device link failed to close");
            self.session.abort(Termination::DeviceDisconnected)?;
            return Ok(Termination::DeviceDisconnected);
        }

        self.session.finish()
    }

    /// Best-effort close of a link that is still open.
    async fn release_link(&mut self) {
        if !self.link_open {
            return;
        }
        self.link_open = false;
        if let Err(e) = self.link.close().await {
            warn!(device = %self.link.name(), error = %e, code = e.error_code(), "Device link failed to close");
        }
    }
}

#[async_trait]
impl Operation for Interact {
    fn kind(&self) -> OperationKind {
        OperationKind::Interact
    }

    async fn run(&mut self) -> ExitStatus {
        if let Err(e) = self.console.line(NOTICE) {
            error!(error = %e, "Failed to write notice");
            return ExitStatus::FAILURE;
        }

        let cause = match self.drive().await {
            Ok(cause) => cause,
            Err(e) => {
                error!(error = %e, "Session state machine violated");
                self.release_link().await;
                Termination::Fatal(e.to_string())
            }
        };

        info!(
            device = %self.link.name(),
            termination = cause.label(),
            "Session terminated"
        );
        cause.exit_status()
    }
}
