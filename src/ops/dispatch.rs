//! Operation dispatch.
//!
//! The [`Dispatcher`] resolves an operation name to an [`OperationKind`],
//! asks its [`OperationFactory`] for exactly one instance, runs it once, and
//! hands the status back untouched. Name resolution happens before anything
//! is built, so an unknown name never constructs an operation.

use super::{FriendList, FriendRemove, Interact, Operation, OperationArgs, OperationKind};
use crate::config::DeviceConfig;
use crate::console::Console;
use crate::device::{DeviceLink, LoopbackDevice, UnavailableDevice};
use crate::error::DispatchError;
use crate::friends::FriendRegistry;
use crate::status::ExitStatus;
use crate::telemetry::OperationTimer;
use std::sync::Arc;
use tracing::{Instrument, Level, debug, span, warn};

/// Builds operation instances on demand.
pub trait OperationFactory: Send + Sync {
    fn build(&self, kind: OperationKind, args: OperationArgs) -> Box<dyn Operation>;
}

/// Factory wiring operations to the configured collaborators.
pub struct StandardFactory {
    registry: Arc<dyn FriendRegistry>,
    device: DeviceConfig,
    console: Console,
}

impl StandardFactory {
    pub fn new(registry: Arc<dyn FriendRegistry>, device: DeviceConfig, console: Console) -> Self {
        Self {
            registry,
            device,
            console,
        }
    }

    /// A fresh device link per session.
    fn link(&self) -> Box<dyn DeviceLink> {
        if self.device.simulated {
            Box::new(LoopbackDevice::new(self.device.name.clone()))
        } else {
            Box::new(UnavailableDevice::new(self.device.name.clone()))
        }
    }
}

impl OperationFactory for StandardFactory {
    fn build(&self, kind: OperationKind, args: OperationArgs) -> Box<dyn Operation> {
        match kind {
            OperationKind::FriendList => Box::new(FriendList::new(
                Arc::clone(&self.registry),
                self.console.clone(),
            )),
            OperationKind::FriendRemove => Box::new(FriendRemove::new(
                Arc::clone(&self.registry),
                self.console.clone(),
                args.friend,
            )),
            OperationKind::Interact => Box::new(Interact::new(self.link(), self.console.clone())),
        }
    }
}

/// Resolves operation names and runs the selected operation.
pub struct Dispatcher<F = StandardFactory> {
    factory: F,
}

impl<F: OperationFactory> Dispatcher<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Run the operation called `name`.
    ///
    /// Returns the operation's own status verbatim, or
    /// [`DispatchError::UnknownOperation`] if nothing answers to `name`.
    pub async fn dispatch(
        &self,
        name: &str,
        args: OperationArgs,
    ) -> Result<ExitStatus, DispatchError> {
        let kind: OperationKind = name.parse().inspect_err(|e: &DispatchError| {
            debug!(operation = %name, code = e.error_code(), "Dispatch rejected");
        })?;

        let op_span = span!(
            Level::DEBUG,
            "op.dispatch",
            operation = %kind,
            friend = args.friend.as_ref().map(|id| id.as_str()),
        );

        let status = async {
            let _timer = OperationTimer::new(kind);
            let mut op = self.factory.build(kind, args);
            debug_assert_eq!(op.kind(), kind, "factory built the wrong operation");
            op.run().await
        }
        .instrument(op_span)
        .await;

        if status.is_success() {
            debug!(operation = %kind, status = %status, "Operation completed");
        } else {
            warn!(operation = %kind, status = %status, "Operation failed");
        }
        Ok(status)
    }
}
