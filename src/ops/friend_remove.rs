//! The friend remove operation.

use super::{Operation, OperationKind};
use crate::console::Console;
use crate::friends::{FriendId, FriendRegistry, Removal};
use crate::status::ExitStatus;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const NOTICE: &str = "friend remove";

pub struct FriendRemove {
    registry: Arc<dyn FriendRegistry>,
    console: Console,
    target: Option<FriendId>,
}

impl FriendRemove {
    pub fn new(
        registry: Arc<dyn FriendRegistry>,
        console: Console,
        target: Option<FriendId>,
    ) -> Self {
        Self {
            registry,
            console,
            target,
        }
    }
}

#[async_trait]
impl Operation for FriendRemove {
    fn kind(&self) -> OperationKind {
        OperationKind::FriendRemove
    }

    async fn run(&mut self) -> ExitStatus {
        if let Err(e) = self.console.line(NOTICE) {
            error!(error = %e, "Failed to write notice");
            return ExitStatus::FAILURE;
        }

        let Some(target) = &self.target else {
            return ExitStatus::SUCCESS;
        };

        match self.registry.remove(target).await {
            Ok(Removal::Removed) => {
                info!(friend = %target, "Friend removed");
                ExitStatus::SUCCESS
            }
            Ok(Removal::NotFound) => {
                warn!(friend = %target, "No such friend");
                ExitStatus::NOT_FOUND
            }
            Err(e) => {
                error!(friend = %target, error = %e, code = e.error_code(), "Failed to remove friend");
                ExitStatus::REGISTRY
            }
        }
    }
}
