//! The friend list operation.

use super::{Operation, OperationKind};
use crate::console::Console;
use crate::friends::FriendRegistry;
use crate::status::ExitStatus;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

pub const NOTICE: &str = "friend list";

pub struct FriendList {
    registry: Arc<dyn FriendRegistry>,
    console: Console,
}

impl FriendList {
    pub fn new(registry: Arc<dyn FriendRegistry>, console: Console) -> Self {
        Self { registry, console }
    }
}

#[async_trait]
impl Operation for FriendList {
    fn kind(&self) -> OperationKind {
        OperationKind::FriendList
    }

    async fn run(&mut self) -> ExitStatus {
        if let Err(e) = self.console.line(NOTICE) {
            error!(error = %e, "Failed to write notice");
            return ExitStatus::FAILURE;
        }

        let records = match self.registry.list().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, code = e.error_code(), "Failed to enumerate friends");
                return ExitStatus::REGISTRY;
            }
        };
        debug!(count = records.len(), "Enumerated friends");

        for record in &records {
            if let Err(e) = self.console.line(&format!("{}\t{}", record.id, record.name)) {
                error!(error = %e, "Failed to write friend record");
                return ExitStatus::FAILURE;
            }
        }
        ExitStatus::SUCCESS
    }
}
