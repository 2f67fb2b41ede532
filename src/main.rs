//! cozmonaut - companion robot control.
//!
//! Boots the client and monitor services, dispatches the requested operation
//! and exits with the operation's status.

use clap::Parser;
use cozmonaut::cli::Cli;
use cozmonaut::config::Config;
use cozmonaut::console::Console;
use cozmonaut::friends::MemoryRegistry;
use cozmonaut::ops::{Dispatcher, OperationArgs, OperationKind, StandardFactory};
use cozmonaut::service::{ClientService, MonitorService, ServiceHost, client, monitor};
use cozmonaut::status::ExitStatus;
use cozmonaut::telemetry;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    telemetry::init();

    let cli = Cli::parse();
    let status = run(cli).await?;
    Ok(status.into())
}

async fn run(cli: Cli) -> anyhow::Result<ExitStatus> {
    // Load configuration
    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load config");
            return Ok(ExitStatus::CONFIG);
        }
    };

    info!(
        device = %config.device.name,
        simulated = config.device.simulated,
        friends = config.friends.len(),
        "Starting cozmonaut"
    );

    // Bring up services
    let mut host = ServiceHost::new();
    host.load(Arc::new(ClientService))?;
    host.load(Arc::new(MonitorService::new()))?;
    host.start(client::NAME)?;
    host.start(monitor::NAME)?;
    let mut monitor_conn = host.connect(monitor::NAME)?;
    if let Some(frame) = monitor_conn.local().try_recv() {
        debug!(
            connection = %monitor_conn.id(),
            frame = %String::from_utf8_lossy(&frame),
            "Monitor attached"
        );
    }

    // Dispatch the requested operation
    let registry = Arc::new(MemoryRegistry::new(config.friends));
    let dispatcher = Dispatcher::new(StandardFactory::new(
        registry,
        config.device,
        Console::stdout(),
    ));
    let args = OperationArgs { friend: cli.friend };
    let status = match dispatcher.dispatch(&cli.operation, args).await {
        Ok(status) => status,
        Err(e) => {
            let known: Vec<_> = OperationKind::ALL.iter().map(|k| k.name()).collect();
            error!(error = %e, code = e.error_code(), known = ?known, "Dispatch failed");
            e.exit_status()
        }
    };

    // Tear down in reverse order. Failures are logged; the status stands.
    for e in host.shutdown([monitor_conn], &[monitor::NAME, client::NAME]) {
        error!(error = %e, code = e.error_code(), "Service teardown failed");
    }

    info!(status = %status, "Exiting");
    Ok(status)
}
