//! Device link abstraction.
//!
//! The `interact` operation talks to the robot through a [`DeviceLink`]. Only
//! in-process links exist: a loopback that simulates a connected robot and a
//! link that reports no physical driver.

use async_trait::async_trait;
use thiserror::Error;

pub mod loopback;

pub use loopback::{LoopbackDevice, UnavailableDevice};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("device unavailable: {0}")]
    Unavailable(String),
    #[error("device link is not open")]
    NotOpen,
    #[error("device link is already open")]
    AlreadyOpen,
    #[error("device disconnected")]
    Disconnected,
}

impl DeviceError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::NotOpen => "not_open",
            Self::AlreadyOpen => "already_open",
            Self::Disconnected => "disconnected",
        }
    }
}

/// Session handle to a robot.
#[async_trait]
pub trait DeviceLink: Send {
    /// Human-readable device label for logs.
    fn name(&self) -> &str;

    async fn open(&mut self) -> Result<(), DeviceError>;

    async fn send(&mut self, frame: &[u8]) -> Result<(), DeviceError>;

    /// Next frame from the device, or `None` when nothing is pending.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, DeviceError>;

    async fn close(&mut self) -> Result<(), DeviceError>;
}
