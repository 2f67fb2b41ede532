//! In-process device links.

use super::{DeviceError, DeviceLink};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Simulated robot that echoes every frame it is sent.
pub struct LoopbackDevice {
    name: String,
    open: bool,
    pending: VecDeque<Vec<u8>>,
}

impl LoopbackDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: false,
            pending: VecDeque::new(),
        }
    }
}

#[async_trait]
impl DeviceLink for LoopbackDevice {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open(&mut self) -> Result<(), DeviceError> {
        if self.open {
            return Err(DeviceError::AlreadyOpen);
        }
        self.open = true;
        Ok(())
    }

    async fn send(&mut self, frame: &[u8]) -> Result<(), DeviceError> {
        if !self.open {
            return Err(DeviceError::NotOpen);
        }
        self.pending.push_back(frame.to_vec());
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<Vec<u8>>, DeviceError> {
        if !self.open {
            return Err(DeviceError::NotOpen);
        }
        Ok(self.pending.pop_front())
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        if !self.open {
            return Err(DeviceError::NotOpen);
        }
        self.open = false;
        self.pending.clear();
        Ok(())
    }
}

/// Link used when no simulated robot is configured. Opening always fails.
pub struct UnavailableDevice {
    name: String,
}

impl UnavailableDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl DeviceLink for UnavailableDevice {
    fn name(&self) -> &str {
        &self.name
    }

    async fn open(&mut self) -> Result<(), DeviceError> {
        Err(DeviceError::Unavailable(format!(
            "no physical driver for \"{}\"",
            self.name
        )))
    }

    async fn send(&mut self, _frame: &[u8]) -> Result<(), DeviceError> {
        Err(DeviceError::NotOpen)
    }

    async fn recv(&mut self) -> Result<Option<Vec<u8>>, DeviceError> {
        Err(DeviceError::NotOpen)
    }

    async fn close(&mut self) -> Result<(), DeviceError> {
        Err(DeviceError::NotOpen)
    }
}
