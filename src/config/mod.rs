//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct and loading (Config, ConfigError)
//! - [`device`]: Robot link configuration (DeviceConfig)
//! - [`validation`]: Startup checks that report every problem at once

mod device;
mod types;
pub mod validation;

pub use device::DeviceConfig;
pub use types::{CONFIG_ENV, Config, ConfigError};
