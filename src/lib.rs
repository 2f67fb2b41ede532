//! cozmonaut - companion robot control.
//!
//! The core is the [`ops`] module: a single-method [`ops::Operation`] trait,
//! the three built-in operations and the [`ops::Dispatcher`] that selects and
//! runs one of them. The remaining modules are its collaborators.

pub mod cli;
pub mod config;
pub mod console;
pub mod device;
pub mod error;
pub mod friends;
pub mod ops;
pub mod service;
pub mod status;
pub mod telemetry;
