//! Robot link configuration.

use serde::Deserialize;

/// Device configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Device label used in logs.
    #[serde(default = "default_device_name")]
    pub name: String,
    /// Use the in-process loopback robot. With `false` there is no driver to
    /// open and `interact` reports a device failure.
    #[serde(default = "default_simulated")]
    pub simulated: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: default_device_name(),
            simulated: default_simulated(),
        }
    }
}

fn default_device_name() -> String {
    "cozmo".to_string()
}

fn default_simulated() -> bool {
    true
}
