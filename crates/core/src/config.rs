//! Run configuration, fixed once at startup and passed by reference.

use crate::poll::DeviceSelector;
use serde::{Deserialize, Serialize};

/// Log filter used when debugging is off and `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter used in debug mode when `RUST_LOG` is unset.
pub const DEBUG_LOG_FILTER: &str = "debug";

/// Options for one polling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Which devices to poll.
    pub selector: DeviceSelector,
    /// Zero each device's pulse counter after reading it.
    pub clear_counter: bool,
    /// Read the firmware version before the sensor value.
    pub show_version: bool,
    /// Emit raw report and descriptor traces.
    pub debug: bool,
}

impl PollConfig {
    /// Choose the `tracing` filter directive.
    ///
    /// An explicit, non-empty `env_filter` (normally `RUST_LOG`) always wins.
    pub fn log_filter(&self, env_filter: Option<&str>) -> String {
        match env_filter.map(str::trim).filter(|f| !f.is_empty()) {
            Some(filter) => filter.to_string(),
            None if self.debug => DEBUG_LOG_FILTER.to_string(),
            None => DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
