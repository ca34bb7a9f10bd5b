//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum concurrent active sessions per user. When a login would
    /// exceed this, the session with the oldest activity is evicted.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u32,
    /// Absolute session lifetime in hours. Fixed at creation; activity
    /// updates never extend it.
    #[serde(default = "default_absolute_timeout")]
    pub absolute_timeout_hours: u64,
    /// Interval for the expired-session sweep in minutes.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
    /// Whether the periodic sweep task runs. Lazy expiry-on-read still
    /// applies when disabled.
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            absolute_timeout_hours: default_absolute_timeout(),
            sweep_interval_minutes: default_sweep_interval(),
            sweep_enabled: default_true(),
        }
    }
}

fn default_max_sessions() -> u32 {
    3
}

fn default_absolute_timeout() -> u64 {
    24
}

fn default_sweep_interval() -> u64 {
    15
}

fn default_true() -> bool {
    true
}
