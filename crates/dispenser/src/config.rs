use serde::{Deserialize, Serialize};

/// Dispenser device settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispenserConfig {
    /// Send updates to the device (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Device address, `host[:port]` or a full `http://` URL
    #[serde(default = "default_address")]
    pub address: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DispenserConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            address: default_address(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_address() -> String {
    "192.168.241.163".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
