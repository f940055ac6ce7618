//! Gateway configuration, loaded from TOML

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use sensorlink_core::constants::{DEFAULT_MAX_BUFFER_LEN, MAX_FRAME_LEN};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub serial: SerialConfig,
    pub delivery: DeliveryConfig,
    pub poll: PollConfig,
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial device the node is attached to
    pub port: String,
    /// Must match the node's UART setting
    pub baud_rate: u32,
    /// How long a single read may block before counting as idle
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Endpoint receiving one POST per record
    pub url: Option<String>,
    /// Upper bound on a single delivery attempt
    pub timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Sleep between polls when no input is available
    pub idle_sleep_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { idle_sleep_ms: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Pending bytes tolerated before the frame buffer is reset
    pub max_buffer_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_buffer_len: DEFAULT_MAX_BUFFER_LEN,
        }
    }
}

impl GatewayConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: GatewayConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Reject settings under which no frame could ever be decoded
    pub fn validate(&self) -> Result<()> {
        if self.extractor.max_buffer_len < MAX_FRAME_LEN {
            bail!(
                "extractor.max_buffer_len = {} is shorter than the longest frame ({} bytes)",
                self.extractor.max_buffer_len,
                MAX_FRAME_LEN
            );
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.read_timeout_ms)
    }

    pub fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.poll.idle_sleep_ms)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery.timeout_secs)
    }
}
