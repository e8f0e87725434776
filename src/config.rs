//! Driver configuration.
//!
//! Layers, lowest priority first:
//!
//! 1. built-in defaults ([`DriverConfig::default`]);
//! 2. an optional TOML file (`bird_vna.toml` unless a path is given);
//! 3. environment variables prefixed `BIRD_VNA_`, nested keys split on
//!    `__` (`BIRD_VNA_SERIAL__BAUD_RATE=115200`).
//!
//! ```toml
//! resource = "TCPIP0::192.168.1.20::5025::SOCKET"
//! timeout = "2s"
//! error_queue_limit = 32
//!
//! [serial]
//! baud_rate = 115200
//!
//! [context]
//! channel = 1
//! trace = 1
//! ```

use std::{path::Path, time::Duration};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{error::Result, protocols::TransportError};

pub const DEFAULT_CONFIG_FILE: &str = "bird_vna.toml";
pub const ENV_PREFIX: &str = "BIRD_VNA_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// VISA-style resource string; required by `Vna::initialize_with`.
    pub resource: Option<String>,
    /// I/O timeout for every transport.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub write_termination: String,
    /// Single byte that ends a response.
    pub read_termination: String,
    /// Maximum `SYST:ERR?` reads per `get_error_list` call.
    pub error_queue_limit: usize,
    pub serial: SerialSettings,
    /// Addressing context applied right after the session opens.
    pub context: ContextSettings,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            resource: None,
            timeout: Duration::from_secs(5),
            write_termination: "\n".to_string(),
            read_termination: "\n".to_string(),
            error_queue_limit: 64,
            serial: SerialSettings::default(),
            context: ContextSettings::default(),
        }
    }
}

impl DriverConfig {
    /// The provider stack without extracting it, for callers that want to
    /// merge their own sources on top.
    pub fn figment<P: AsRef<Path>>(file: P) -> Figment {
        Figment::from(Serialized::defaults(DriverConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads from `bird_vna.toml` in the working directory (if present) and
    /// the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from<P: AsRef<Path>>(file: P) -> Result<Self> {
        Ok(Self::figment(file).extract()?)
    }

    pub fn with_resource<S: Into<String>>(mut self, resource: S) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn read_termination_byte(&self) -> std::result::Result<u8, TransportError> {
        match self.read_termination.as_bytes() {
            [b] => Ok(*b),
            _ => Err(TransportError::Termination(self.read_termination.clone())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParitySetting {
    None,
    Odd,
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowControlSetting {
    None,
    Software,
    Hardware,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    pub baud_rate: usize,
    pub data_bits: u8,
    pub parity: ParitySetting,
    pub stop_bits: u8,
    pub flow_control: FlowControlSetting,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            parity: ParitySetting::None,
            stop_bits: 1,
            flow_control: FlowControlSetting::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    pub channel: Option<u32>,
    pub trace: Option<u32>,
    pub marker: Option<u32>,
    pub port: Option<u32>,
}
