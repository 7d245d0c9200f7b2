//! Store configuration.
//!
//! # Responsibility
//! - Name the persistence key, payload version and allow-list.
//! - Carry the simulated latency per action class.
//!
//! # Invariants
//! - A validated config has a non-empty key and a non-empty allow-list
//!   without duplicates.

use crate::action::unit_of_work::{
    SimulatedLatency, DEFAULT_AUTH_LATENCY, DEFAULT_DATA_LATENCY,
};
use crate::slice::SliceName;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_PERSIST_KEY: &str = "timetracker";
pub const DEFAULT_PERSIST_VERSION: u32 = 1;
const STORAGE_KEY_PREFIX: &str = "persist:";

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    EmptyPersistKey,
    EmptyAllowList,
    DuplicateSlice(SliceName),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid store config: {err}"),
            Self::EmptyPersistKey => write!(f, "persist_key cannot be empty"),
            Self::EmptyAllowList => write!(f, "allow_list must name at least one slice"),
            Self::DuplicateSlice(name) => write!(f, "allow_list names `{name}` twice"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub persist_key: String,
    pub persist_version: u32,
    /// Slices written to storage after each commit and restored at startup.
    pub allow_list: Vec<SliceName>,
    pub auth_latency_ms: u64,
    pub data_latency_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist_key: DEFAULT_PERSIST_KEY.to_string(),
            persist_version: DEFAULT_PERSIST_VERSION,
            allow_list: vec![SliceName::Auth, SliceName::Projects, SliceName::Users],
            auth_latency_ms: duration_ms(DEFAULT_AUTH_LATENCY),
            data_latency_ms: duration_ms(DEFAULT_DATA_LATENCY),
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.persist_key.trim().is_empty() {
            return Err(ConfigError::EmptyPersistKey);
        }
        if self.allow_list.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        for (index, name) in self.allow_list.iter().enumerate() {
            if self.allow_list[..index].contains(name) {
                return Err(ConfigError::DuplicateSlice(*name));
            }
        }
        Ok(())
    }

    /// Key the snapshot is stored under (`persist:<persist_key>`).
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.persist_key)
    }

    pub fn persists(&self, slice: SliceName) -> bool {
        self.allow_list.contains(&slice)
    }

    pub fn latency(&self) -> SimulatedLatency {
        SimulatedLatency {
            auth: Duration::from_millis(self.auth_latency_ms),
            data: Duration::from_millis(self.data_latency_ms),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
