// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver and thermostat configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::ThermostatKind;

/// Configuration of the whole driver, as persisted by the hub.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use heatmiser_bridge::config::{DriverConfig, ThermostatConfig};
///
/// let config: DriverConfig = serde_json::from_str(r#"{
///     "thermostats": {
///         "hall": { "host": "192.168.1.20", "port": 8068, "pin": 1234 }
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.poll_interval, Duration::from_secs(60));
/// assert_eq!(config.thermostats["hall"].port, 8068);
///
/// let config = DriverConfig::new()
///     .with_poll_interval(Duration::from_secs(30))
///     .with_thermostat("landing", ThermostatConfig::neohub("192.168.1.30", 0));
/// assert_eq!(config.thermostats.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverConfig {
    /// Configured thermostats, keyed by name.
    #[serde(default)]
    pub thermostats: BTreeMap<String, ThermostatConfig>,
    /// Time between two status reads of the same thermostat.
    #[serde(
        default = "default_poll_interval",
        serialize_with = "serialize_millis",
        deserialize_with = "deserialize_millis"
    )]
    pub poll_interval: Duration,
}

impl DriverConfig {
    /// Poll interval used when none is configured.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Adds or replaces a thermostat.
    #[must_use]
    pub fn with_thermostat(mut self, name: impl Into<String>, thermostat: ThermostatConfig) -> Self {
        self.thermostats.insert(name.into(), thermostat);
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            thermostats: BTreeMap::new(),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Connection settings of one thermostat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Access PIN.
    pub pin: u16,
    /// Product generation.
    #[serde(default)]
    pub kind: ThermostatKind,
}

impl ThermostatConfig {
    /// Creates a WiFi thermostat configuration.
    #[must_use]
    pub fn wifi(host: impl Into<String>, port: u16, pin: u16) -> Self {
        Self {
            host: host.into(),
            port,
            pin,
            kind: ThermostatKind::Wifi,
        }
    }

    /// Creates a NeoHub configuration on the default NeoHub port.
    #[must_use]
    pub fn neohub(host: impl Into<String>, pin: u16) -> Self {
        Self {
            host: host.into(),
            port: ThermostatKind::NeoHub.default_port(),
            pin,
            kind: ThermostatKind::NeoHub,
        }
    }

    /// Sets the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

fn default_poll_interval() -> Duration {
    DriverConfig::DEFAULT_POLL_INTERVAL
}

fn serialize_millis<S: Serializer>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    serializer.serialize_u64(millis)
}

/// Reads a millisecond count; zero falls back to the default interval.
fn deserialize_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let millis = u64::deserialize(deserializer)?;
    if millis == 0 {
        Ok(DriverConfig::DEFAULT_POLL_INTERVAL)
    } else {
        Ok(Duration::from_millis(millis))
    }
}
