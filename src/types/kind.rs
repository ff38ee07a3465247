// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The Heatmiser product generation a thermostat belongs to.
///
/// The generation decides both which status fields are read and how
/// writes are sent back: WiFi thermostats take a single structured write,
/// while NeoHub zones are driven through dedicated hub commands.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::types::ThermostatKind;
///
/// let kind: ThermostatKind = "neohub".parse().unwrap();
/// assert_eq!(kind, ThermostatKind::NeoHub);
/// assert_eq!(ThermostatKind::default().as_str(), "wifi");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatKind {
    /// Standalone WiFi thermostat (PRT/PRTHW/TM1 family).
    #[default]
    Wifi,
    /// Zone behind a NeoHub.
    NeoHub,
}

impl ThermostatKind {
    /// Returns the lowercase identifier used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::NeoHub => "neohub",
        }
    }

    /// Default TCP port for this generation.
    #[must_use]
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Wifi => 8068,
            Self::NeoHub => 4242,
        }
    }
}

impl fmt::Display for ThermostatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermostatKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wifi" | "" => Ok(Self::Wifi),
            "neohub" | "neo" => Ok(Self::NeoHub),
            _ => Err(ConfigError::InvalidParameter {
                field: "kind",
                value: s.to_string(),
            }),
        }
    }
}
