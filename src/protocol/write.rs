// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write requests for WiFi thermostats.

use serde::{Deserialize, Serialize};

use crate::types::{HoldDuration, Temperature};

/// Operating mode of a WiFi thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Normal heating schedule.
    Heating,
    /// Frost protection, used as "away".
    FrostProtection,
}

/// Heating section of a WiFi write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatingWrite {
    /// New set point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Temperature>,
    /// New hold duration in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<HoldDuration>,
}

/// A partial control block update sent to a WiFi thermostat.
///
/// Only the fields that are set are serialized.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::protocol::WifiWrite;
///
/// let write = WifiWrite::away(true);
/// assert_eq!(
///     serde_json::to_string(&write).unwrap(),
///     r#"{"away_mode":true,"run_mode":"frost_protection"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WifiWrite {
    /// Heating settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heating: Option<HeatingWrite>,
    /// Hot-water away flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_mode: Option<bool>,
    /// Heating run mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_mode: Option<RunMode>,
}

impl WifiWrite {
    /// Sets the target temperature.
    #[must_use]
    pub fn target(target: Temperature) -> Self {
        Self {
            heating: Some(HeatingWrite {
                target: Some(target),
                hold: None,
            }),
            ..Self::default()
        }
    }

    /// Sets the temperature hold.
    #[must_use]
    pub fn hold(hold: HoldDuration) -> Self {
        Self {
            heating: Some(HeatingWrite {
                target: None,
                hold: Some(hold),
            }),
            ..Self::default()
        }
    }

    /// Switches both hot water and heating between away and normal.
    #[must_use]
    pub fn away(away: bool) -> Self {
        Self {
            heating: None,
            away_mode: Some(away),
            run_mode: Some(if away {
                RunMode::FrostProtection
            } else {
                RunMode::Heating
            }),
        }
    }
}
