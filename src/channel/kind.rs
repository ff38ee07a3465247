// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The six channels exposed per thermostat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::protocol::Dcb;
use crate::state::StateChange;

use super::{ChannelDescriptor, ChannelValue};

/// Hub device type for temperature sensors.
const DEVICE_TYPE_TEMPERATURE: u32 = 9;
/// Hub device type for on/off state.
const DEVICE_TYPE_STATE: u32 = 244;
/// Hub device type for generic numeric values.
const DEVICE_TYPE_GENERIC: u32 = 2000;

/// One attribute of a thermostat exposed to the hub.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::channel::ChannelKind;
///
/// assert!(ChannelKind::TargetTemperature.is_writable());
/// assert!(!ChannelKind::AirTemperature.is_writable());
/// assert_eq!(ChannelKind::Hold.guid_suffix(), "hold");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Heating relay state.
    Heating,
    /// Built-in air sensor.
    AirTemperature,
    /// Floor sensor.
    FloorTemperature,
    /// Set point.
    TargetTemperature,
    /// Temperature hold in minutes.
    Hold,
    /// Away (frost protection) mode.
    Away,
}

impl ChannelKind {
    /// All channels in registration order.
    pub const ALL: [Self; 6] = [
        Self::Heating,
        Self::AirTemperature,
        Self::FloorTemperature,
        Self::TargetTemperature,
        Self::Hold,
        Self::Away,
    ];

    /// Suffix appended to the device id to form the channel GUID.
    #[must_use]
    pub const fn guid_suffix(&self) -> &'static str {
        match self {
            Self::Heating => "heating",
            Self::AirTemperature => "current",
            Self::FloorTemperature => "floor",
            Self::TargetTemperature => "target",
            Self::Hold => "hold",
            Self::Away => "away",
        }
    }

    /// Suffix appended to the thermostat name to form the channel name.
    #[must_use]
    pub const fn name_suffix(&self) -> &'static str {
        match self {
            Self::Heating => " Heating",
            Self::AirTemperature => " Air Temperature",
            Self::FloorTemperature => " Floor Temperature",
            Self::TargetTemperature => " Target Temperature",
            Self::Hold => " Hold in minutes",
            Self::Away => " Away mode",
        }
    }

    /// Hub device type.
    #[must_use]
    pub const fn device_type(&self) -> u32 {
        match self {
            Self::Heating | Self::Away => DEVICE_TYPE_STATE,
            Self::AirTemperature | Self::FloorTemperature | Self::TargetTemperature => {
                DEVICE_TYPE_TEMPERATURE
            }
            Self::Hold => DEVICE_TYPE_GENERIC,
        }
    }

    /// Returns `true` if the hub may write to this channel.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::TargetTemperature | Self::Hold | Self::Away)
    }

    /// Builds the descriptor registered with the hub.
    #[must_use]
    pub fn descriptor(&self, thermostat: &str, device_id: &str) -> ChannelDescriptor {
        ChannelDescriptor {
            guid: format!("heatmiser{device_id}{}", self.guid_suffix()),
            name: format!("{thermostat}{}", self.name_suffix()),
            vendor: 0,
            device_type: self.device_type(),
            readable: true,
            writable: self.is_writable(),
            kind: *self,
        }
    }

    /// Decodes this channel's value from a status payload.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the payload lacks or mangles the field.
    pub fn read(&self, dcb: &Dcb) -> Result<ChannelValue, ParseError> {
        StateChange::read(*self, dcb).map(|change| change.value())
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name_suffix().trim_start())
    }
}
