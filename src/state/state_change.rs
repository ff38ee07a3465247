// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is one decoded channel reading. Changes come from two
//! places: status polls, where each channel's field is read out of the
//! control block, and accepted channel writes.
//!
//! # Examples
//!
//! ```
//! use heatmiser_bridge::state::{StateChange, ThermostatState};
//!
//! let mut state = ThermostatState::new();
//!
//! // Apply returns true if state actually changed
//! assert!(state.apply(&StateChange::Away(true)));
//! assert!(!state.apply(&StateChange::Away(true)));
//! ```

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelKind, ChannelValue};
use crate::error::ParseError;
use crate::protocol::Dcb;
use crate::types::{HoldDuration, Temperature};

/// A new value for one thermostat attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// Heating relay switched.
    Heating(bool),
    /// Air sensor reading.
    AirTemperature(f64),
    /// Floor sensor reading.
    FloorTemperature(f64),
    /// Set point changed.
    TargetTemperature(Temperature),
    /// Hold changed.
    Hold(HoldDuration),
    /// Away mode toggled.
    Away(bool),
}

impl StateChange {
    /// Decodes the reading for `kind` from a status payload.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the field is missing or malformed.
    pub fn read(kind: ChannelKind, dcb: &Dcb) -> Result<Self, ParseError> {
        Ok(match kind {
            ChannelKind::Heating => Self::Heating(dcb.heating()?),
            ChannelKind::AirTemperature => Self::AirTemperature(dcb.air_temperature()?),
            ChannelKind::FloorTemperature => Self::FloorTemperature(dcb.floor_temperature()?),
            ChannelKind::TargetTemperature => {
                let celsius = dcb.target_temperature()?;
                let target = Temperature::new(celsius).map_err(|e| ParseError::InvalidValue {
                    field: "target temperature".to_string(),
                    message: e.to_string(),
                })?;
                Self::TargetTemperature(target)
            }
            ChannelKind::Hold => Self::Hold(dcb.hold()?),
            ChannelKind::Away => Self::Away(dcb.away()?),
        })
    }

    /// The channel this change belongs to.
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        match self {
            Self::Heating(_) => ChannelKind::Heating,
            Self::AirTemperature(_) => ChannelKind::AirTemperature,
            Self::FloorTemperature(_) => ChannelKind::FloorTemperature,
            Self::TargetTemperature(_) => ChannelKind::TargetTemperature,
            Self::Hold(_) => ChannelKind::Hold,
            Self::Away(_) => ChannelKind::Away,
        }
    }

    /// The value emitted to the hub for this change.
    #[must_use]
    pub fn value(&self) -> ChannelValue {
        match self {
            Self::Heating(on) | Self::Away(on) => ChannelValue::flag(*on),
            Self::AirTemperature(t) | Self::FloorTemperature(t) => ChannelValue::Number(*t),
            Self::TargetTemperature(t) => ChannelValue::Number(t.celsius()),
            Self::Hold(h) => ChannelValue::Integer(i64::from(h.minutes())),
        }
    }
}
