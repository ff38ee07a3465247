// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last known thermostat state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{HoldDuration, Temperature};

use super::StateChange;

/// Cached values of every channel of one thermostat.
///
/// Fields stay `None` until the thermostat has reported them or the hub
/// has written them. NeoHub hold writes reuse the cached target, so the
/// target must be known before a hold can be set on a NeoHub zone.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::state::{StateChange, ThermostatState};
/// use heatmiser_bridge::types::Temperature;
///
/// let mut state = ThermostatState::new();
/// state.apply(&StateChange::TargetTemperature(Temperature::new(21.0).unwrap()));
/// assert_eq!(state.target_temperature().map(|t| t.celsius()), Some(21.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermostatState {
    heating: Option<bool>,
    air_temperature: Option<f64>,
    floor_temperature: Option<f64>,
    target_temperature: Option<Temperature>,
    hold: Option<HoldDuration>,
    away: Option<bool>,
    last_updated: Option<DateTime<Utc>>,
}

impl ThermostatState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Heating relay state.
    #[must_use]
    pub fn heating(&self) -> Option<bool> {
        self.heating
    }

    /// Air sensor reading.
    #[must_use]
    pub fn air_temperature(&self) -> Option<f64> {
        self.air_temperature
    }

    /// Floor sensor reading.
    #[must_use]
    pub fn floor_temperature(&self) -> Option<f64> {
        self.floor_temperature
    }

    /// Set point.
    #[must_use]
    pub fn target_temperature(&self) -> Option<Temperature> {
        self.target_temperature
    }

    /// Temperature hold.
    #[must_use]
    pub fn hold(&self) -> Option<HoldDuration> {
        self.hold
    }

    /// Away mode.
    #[must_use]
    pub fn away(&self) -> Option<bool> {
        self.away
    }

    /// When a change was last applied.
    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Applies a change.
    ///
    /// Returns `true` if the stored value differs afterwards.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        let changed = match change {
            StateChange::Heating(v) => replace(&mut self.heating, *v),
            StateChange::AirTemperature(v) => replace(&mut self.air_temperature, *v),
            StateChange::FloorTemperature(v) => replace(&mut self.floor_temperature, *v),
            StateChange::TargetTemperature(v) => replace(&mut self.target_temperature, *v),
            StateChange::Hold(v) => replace(&mut self.hold, *v),
            StateChange::Away(v) => replace(&mut self.away, *v),
        };
        self.last_updated = Some(Utc::now());
        changed
    }

    /// Applies several changes, returning `true` if any of them changed state.
    pub fn apply_all<'a>(&mut self, changes: impl IntoIterator<Item = &'a StateChange>) -> bool {
        changes
            .into_iter()
            .fold(false, |changed, change| self.apply(change) || changed)
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        false
    } else {
        *slot = Some(value);
        true
    }
}
