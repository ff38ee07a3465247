// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat state tracking.
//!
//! - [`ThermostatState`] - Last known value of every channel
//! - [`StateChange`] - One decoded reading or accepted write

mod state_change;
mod thermostat_state;

pub use state_change::StateChange;
pub use thermostat_state::ThermostatState;
