// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the bridge.
//!
//! # Types
//!
//! - [`ThermostatKind`] - WiFi or NeoHub generation
//! - [`Temperature`] - Finite temperature in degrees Celsius
//! - [`HoldDuration`] - Temperature hold in minutes
//! - [`ChannelInput`] - Loosely typed value written by the hub

mod hold;
mod input;
mod kind;
mod temperature;

pub use hold::{HoldDuration, parse_hold_time};
pub use input::ChannelInput;
pub use kind::ThermostatKind;
pub use temperature::Temperature;
