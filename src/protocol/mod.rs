// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary with the Heatmiser vendor client.
//!
//! The bridge does not speak the Heatmiser wire protocols itself. A
//! [`ThermostatClient`] implementation performs the reads and writes, and
//! a [`ClientFactory`] builds one per configured thermostat. This module
//! defines that seam together with the payload types crossing it:
//!
//! - [`DeviceData`] / [`Dcb`]: the status returned by a read
//! - [`WifiWrite`]: the partial control block sent to WiFi thermostats

mod client;
mod dcb;
mod write;

pub use client::{ClientFactory, DeviceData, ThermostatClient};
pub use dcb::Dcb;
pub use write::{HeatingWrite, RunMode, WifiWrite};
