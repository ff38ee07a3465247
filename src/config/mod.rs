// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver configuration.
//!
//! The hub stores a [`DriverConfig`] and hands it to the driver on start.
//! New thermostats are added through the hub's settings UI: the driver
//! returns the form from [`ConfigResponse::add_thermostat`] and receives
//! the submitted values as an [`RpcRequest`].

mod driver_config;
mod form;

pub use driver_config::{DriverConfig, ThermostatConfig};
pub use form::{ConfigResponse, Credentials, FormElement, RpcRequest, SET_CREDENTIALS, SelectOption};
