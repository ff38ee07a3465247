// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events from the driver to the hub runtime.
//!
//! The hub learns about new channels, channel readings and configuration
//! changes by subscribing to the driver's [`EventBus`].
//!
//! # Examples
//!
//! ```
//! use heatmiser_bridge::event::{EventBus, HubEvent};
//! use heatmiser_bridge::config::DriverConfig;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(HubEvent::ConfigSaved(DriverConfig::default()));
//! ```

mod event_bus;
mod hub_event;

pub use event_bus::EventBus;
pub use hub_event::HubEvent;
