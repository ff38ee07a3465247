// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Events delivered to the hub.

use serde::Serialize;

use crate::channel::{ChannelDescriptor, ChannelValue};
use crate::config::DriverConfig;

/// Events emitted by the driver for the hub runtime.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::channel::ChannelValue;
/// use heatmiser_bridge::event::HubEvent;
///
/// let event = HubEvent::data("heatmiserhalltarget", ChannelValue::Number(21.0));
/// assert_eq!(event.guid(), Some("heatmiserhalltarget"));
/// assert!(event.is_data());
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEvent {
    /// A new channel should be added to the hub's device registry.
    Register {
        /// Name of the thermostat owning the channel.
        thermostat: String,
        /// The channel.
        channel: ChannelDescriptor,
    },

    /// A channel reported a value.
    Data {
        /// Channel GUID.
        guid: String,
        /// The value.
        value: ChannelValue,
    },

    /// The driver configuration changed and should be persisted.
    ConfigSaved(DriverConfig),
}

impl HubEvent {
    /// Creates a registration event.
    #[must_use]
    pub fn register(thermostat: impl Into<String>, channel: ChannelDescriptor) -> Self {
        Self::Register {
            thermostat: thermostat.into(),
            channel,
        }
    }

    /// Creates a data event.
    #[must_use]
    pub fn data(guid: impl Into<String>, value: ChannelValue) -> Self {
        Self::Data {
            guid: guid.into(),
            value,
        }
    }

    /// Returns the channel GUID for channel events.
    #[must_use]
    pub fn guid(&self) -> Option<&str> {
        match self {
            Self::Register { channel, .. } => Some(&channel.guid),
            Self::Data { guid, .. } => Some(guid),
            Self::ConfigSaved(_) => None,
        }
    }

    /// Returns `true` if this is a registration event.
    #[must_use]
    pub fn is_register(&self) -> bool {
        matches!(self, Self::Register { .. })
    }

    /// Returns `true` if this is a data event.
    #[must_use]
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}
