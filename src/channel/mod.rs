// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub channels.
//!
//! Each thermostat is exposed to the hub as a handful of channels, one
//! per attribute. A channel is identified by a GUID built from the
//! thermostat's device id and a per-kind suffix, e.g.
//! `heatmiserLivingRoomtarget`.

mod kind;

pub use kind::ChannelKind;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Derives a device id from a thermostat name.
///
/// Every character that is not an ASCII letter or digit is dropped.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::channel::device_id;
///
/// assert_eq!(device_id("Living Room #2"), "LivingRoom2");
/// assert_eq!(device_id("10.0.0.5_8068"), "100058068");
/// ```
#[must_use]
pub fn device_id(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// A channel as registered with the hub.
///
/// Serialized with the hub's short keys: `G` (GUID), `V` (vendor),
/// `D` (device type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelDescriptor {
    /// Channel GUID.
    #[serde(rename = "G")]
    pub guid: String,
    /// Display name.
    pub name: String,
    /// Vendor id.
    #[serde(rename = "V")]
    pub vendor: u32,
    /// Hub device type.
    #[serde(rename = "D")]
    pub device_type: u32,
    /// Whether the hub may read the channel.
    pub readable: bool,
    /// Whether the hub may write the channel.
    pub writable: bool,
    /// Which thermostat attribute this channel carries.
    #[serde(skip)]
    pub kind: ChannelKind,
}

/// A value emitted on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Number(f64),
    /// Text, used for boolean states.
    Text(String),
}

impl ChannelValue {
    /// Encodes a boolean as `"true"`/`"false"` text.
    #[must_use]
    pub fn flag(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
