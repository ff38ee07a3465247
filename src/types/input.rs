// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Values written to channels by the hub.
//!
//! The hub is loosely typed: a target temperature may arrive as `21`, as
//! `"21.5"` or as `"21.5C"`. These helpers read the leading number the
//! same way a lenient UI would, and reject anything that has none.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::{HoldDuration, Temperature};

/// A raw value written to a channel.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::types::ChannelInput;
///
/// let input: ChannelInput = serde_json::from_str("\"19.5\"").unwrap();
/// assert_eq!(input.to_temperature().unwrap().celsius(), 19.5);
///
/// let input = ChannelInput::from("true");
/// assert!(input.to_away());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelInput {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// Free text.
    Text(String),
}

impl ChannelInput {
    /// Reads a target temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotANumber` when no leading number can be read,
    /// or `ValueError::NonFinite` for infinities.
    pub fn to_temperature(&self) -> Result<Temperature, ValueError> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => leading_float(s).ok_or_else(|| ValueError::NotANumber(s.clone()))?,
            Self::Bool(b) => return Err(ValueError::NotANumber(b.to_string())),
        };
        if value.is_nan() {
            return Err(ValueError::NotANumber(self.to_string()));
        }
        Temperature::new(value)
    }

    /// Reads a hold duration in whole minutes.
    ///
    /// Fractional numbers are truncated.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotANumber` when no leading integer can be read,
    /// or `ValueError::HoldOutOfRange` for negative or oversized holds.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_hold(&self) -> Result<HoldDuration, ValueError> {
        let minutes = match self {
            Self::Number(n) if n.is_finite() => n.trunc() as i64,
            Self::Text(s) => leading_integer(s).ok_or_else(|| ValueError::NotANumber(s.clone()))?,
            _ => return Err(ValueError::NotANumber(self.to_string())),
        };
        HoldDuration::from_signed(minutes)
    }

    /// Reads an away flag.
    ///
    /// Text is away only when it is exactly `"true"`.
    #[must_use]
    pub fn to_away(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => s == "true",
        }
    }
}

impl fmt::Display for ChannelInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ChannelInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ChannelInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for ChannelInput {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ChannelInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ChannelInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Length of the optional sign and digit run at the start of `s`.
fn integer_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 { 0 } else { sign + digits }
}

/// Parses the longest decimal number at the start of `s`.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    let mut end = sign + int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = bytes[end + 1 + exp_sign..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parses the integer at the start of `s`.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let len = integer_prefix_len(s);
    if len == 0 {
        return None;
    }
    s[..len].parse().ok()
}
