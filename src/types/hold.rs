// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature hold durations.
//!
//! WiFi thermostats report the hold as a plain minute count, NeoHub zones
//! as an `"HH:MM"` string. Both are normalised to [`HoldDuration`].
//!
//! # Examples
//!
//! ```
//! use heatmiser_bridge::types::{HoldDuration, parse_hold_time};
//!
//! let hold = parse_hold_time("01:30").unwrap();
//! assert_eq!(hold.minutes(), 90);
//! assert_eq!(hold.to_string(), "1:30");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A hold duration in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldDuration(u32);

impl HoldDuration {
    /// Largest hold the WiFi control block can store.
    pub const MAX_MINUTES: u32 = u16::MAX as u32;

    /// Creates a hold of the given number of minutes.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::HoldOutOfRange` above [`Self::MAX_MINUTES`].
    pub fn from_minutes(minutes: u32) -> Result<Self, ValueError> {
        if minutes > Self::MAX_MINUTES {
            return Err(ValueError::HoldOutOfRange(i64::from(minutes)));
        }
        Ok(Self(minutes))
    }

    /// Creates a hold from a signed minute count.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::HoldOutOfRange` for negative values or values
    /// above [`Self::MAX_MINUTES`].
    pub fn from_signed(minutes: i64) -> Result<Self, ValueError> {
        u32::try_from(minutes)
            .map_err(|_| ValueError::HoldOutOfRange(minutes))
            .and_then(Self::from_minutes)
    }

    /// Total minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.0
    }

    /// Whole hours.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.0 / 60
    }

    /// Minutes left over after [`hours`](Self::hours).
    #[must_use]
    pub const fn remainder_minutes(&self) -> u32 {
        self.0 % 60
    }

    /// Returns `true` when no hold is active.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for HoldDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hours(), self.remainder_minutes())
    }
}

/// Parses a NeoHub `"HH:MM"` hold time.
///
/// # Errors
///
/// Returns `ValueError::InvalidHoldTime` if the colon is missing, either
/// part is not a number, minutes exceed 59, or the total is longer than
/// [`HoldDuration::MAX_MINUTES`].
pub fn parse_hold_time(s: &str) -> Result<HoldDuration, ValueError> {
    let invalid = || ValueError::InvalidHoldTime(s.to_string());

    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.trim().parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;

    if minutes > 59 {
        return Err(invalid());
    }

    let total = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .ok_or_else(invalid)?;
    HoldDuration::from_minutes(total).map_err(|_| invalid())
}
