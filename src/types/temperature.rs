// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature values in degrees Celsius.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A finite temperature in degrees Celsius.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::types::Temperature;
///
/// let t = Temperature::new(21.5).unwrap();
/// assert_eq!(t.celsius(), 21.5);
/// assert!(Temperature::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a temperature.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFinite` for NaN or infinite values.
    pub fn new(celsius: f64) -> Result<Self, ValueError> {
        if celsius.is_finite() {
            Ok(Self(celsius))
        } else {
            Err(ValueError::NonFinite(celsius))
        }
    }

    /// Degrees Celsius.
    #[must_use]
    pub const fn celsius(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Temperature {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(value: Temperature) -> Self {
        value.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
