// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device control block decoding.
//!
//! A status read returns a flat JSON object whose keys depend on the
//! thermostat generation. NeoHub zones use upper-case keys
//! (`CURRENT_TEMPERATURE`, `HOLD_TIME`, ...) while WiFi thermostats use
//! the snake-case names of the control block (`built_in_air_temp`,
//! `temp_hold_minutes`, ...). Every accessor prefers the NeoHub key and
//! falls back to the WiFi key.
//!
//! NeoHub firmware reports temperatures as strings (`"21.4"`), WiFi
//! firmware as numbers; both are accepted.
//!
//! # Examples
//!
//! ```
//! use heatmiser_bridge::protocol::Dcb;
//!
//! let dcb: Dcb = serde_json::from_str(r#"{
//!     "CURRENT_TEMPERATURE": "20.9",
//!     "CURRENT_SET_TEMPERATURE": "21.0",
//!     "HOLD_TIME": "01:30",
//!     "HEATING": true,
//!     "AWAY": false
//! }"#).unwrap();
//!
//! assert_eq!(dcb.air_temperature().unwrap(), 20.9);
//! assert_eq!(dcb.hold().unwrap().minutes(), 90);
//! assert!(dcb.heating().unwrap());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::types::{HoldDuration, parse_hold_time};

/// `run_mode` value WiFi thermostats report while in away mode.
const FROST_PROTECTION: &str = "frost_protection";

/// Model name suffixes of WiFi units that control hot water.
const HOT_WATER_MODEL_SUFFIXES: [&str; 2] = ["HW", "TM1"];

/// A pair of keys naming one reading in both generations.
#[derive(Debug, Clone, Copy)]
struct FieldKeys {
    neohub: &'static str,
    wifi: &'static str,
}

const HEATING: FieldKeys = FieldKeys {
    neohub: "HEATING",
    wifi: "heating_on",
};
const AIR_TEMPERATURE: FieldKeys = FieldKeys {
    neohub: "CURRENT_TEMPERATURE",
    wifi: "built_in_air_temp",
};
const FLOOR_TEMPERATURE: FieldKeys = FieldKeys {
    neohub: "CURRENT_FLOOR_TEMPERATURE",
    wifi: "floor_temp",
};
const TARGET_TEMPERATURE: FieldKeys = FieldKeys {
    neohub: "CURRENT_SET_TEMPERATURE",
    wifi: "set_room_temp",
};
const HOLD: FieldKeys = FieldKeys {
    neohub: "HOLD_TIME",
    wifi: "temp_hold_minutes",
};

/// Raw status payload of one thermostat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dcb(Map<String, Value>);

impl Dcb {
    /// Wraps a decoded JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Decodes a status payload from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the raw value stored under `key`, ignoring nulls.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Picks the NeoHub key when set, otherwise the WiFi key.
    fn select(&self, keys: FieldKeys) -> Option<(&'static str, &Value)> {
        self.get(keys.neohub)
            .map(|v| (keys.neohub, v))
            .or_else(|| self.get(keys.wifi).map(|v| (keys.wifi, v)))
    }

    fn select_required(&self, keys: FieldKeys) -> Result<(&'static str, &Value), ParseError> {
        self.select(keys)
            .ok_or_else(|| ParseError::MissingField(format!("{}/{}", keys.neohub, keys.wifi)))
    }

    /// Whether the heating relay is currently on.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the field is missing or not boolean-like.
    pub fn heating(&self) -> Result<bool, ParseError> {
        let (key, value) = self.select_required(HEATING)?;
        as_bool(key, value)
    }

    /// Built-in air sensor reading.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the field is missing or not numeric.
    pub fn air_temperature(&self) -> Result<f64, ParseError> {
        let (key, value) = self.select_required(AIR_TEMPERATURE)?;
        as_number(key, value)
    }

    /// Floor sensor reading.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the field is missing or not numeric.
    pub fn floor_temperature(&self) -> Result<f64, ParseError> {
        let (key, value) = self.select_required(FLOOR_TEMPERATURE)?;
        as_number(key, value)
    }

    /// Returns `true` if the thermostat reports a floor sensor at all.
    #[must_use]
    pub fn has_floor_temperature(&self) -> bool {
        self.select(FLOOR_TEMPERATURE).is_some()
    }

    /// Current set point.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the field is missing or not numeric.
    pub fn target_temperature(&self) -> Result<f64, ParseError> {
        let (key, value) = self.select_required(TARGET_TEMPERATURE)?;
        as_number(key, value)
    }

    /// Remaining temperature hold.
    ///
    /// NeoHub reports `"HH:MM"`, WiFi a minute count.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the field is missing or malformed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn hold(&self) -> Result<HoldDuration, ParseError> {
        let (key, value) = self.select_required(HOLD)?;
        let invalid = |message: String| ParseError::InvalidValue {
            field: key.to_string(),
            message,
        };

        match value {
            Value::String(s) if key == HOLD.neohub => {
                parse_hold_time(s).map_err(|e| invalid(e.to_string()))
            }
            other => {
                let minutes = as_number(key, other)?;
                HoldDuration::from_signed(minutes.trunc() as i64).map_err(|e| invalid(e.to_string()))
            }
        }
    }

    /// Model name reported by WiFi thermostats (e.g. `PRTHW`).
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.get("model").and_then(Value::as_str)
    }

    /// Returns `true` for WiFi models that control hot water.
    #[must_use]
    pub fn is_hot_water_model(&self) -> bool {
        self.model()
            .is_some_and(|m| HOT_WATER_MODEL_SUFFIXES.iter().any(|s| m.ends_with(s)))
    }

    /// Whether the thermostat is in away (frost protection) mode.
    ///
    /// NeoHub reports `AWAY` directly. WiFi hot-water models carry an
    /// explicit `away_mode` flag; other WiFi models are away while their
    /// `run_mode` is frost protection.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if none of the relevant fields is present.
    pub fn away(&self) -> Result<bool, ParseError> {
        if let Some(value) = self.get("AWAY") {
            return as_bool("AWAY", value);
        }

        if self.is_hot_water_model() {
            let value = self
                .get("away_mode")
                .ok_or_else(|| ParseError::MissingField("away_mode".to_string()))?;
            return as_bool("away_mode", value);
        }

        let run_mode = self
            .get("run_mode")
            .ok_or_else(|| ParseError::MissingField("run_mode".to_string()))?;
        match run_mode {
            Value::String(mode) => Ok(mode == FROST_PROTECTION),
            _ => Err(ParseError::InvalidValue {
                field: "run_mode".to_string(),
                message: format!("expected a string, got {run_mode}"),
            }),
        }
    }
}

impl From<Map<String, Value>> for Dcb {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn as_number(key: &str, value: &Value) -> Result<f64, ParseError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f: &f64| f.is_finite()).ok_or_else(|| ParseError::InvalidValue {
        field: key.to_string(),
        message: format!("expected a number, got {value}"),
    })
}

fn as_bool(key: &str, value: &Value) -> Result<bool, ParseError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) if s == "true" || s == "1" => Ok(true),
        Value::String(s) if s == "false" || s == "0" => Ok(false),
        _ => Err(ParseError::InvalidValue {
            field: key.to_string(),
            message: format!("expected a boolean, got {value}"),
        }),
    }
}
