// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Heatmiser bridge.
//!
//! This module provides the error hierarchy used across the crate: channel
//! input validation, vendor client failures, status payload decoding and
//! configuration requests coming from the hub.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value written to a channel was rejected.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The vendor client failed to talk to the thermostat.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A status payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A configuration request was invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// No registered channel has the given GUID.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// No configured thermostat has the given name.
    #[error("thermostat not found: {0}")]
    ThermostatNotFound(String),

    /// The channel does not accept writes.
    #[error("channel {0} is read-only")]
    ReadOnlyChannel(String),
}

/// Errors raised when a channel write carries an unusable value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// The input could not be read as a number.
    #[error("not a number: {0}")]
    NotANumber(String),

    /// The number is not finite.
    #[error("temperature must be finite, got {0}")]
    NonFinite(f64),

    /// A hold duration was negative or too large.
    #[error("hold of {0} minutes is out of range")]
    HoldOutOfRange(i64),

    /// A hold time string did not follow `HH:MM`.
    #[error("invalid hold time: {0}")]
    InvalidHoldTime(String),
}

/// Errors surfaced by a [`ThermostatClient`](crate::protocol::ThermostatClient).
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Connecting to the thermostat failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The PIN was not accepted.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The thermostat refused the command.
    #[error("command rejected: {0}")]
    CommandRejected(String),

    /// The operation does not exist for this thermostat generation.
    #[error("{operation} is not supported by {kind} thermostats")]
    Unsupported {
        /// The operation that was attempted.
        operation: &'static str,
        /// The thermostat generation.
        kind: crate::types::ThermostatKind,
    },
}

/// Errors related to decoding a device control block.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// None of the candidate keys carried a value.
    #[error("missing field in status: {0}")]
    MissingField(String),

    /// A field had an unexpected shape.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to configuration requests from the hub.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The RPC method is not one the driver handles.
    #[error("unknown rpc method: {0}")]
    UnknownMethod(String),

    /// A required parameter was absent or empty.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter could not be parsed.
    #[error("invalid {field}: {value}")]
    InvalidParameter {
        /// The parameter name.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Two thermostat names reduce to the same device id.
    #[error("thermostat {name} shares its channels with {existing}")]
    DeviceIdConflict {
        /// The name that was rejected.
        name: String,
        /// The thermostat already using the device id.
        existing: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
