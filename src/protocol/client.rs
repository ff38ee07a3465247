// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor client seam.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::ThermostatConfig;
use crate::error::ProtocolError;
use crate::types::{Temperature, ThermostatKind};

use super::{Dcb, WifiWrite};

/// Result of a successful status read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceData {
    /// The device control block.
    pub dcb: Dcb,
}

impl DeviceData {
    /// Wraps a control block.
    #[must_use]
    pub fn new(dcb: Dcb) -> Self {
        Self { dcb }
    }
}

/// A connection to one Heatmiser thermostat or NeoHub.
///
/// Implementations own the transport, authentication and framing. WiFi
/// thermostats are written through [`write_device`](Self::write_device);
/// NeoHub zones through the `set_*` commands, addressed by zone name.
/// Operations a generation does not have default to
/// [`ProtocolError::Unsupported`].
pub trait ThermostatClient: Send + Sync + 'static {
    /// The generation this client talks to.
    fn kind(&self) -> ThermostatKind;

    /// Host name or address of the thermostat.
    fn host(&self) -> &str;

    /// TCP port of the thermostat.
    fn port(&self) -> u16;

    /// Reads the current status.
    fn read_device(&self) -> impl Future<Output = Result<DeviceData, ProtocolError>> + Send;

    /// Writes a partial control block (WiFi).
    fn write_device(
        &self,
        _request: &WifiWrite,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send {
        let kind = self.kind();
        async move {
            Err(ProtocolError::Unsupported {
                operation: "write_device",
                kind,
            })
        }
    }

    /// Sets the target temperature of the named zones (NeoHub).
    fn set_temperature(
        &self,
        _target: Temperature,
        _zones: &[String],
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send {
        let kind = self.kind();
        async move {
            Err(ProtocolError::Unsupported {
                operation: "set_temperature",
                kind,
            })
        }
    }

    /// Holds `target` for `hours:minutes` on the named zones (NeoHub).
    fn set_hold(
        &self,
        _hold_id: &str,
        _target: Temperature,
        _hours: u32,
        _minutes: u32,
        _zones: &[String],
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send {
        let kind = self.kind();
        async move {
            Err(ProtocolError::Unsupported {
                operation: "set_hold",
                kind,
            })
        }
    }

    /// Switches the named zones in or out of away mode (NeoHub).
    fn set_away(
        &self,
        _away: bool,
        _zones: &[String],
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send {
        let kind = self.kind();
        async move {
            Err(ProtocolError::Unsupported {
                operation: "set_away",
                kind,
            })
        }
    }
}

/// Builds a client for each configured thermostat.
///
/// Closures of the form `Fn(&str, &ThermostatConfig) -> Result<C, ProtocolError>`
/// implement this trait.
pub trait ClientFactory: Send + Sync + 'static {
    /// The client type produced.
    type Client: ThermostatClient;

    /// Creates a client for the thermostat called `name`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the client cannot be set up.
    fn create(&self, name: &str, config: &ThermostatConfig) -> Result<Self::Client, ProtocolError>;
}

impl<F, C> ClientFactory for F
where
    F: Fn(&str, &ThermostatConfig) -> Result<C, ProtocolError> + Send + Sync + 'static,
    C: ThermostatClient,
{
    type Client = C;

    fn create(&self, name: &str, config: &ThermostatConfig) -> Result<C, ProtocolError> {
        self(name, config)
    }
}
