// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One polled thermostat and its channels.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::channel::{ChannelDescriptor, ChannelKind, device_id};
use crate::error::{Error, ParseError, ProtocolError, Result};
use crate::event::{EventBus, HubEvent};
use crate::protocol::{Dcb, ThermostatClient, WifiWrite};
use crate::state::{StateChange, ThermostatState};
use crate::types::{ChannelInput, HoldDuration, Temperature, ThermostatKind};

/// Channels registered for one device id, kept across client rebuilds.
pub(crate) type SharedChannels = Arc<RwLock<Vec<ChannelDescriptor>>>;

/// A configured thermostat bound to its vendor client.
///
/// Channels are created on the first successful read for the device id,
/// so the floor channel only exists for thermostats that report a floor
/// sensor.
pub(crate) struct Thermostat<C> {
    name: String,
    device_id: String,
    client: C,
    channels: SharedChannels,
    state_tx: watch::Sender<ThermostatState>,
    event_bus: EventBus,
}

impl<C: ThermostatClient> Thermostat<C> {
    pub(crate) fn new(
        name: impl Into<String>,
        client: C,
        channels: SharedChannels,
        event_bus: EventBus,
    ) -> Self {
        let name = name.into();
        let (state_tx, _) = watch::channel(ThermostatState::new());
        Self {
            device_id: device_id(&name),
            name,
            client,
            channels,
            state_tx,
            event_bus,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn state(&self) -> ThermostatState {
        self.state_tx.borrow().clone()
    }

    pub(crate) fn watch_state(&self) -> watch::Receiver<ThermostatState> {
        self.state_tx.subscribe()
    }

    pub(crate) fn channels(&self) -> Vec<ChannelDescriptor> {
        self.channels.read().clone()
    }

    pub(crate) fn channel(&self, guid: &str) -> Option<ChannelDescriptor> {
        self.channels.read().iter().find(|c| c.guid == guid).cloned()
    }

    /// Reads the thermostat once and publishes the result.
    ///
    /// Failures are logged; the caller keeps polling.
    pub(crate) async fn fetch_status(&self) {
        info!(
            thermostat = %self.name,
            host = self.client.host(),
            port = self.client.port(),
            "Fetching thermostat status"
        );

        match self.client.read_device().await {
            Ok(data) => self.handle_status(&data.dcb),
            Err(e) => error!(thermostat = %self.name, error = %e, "Error reading thermostat data"),
        }
    }

    /// Like [`fetch_status`](Self::fetch_status) but returns the read error.
    pub(crate) async fn refresh(&self) -> Result<()> {
        let data = self.client.read_device().await?;
        self.handle_status(&data.dcb);
        Ok(())
    }

    fn handle_status(&self, dcb: &Dcb) {
        debug!(
            thermostat = %self.name,
            air = ?dcb.air_temperature().ok(),
            floor = ?dcb.floor_temperature().ok(),
            target = ?dcb.target_temperature().ok(),
            "Status received"
        );

        let channels = self.register_channels(dcb);

        let mut changes = Vec::with_capacity(channels.len());
        for channel in &channels {
            match StateChange::read(channel.kind, dcb) {
                Ok(change) => {
                    debug!(thermostat = %self.name, channel = %channel.kind, value = %change.value(), "Channel reading");
                    self.event_bus
                        .publish(HubEvent::data(channel.guid.clone(), change.value()));
                    changes.push(change);
                }
                Err(e) => {
                    debug!(thermostat = %self.name, channel = %channel.kind, error = %e, "Skipping channel");
                }
            }
        }

        self.state_tx
            .send_if_modified(|state| state.apply_all(&changes));
    }

    /// Registers the channels the first time this device id is read and
    /// returns them.
    fn register_channels(&self, dcb: &Dcb) -> Vec<ChannelDescriptor> {
        let mut channels = self.channels.write();
        if channels.is_empty() {
            info!(thermostat = %self.name, device_id = %self.device_id, "Creating channels");

            *channels = ChannelKind::ALL
                .iter()
                .filter(|kind| **kind != ChannelKind::FloorTemperature || dcb.has_floor_temperature())
                .map(|kind| kind.descriptor(&self.name, &self.device_id))
                .collect();

            for channel in channels.iter() {
                self.event_bus
                    .publish(HubEvent::register(self.name.clone(), channel.clone()));
            }
        }
        channels.clone()
    }

    /// Writes a hub value to one of this thermostat's channels.
    pub(crate) async fn write(&self, channel: &ChannelDescriptor, input: &ChannelInput) -> Result<()> {
        match channel.kind {
            ChannelKind::TargetTemperature => self.set_target(input).await,
            ChannelKind::Hold => self.set_hold(input).await,
            ChannelKind::Away => self.set_away(input).await,
            ChannelKind::Heating | ChannelKind::AirTemperature | ChannelKind::FloorTemperature => {
                Err(Error::ReadOnlyChannel(channel.guid.clone()))
            }
        }
    }

    async fn set_target(&self, input: &ChannelInput) -> Result<()> {
        let target = input.to_temperature().inspect_err(|_| {
            error!(thermostat = %self.name, value = %input, "Tried to set target temperature with a non-number");
        })?;

        self.remember(StateChange::TargetTemperature(target));
        debug!(thermostat = %self.name, %target, "Setting target temperature");

        let result = match self.client.kind() {
            ThermostatKind::Wifi => self.client.write_device(&WifiWrite::target(target)).await,
            ThermostatKind::NeoHub => {
                self.client
                    .set_temperature(target, &[self.name.clone()])
                    .await
            }
        };
        self.report("target temperature", &target, result)
    }

    async fn set_hold(&self, input: &ChannelInput) -> Result<()> {
        let hold = input.to_hold().inspect_err(|_| {
            error!(thermostat = %self.name, value = %input, "Tried to set temperature hold with a non-number");
        })?;

        debug!(thermostat = %self.name, minutes = hold.minutes(), "Setting temperature hold");

        let result = match self.client.kind() {
            ThermostatKind::Wifi => {
                self.remember(StateChange::Hold(hold));
                self.client.write_device(&WifiWrite::hold(hold)).await
            }
            ThermostatKind::NeoHub => {
                let target = self.neohub_hold_target()?;
                self.remember(StateChange::Hold(hold));
                self.client
                    .set_hold(
                        &self.device_id,
                        target,
                        hold.hours(),
                        hold.remainder_minutes(),
                        &[self.name.clone()],
                    )
                    .await
            }
        };
        self.report("temperature hold", &HoldMinutes(hold), result)
    }

    /// NeoHub holds a temperature, so the current set point must be known.
    fn neohub_hold_target(&self) -> Result<Temperature> {
        self.state_tx.borrow().target_temperature().ok_or_else(|| {
            error!(thermostat = %self.name, "Cannot set hold before the target temperature is known");
            Error::Parse(ParseError::MissingField("target temperature".to_string()))
        })
    }

    async fn set_away(&self, input: &ChannelInput) -> Result<()> {
        let away = input.to_away();

        debug!(thermostat = %self.name, away, "Setting away mode");
        self.remember(StateChange::Away(away));

        let result = match self.client.kind() {
            ThermostatKind::Wifi => self.client.write_device(&WifiWrite::away(away)).await,
            ThermostatKind::NeoHub => self.client.set_away(away, &[self.name.clone()]).await,
        };
        self.report("away mode", &away, result)
    }

    fn remember(&self, change: StateChange) {
        self.state_tx.send_if_modified(|state| state.apply(&change));
    }

    fn report(
        &self,
        what: &str,
        value: &dyn std::fmt::Display,
        result: std::result::Result<(), ProtocolError>,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                info!(thermostat = %self.name, "Set {what} to {value}");
                Ok(())
            }
            Err(e) => {
                error!(thermostat = %self.name, error = %e, "Error setting {what} to {value}");
                Err(e.into())
            }
        }
    }
}

/// Displays a hold as plain minutes in log lines.
struct HoldMinutes(HoldDuration);

impl std::fmt::Display for HoldMinutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} minutes", self.0.minutes())
    }
}
