// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory thermostat client shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;

use heatmiser_bridge::config::ThermostatConfig;
use heatmiser_bridge::error::ProtocolError;
use heatmiser_bridge::event::HubEvent;
use heatmiser_bridge::protocol::{Dcb, DeviceData, ThermostatClient, WifiWrite};
use heatmiser_bridge::types::{Temperature, ThermostatKind};

/// A call recorded by [`FakeClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Write(WifiWrite),
    SetTemperature(f64, Vec<String>),
    SetHold {
        hold_id: String,
        target: f64,
        hours: u32,
        minutes: u32,
        zones: Vec<String>,
    },
    SetAway(bool, Vec<String>),
}

/// State shared between a test and the clients it hands to the driver.
#[derive(Debug, Default)]
pub struct FakeThermostat {
    status: Mutex<Option<Value>>,
    reads: Mutex<usize>,
    calls: Mutex<Vec<Call>>,
    fail_writes: Mutex<bool>,
}

impl FakeThermostat {
    pub fn new(status: Value) -> Arc<Self> {
        let fake = Arc::new(Self::default());
        fake.set_status(status);
        fake
    }

    pub fn offline() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_status(&self, status: Value) {
        *self.status.lock() = Some(status);
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock() = true;
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) -> Result<(), ProtocolError> {
        self.calls.lock().push(call);
        if *self.fail_writes.lock() {
            Err(ProtocolError::CommandRejected("busy".to_string()))
        } else {
            Ok(())
        }
    }
}

/// A [`ThermostatClient`] answering from a [`FakeThermostat`].
pub struct FakeClient {
    config: ThermostatConfig,
    fake: Arc<FakeThermostat>,
}

impl FakeClient {
    pub fn new(config: &ThermostatConfig, fake: Arc<FakeThermostat>) -> Self {
        Self {
            config: config.clone(),
            fake,
        }
    }
}

impl ThermostatClient for FakeClient {
    fn kind(&self) -> ThermostatKind {
        self.config.kind
    }

    fn host(&self) -> &str {
        &self.config.host
    }

    fn port(&self) -> u16 {
        self.config.port
    }

    async fn read_device(&self) -> Result<DeviceData, ProtocolError> {
        *self.fake.reads.lock() += 1;
        let status = self
            .fake
            .status
            .lock()
            .clone()
            .ok_or_else(|| ProtocolError::ConnectionFailed("no route to host".to_string()))?;
        let dcb = Dcb::from_value(status)
            .map_err(|e| ProtocolError::CommandRejected(e.to_string()))?;
        Ok(DeviceData::new(dcb))
    }

    async fn write_device(&self, request: &WifiWrite) -> Result<(), ProtocolError> {
        if self.config.kind != ThermostatKind::Wifi {
            return Err(ProtocolError::Unsupported {
                operation: "write_device",
                kind: self.config.kind,
            });
        }
        self.fake.record(Call::Write(request.clone()))
    }

    async fn set_temperature(
        &self,
        target: Temperature,
        zones: &[String],
    ) -> Result<(), ProtocolError> {
        self.fake
            .record(Call::SetTemperature(target.celsius(), zones.to_vec()))
    }

    async fn set_hold(
        &self,
        hold_id: &str,
        target: Temperature,
        hours: u32,
        minutes: u32,
        zones: &[String],
    ) -> Result<(), ProtocolError> {
        self.fake.record(Call::SetHold {
            hold_id: hold_id.to_string(),
            target: target.celsius(),
            hours,
            minutes,
            zones: zones.to_vec(),
        })
    }

    async fn set_away(&self, away: bool, zones: &[String]) -> Result<(), ProtocolError> {
        self.fake.record(Call::SetAway(away, zones.to_vec()))
    }
}

/// Collects every event already waiting on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<HubEvent>) -> Vec<HubEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// GUIDs of the registration events in `events`.
pub fn registered(events: &[HubEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.is_register())
        .filter_map(|e| e.guid().map(str::to_string))
        .collect()
}
