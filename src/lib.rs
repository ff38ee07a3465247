// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heatmiser bridge - expose Heatmiser thermostats as hub channels.
//!
//! This library connects Heatmiser WiFi thermostats and NeoHub zones to a
//! home-automation hub. Each thermostat is polled on a timer; its status
//! is translated into channels the hub understands, and values the hub
//! writes to those channels are sent back to the thermostat.
//!
//! # Channels
//!
//! | Channel            | GUID suffix | Writable |
//! |--------------------|-------------|----------|
//! | Heating            | `heating`   | no       |
//! | Air Temperature    | `current`   | no       |
//! | Floor Temperature  | `floor`     | no       |
//! | Target Temperature | `target`    | yes      |
//! | Hold in minutes    | `hold`      | yes      |
//! | Away mode          | `away`      | yes      |
//!
//! The floor channel is only created for thermostats that report a floor
//! sensor.
//!
//! # Integration
//!
//! The wire protocols are not implemented here. Provide a
//! [`protocol::ThermostatClient`] for your transport and a
//! [`protocol::ClientFactory`] building one per configured thermostat,
//! then hand both to a [`Driver`]:
//!
//! ```no_run
//! use heatmiser_bridge::config::{DriverConfig, ThermostatConfig};
//! use heatmiser_bridge::error::ProtocolError;
//! use heatmiser_bridge::protocol::{DeviceData, ThermostatClient};
//! use heatmiser_bridge::types::ThermostatKind;
//! use heatmiser_bridge::Driver;
//!
//! struct MyClient(ThermostatConfig);
//!
//! impl ThermostatClient for MyClient {
//!     fn kind(&self) -> ThermostatKind { self.0.kind }
//!     fn host(&self) -> &str { &self.0.host }
//!     fn port(&self) -> u16 { self.0.port }
//!
//!     async fn read_device(&self) -> Result<DeviceData, ProtocolError> {
//!         // talk to the thermostat here
//!         Ok(DeviceData::default())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> heatmiser_bridge::Result<()> {
//!     let config: DriverConfig = serde_json::from_str(r#"{
//!         "pollInterval": 30000,
//!         "thermostats": { "Hall": { "host": "192.168.1.20", "port": 8068, "pin": 1234 } }
//!     }"#).expect("valid config");
//!
//!     let driver = Driver::new(config, |_: &str, cfg: &ThermostatConfig| {
//!         Ok::<_, ProtocolError>(MyClient(cfg.clone()))
//!     });
//!
//!     let mut events = driver.subscribe();
//!     driver.start();
//!
//!     // Forward `events` to the hub; route hub writes back:
//!     driver.write("heatmiserHalltarget", 21.5).await?;
//!     # drop(events.try_recv());
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod protocol;
pub mod state;
pub mod types;

pub use channel::{ChannelDescriptor, ChannelKind, ChannelValue};
pub use config::{DriverConfig, ThermostatConfig};
pub use driver::Driver;
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{EventBus, HubEvent};
pub use protocol::{ClientFactory, Dcb, DeviceData, ThermostatClient, WifiWrite};
pub use state::{StateChange, ThermostatState};
pub use types::{ChannelInput, HoldDuration, Temperature, ThermostatKind};
