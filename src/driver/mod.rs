// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The hub driver.
//!
//! [`Driver`] owns every configured thermostat. Once started it polls each
//! of them, registers their channels with the hub on the first successful
//! read, forwards every reading as a [`HubEvent::Data`] and routes channel
//! writes back to the right thermostat.
//!
//! # Examples
//!
//! ```no_run
//! use heatmiser_bridge::config::{DriverConfig, ThermostatConfig};
//! use heatmiser_bridge::driver::Driver;
//! use heatmiser_bridge::event::HubEvent;
//! # use heatmiser_bridge::error::ProtocolError;
//! # use heatmiser_bridge::protocol::{DeviceData, ThermostatClient};
//! # use heatmiser_bridge::types::ThermostatKind;
//! # struct Client(ThermostatConfig);
//! # impl ThermostatClient for Client {
//! #     fn kind(&self) -> ThermostatKind { self.0.kind }
//! #     fn host(&self) -> &str { &self.0.host }
//! #     fn port(&self) -> u16 { self.0.port }
//! #     async fn read_device(&self) -> Result<DeviceData, ProtocolError> {
//! #         Ok(DeviceData::default())
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> heatmiser_bridge::Result<()> {
//!     let config = DriverConfig::new()
//!         .with_thermostat("Hall", ThermostatConfig::wifi("192.168.1.20", 8068, 1234));
//!
//!     let driver = Driver::new(config, |_: &str, cfg: &ThermostatConfig| {
//!         Ok::<_, ProtocolError>(Client(cfg.clone()))
//!     });
//!
//!     let mut events = driver.subscribe();
//!     driver.start();
//!
//!     while let Ok(event) = events.recv().await {
//!         if let HubEvent::Data { guid, value } = event {
//!             println!("{guid} = {value}");
//!         }
//!     }
//!
//!     driver.write("heatmiserHalltarget", "21.5").await?;
//!     Ok(())
//! }
//! ```

mod poller;
mod thermostat;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::channel::{ChannelDescriptor, device_id};
use crate::config::{ConfigResponse, Credentials, DriverConfig, RpcRequest, SET_CREDENTIALS};
use crate::error::{ConfigError, Error, Result};
use crate::event::{EventBus, HubEvent};
use crate::protocol::ClientFactory;
use crate::state::ThermostatState;
use crate::types::ChannelInput;

use thermostat::{SharedChannels, Thermostat};

type ThermostatHandle<F> = Arc<Thermostat<<F as ClientFactory>::Client>>;

/// Bridges configured Heatmiser thermostats into the hub.
///
/// The driver does nothing until [`start`](Self::start) is called, which
/// the hub does once its own client is up. Dropping the driver stops all
/// polling.
pub struct Driver<F: ClientFactory> {
    config: RwLock<DriverConfig>,
    factory: F,
    thermostats: RwLock<HashMap<String, ThermostatHandle<F>>>,
    pollers: Mutex<HashMap<String, JoinHandle<()>>>,
    channels: Mutex<HashMap<String, SharedChannels>>,
    running: AtomicBool,
    event_bus: EventBus,
}

impl<F: ClientFactory> Driver<F> {
    /// Creates a driver for `config`, building vendor clients with `factory`.
    #[must_use]
    pub fn new(config: DriverConfig, factory: F) -> Self {
        Self {
            config: RwLock::new(config),
            factory,
            thermostats: RwLock::new(HashMap::new()),
            pollers: Mutex::new(HashMap::new()),
            channels: Mutex::new(HashMap::new()),
            running: AtomicBool::new(false),
            event_bus: EventBus::new(),
        }
    }

    /// Subscribes to events for the hub.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.event_bus.subscribe()
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config_snapshot(&self) -> DriverConfig {
        self.config.read().clone()
    }

    /// Returns `true` once [`start`](Self::start) has been called.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Starts polling every configured thermostat.
    ///
    /// Persists the configuration first. Thermostats whose client cannot
    /// be created, or whose name reduces to the device id of one already
    /// polled, are logged and skipped. Calling `start` again has no
    /// effect.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            debug!("Driver already started");
            return;
        }

        self.save();

        let names: Vec<String> = self.config.read().thermostats.keys().cloned().collect();
        for name in names {
            if let Err(e) = self.poll(&name) {
                error!(thermostat = %name, error = %e, "Failed to start polling");
            }
        }
    }

    /// Stops all polling.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::Release);
        for (name, handle) in self.pollers.lock().drain() {
            debug!(thermostat = %name, "Stopping poller");
            handle.abort();
        }
    }

    /// Answers a configuration request from the hub.
    ///
    /// Without a request, returns the "add thermostat" form. With a
    /// `setCredentials` request, stores the submitted thermostat, persists
    /// the configuration and, if the driver is running, starts polling it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown methods or unusable parameters.
    pub fn config(&self, rpc: Option<&RpcRequest>) -> Result<ConfigResponse> {
        let Some(rpc) = rpc else {
            return Ok(ConfigResponse::add_thermostat());
        };

        match rpc.method.as_str() {
            SET_CREDENTIALS => {
                debug!("setCredentials");
                let Credentials { name, thermostat } = Credentials::from_params(&rpc.params)?;

                let existing = conflicting_name(self.config.read().thermostats.keys(), &name);
                if let Some(existing) = existing {
                    warn!(thermostat = %name, existing = %existing, "Thermostat name clashes with an existing device id");
                    return Err(ConfigError::DeviceIdConflict { name, existing }.into());
                }

                info!(thermostat = %name, host = %thermostat.host, port = thermostat.port, "Saving thermostat");
                self.config
                    .write()
                    .thermostats
                    .insert(name.clone(), thermostat);
                self.save();

                if self.is_running()
                    && let Err(e) = self.poll(&name)
                {
                    error!(thermostat = %name, error = %e, "Failed to start polling");
                }

                Ok(ConfigResponse::saved())
            }
            other => {
                warn!(method = other, "Unknown rpc method");
                Err(ConfigError::UnknownMethod(other.to_string()).into())
            }
        }
    }

    /// Writes a hub value to the channel with the given GUID.
    ///
    /// # Errors
    ///
    /// Returns `Error::ChannelNotFound` for unknown GUIDs,
    /// `Error::ReadOnlyChannel` for sensors, `ValueError` for values the
    /// channel cannot take, and `ProtocolError` if the thermostat rejects
    /// the write.
    pub async fn write(&self, guid: &str, input: impl Into<ChannelInput>) -> Result<()> {
        let input = input.into();

        let found = self
            .thermostats
            .read()
            .values()
            .find_map(|t| t.channel(guid).map(|c| (Arc::clone(t), c)));

        let Some((thermostat, channel)) = found else {
            warn!(guid, "Write to unknown channel");
            return Err(Error::ChannelNotFound(guid.to_string()));
        };

        thermostat.write(&channel, &input).await
    }

    /// Reads one thermostat now, outside its poll schedule.
    ///
    /// # Errors
    ///
    /// Returns `Error::ThermostatNotFound` if it is not being polled, or the
    /// client's error if the read fails.
    pub async fn refresh(&self, name: &str) -> Result<()> {
        self.thermostat(name)?.refresh().await
    }

    /// Returns the last known state of a thermostat.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<ThermostatState> {
        self.thermostats.read().get(name).map(|t| t.state())
    }

    /// Watches the state of a thermostat.
    #[must_use]
    pub fn watch_state(&self, name: &str) -> Option<watch::Receiver<ThermostatState>> {
        self.thermostats.read().get(name).map(|t| t.watch_state())
    }

    /// Returns the channels registered for a thermostat.
    #[must_use]
    pub fn channels(&self, name: &str) -> Vec<ChannelDescriptor> {
        self.thermostats
            .read()
            .get(name)
            .map(|t| t.channels())
            .unwrap_or_default()
    }

    /// Names of the thermostats being polled.
    #[must_use]
    pub fn thermostat_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.thermostats.read().keys().cloned().collect();
        names.sort();
        names
    }

    fn thermostat(&self, name: &str) -> Result<ThermostatHandle<F>> {
        self.thermostats
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ThermostatNotFound(name.to_string()))
    }

    fn save(&self) {
        self.event_bus
            .publish(HubEvent::ConfigSaved(self.config_snapshot()));
    }

    /// Stops polling `name` and forgets its client.
    fn stop(&self, name: &str) {
        if let Some(handle) = self.pollers.lock().remove(name) {
            debug!(thermostat = %name, "Stopping poller");
            handle.abort();
        }
        self.thermostats.write().remove(name);
    }

    /// Creates the client for `name` and (re)starts its poll loop.
    ///
    /// Any previous client for `name` is stopped first, even if the new
    /// one cannot be created. Channels already registered for the device
    /// id are reused.
    fn poll(&self, name: &str) -> Result<()> {
        let (settings, every) = {
            let config = self.config.read();
            let settings = config
                .thermostats
                .get(name)
                .cloned()
                .ok_or_else(|| Error::ThermostatNotFound(name.to_string()))?;
            (settings, config.poll_interval)
        };

        let existing = conflicting_name(self.thermostats.read().keys(), name);
        if let Some(existing) = existing {
            return Err(ConfigError::DeviceIdConflict {
                name: name.to_string(),
                existing,
            }
            .into());
        }

        self.stop(name);

        info!(thermostat = %name, host = %settings.host, port = settings.port, kind = %settings.kind, "Registering thermostat");

        let client = self.factory.create(name, &settings)?;
        let channels = Arc::clone(self.channels.lock().entry(device_id(name)).or_default());
        let thermostat = Arc::new(Thermostat::new(
            name,
            client,
            channels,
            self.event_bus.clone(),
        ));
        self.thermostats
            .write()
            .insert(name.to_string(), Arc::clone(&thermostat));

        let handle = poller::spawn(thermostat, every);
        self.pollers.lock().insert(name.to_string(), handle);
        Ok(())
    }
}

/// Returns another name in `names` with the same device id as `name`.
fn conflicting_name<'a>(names: impl IntoIterator<Item = &'a String>, name: &str) -> Option<String> {
    let id = device_id(name);
    names
        .into_iter()
        .find(|other| other.as_str() != name && device_id(other) == id)
        .cloned()
}

impl<F: ClientFactory> Drop for Driver<F> {
    fn drop(&mut self) {
        for handle in self.pollers.get_mut().values() {
            handle.abort();
        }
    }
}

impl<F: ClientFactory> std::fmt::Debug for Driver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("thermostats", &self.thermostat_names())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
