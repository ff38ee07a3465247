// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic status polling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::protocol::ThermostatClient;

use super::thermostat::Thermostat;

/// Shortest accepted poll period.
pub(crate) const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns the poll loop of one thermostat.
///
/// The first read happens immediately, then one every `every`. A slow
/// read delays the following ones instead of bunching them up.
pub(crate) fn spawn<C: ThermostatClient>(
    thermostat: Arc<Thermostat<C>>,
    every: Duration,
) -> JoinHandle<()> {
    let every = if every < MIN_POLL_INTERVAL {
        warn!(
            thermostat = thermostat.name(),
            requested_ms = u64::try_from(every.as_millis()).unwrap_or(u64::MAX),
            "Poll interval too short, using {MIN_POLL_INTERVAL:?}"
        );
        MIN_POLL_INTERVAL
    } else {
        every
    };

    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            thermostat.fetch_status().await;
        }
    })
}
