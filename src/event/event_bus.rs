// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting hub events.

use tokio::sync::broadcast;

use super::HubEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus carrying driver events to the hub.
///
/// The `EventBus` uses tokio's broadcast channel so that the hub runtime
/// and any number of observers (loggers, tests) each get their own copy
/// of every event.
///
/// # Capacity
///
/// Each subscriber buffers at most 256 events by default. A subscriber
/// that falls further behind skips the oldest ones and sees
/// `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use heatmiser_bridge::channel::ChannelValue;
/// use heatmiser_bridge::event::{EventBus, HubEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(HubEvent::data("heatmiserhallcurrent", ChannelValue::Number(20.5)));
///
/// let event = rx.try_recv().unwrap();
/// assert!(event.is_data());
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HubEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event, dropping it when nobody listens.
    pub fn publish(&self, event: HubEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
