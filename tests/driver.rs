// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Driver integration tests against an in-memory thermostat.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use common::{Call, FakeClient, FakeThermostat, drain, registered};
use heatmiser_bridge::config::{DriverConfig, FormElement, RpcRequest, ThermostatConfig};
use heatmiser_bridge::error::{ConfigError, Error, ParseError, ProtocolError, ValueError};
use heatmiser_bridge::event::HubEvent;
use heatmiser_bridge::protocol::{ClientFactory, WifiWrite};
use heatmiser_bridge::types::{HoldDuration, Temperature};
use heatmiser_bridge::{ChannelValue, Driver};

const POLL: Duration = Duration::from_secs(60);

fn wifi_status() -> Value {
    json!({
        "model": "PRT",
        "heating_on": true,
        "built_in_air_temp": 19.5,
        "floor_temp": 23.0,
        "set_room_temp": 21.0,
        "temp_hold_minutes": 0,
        "run_mode": "heating"
    })
}

fn neohub_status() -> Value {
    json!({
        "HEATING": false,
        "CURRENT_TEMPERATURE": "20.4",
        "CURRENT_SET_TEMPERATURE": "22.0",
        "HOLD_TIME": "00:00",
        "AWAY": false
    })
}

fn driver_with(
    thermostats: Vec<(&str, ThermostatConfig, Arc<FakeThermostat>)>,
) -> Driver<impl ClientFactory> {
    let mut config = DriverConfig::new().with_poll_interval(POLL);
    let mut fakes = HashMap::new();
    for (name, settings, fake) in thermostats {
        config = config.with_thermostat(name, settings);
        fakes.insert(name.to_string(), fake);
    }

    Driver::new(config, move |name: &str, settings: &ThermostatConfig| {
        fakes
            .get(name)
            .cloned()
            .map(|fake| FakeClient::new(settings, fake))
            .ok_or_else(|| ProtocolError::ConnectionFailed(format!("no client for {name}")))
    })
}

/// Builds a driver whose clients are picked by host; unknown hosts fail.
fn driver_by_host(
    config: DriverConfig,
    fakes: Vec<(&'static str, Arc<FakeThermostat>)>,
) -> Driver<impl ClientFactory> {
    let fakes: HashMap<&str, Arc<FakeThermostat>> = fakes.into_iter().collect();
    Driver::new(config, move |_: &str, settings: &ThermostatConfig| {
        fakes
            .get(settings.host.as_str())
            .cloned()
            .map(|fake| FakeClient::new(settings, fake))
            .ok_or_else(|| ProtocolError::ConnectionFailed(settings.host.clone()))
    })
}

fn credentials(name: &str, host: &str) -> RpcRequest {
    RpcRequest::new(
        "setCredentials",
        json!({ "name": name, "host": host, "port": "8068", "pin": "1234" }),
    )
}

fn wifi(host: &str) -> ThermostatConfig {
    ThermostatConfig::wifi(host, 8068, 1234)
}

fn neohub(host: &str) -> ThermostatConfig {
    ThermostatConfig::neohub(host, 0)
}

/// Lets spawned pollers run up to the next timer.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

fn data_for<'a>(events: &'a [HubEvent], guid: &str) -> Vec<&'a ChannelValue> {
    events
        .iter()
        .filter_map(|e| match e {
            HubEvent::Data { guid: g, value } if g == guid => Some(value),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Polling
// ============================================================================

mod polling {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn start_saves_config_then_registers_and_reports() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Living Room", wifi("10.0.0.2"), fake.clone())]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;

        let events = drain(&mut rx);
        assert!(matches!(&events[0], HubEvent::ConfigSaved(c) if c.thermostats.contains_key("Living Room")));

        assert_eq!(
            registered(&events),
            vec![
                "heatmiserLivingRoomheating",
                "heatmiserLivingRoomcurrent",
                "heatmiserLivingRoomfloor",
                "heatmiserLivingRoomtarget",
                "heatmiserLivingRoomhold",
                "heatmiserLivingRoomaway",
            ]
        );

        assert_eq!(
            data_for(&events, "heatmiserLivingRoomheating"),
            vec![&ChannelValue::Text("true".to_string())]
        );
        assert_eq!(
            data_for(&events, "heatmiserLivingRoomcurrent"),
            vec![&ChannelValue::Number(19.5)]
        );
        assert_eq!(
            data_for(&events, "heatmiserLivingRoomhold"),
            vec![&ChannelValue::Integer(0)]
        );
        assert_eq!(
            data_for(&events, "heatmiserLivingRoomaway"),
            vec![&ChannelValue::Text("false".to_string())]
        );
        assert_eq!(fake.reads(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn channel_names_follow_thermostat_name() {
        let driver = driver_with(vec![("Hall", wifi("h"), FakeThermostat::new(wifi_status()))]);
        driver.start();
        settle().await;

        let names: Vec<String> = driver.channels("Hall").into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Hall Heating",
                "Hall Air Temperature",
                "Hall Floor Temperature",
                "Hall Target Temperature",
                "Hall Hold in minutes",
                "Hall Away mode",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn polls_again_every_interval_without_re_registering() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;
        drain(&mut rx);

        fake.set_status(json!({
            "model": "PRT",
            "heating_on": false,
            "built_in_air_temp": 20.0,
            "floor_temp": 23.0,
            "set_room_temp": 21.0,
            "temp_hold_minutes": 0,
            "run_mode": "heating"
        }));
        tokio::time::sleep(POLL).await;

        let events = drain(&mut rx);
        assert_eq!(fake.reads(), 2);
        assert!(registered(&events).is_empty());
        assert_eq!(
            data_for(&events, "heatmiserHallcurrent"),
            vec![&ChannelValue::Number(20.0)]
        );
        assert_eq!(driver.state("Hall").unwrap().heating(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn no_floor_channel_without_floor_sensor() {
        let mut status = wifi_status();
        status["floor_temp"] = Value::Null;
        let driver = driver_with(vec![("Hall", wifi("h"), FakeThermostat::new(status))]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;

        let guids = registered(&drain(&mut rx));
        assert_eq!(guids.len(), 5);
        assert!(!guids.iter().any(|g| g.ends_with("floor")));
    }

    #[tokio::test(start_paused = true)]
    async fn neohub_string_fields_are_decoded() {
        let driver = driver_with(vec![("Kitchen", neohub("hub"), FakeThermostat::new(neohub_status()))]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;

        let events = drain(&mut rx);
        assert_eq!(
            data_for(&events, "heatmiserKitchencurrent"),
            vec![&ChannelValue::Number(20.4)]
        );
        assert_eq!(
            data_for(&events, "heatmiserKitchentarget"),
            vec![&ChannelValue::Number(22.0)]
        );

        let state = driver.state("Kitchen").unwrap();
        assert_eq!(state.target_temperature(), Some(Temperature::new(22.0).unwrap()));
        assert_eq!(state.hold(), Some(HoldDuration::default()));
        assert!(state.last_updated().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn read_errors_emit_nothing_and_polling_continues() {
        let fake = FakeThermostat::offline();
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;
        tokio::time::sleep(POLL).await;

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1, "only the config save: {events:?}");
        assert_eq!(fake.reads(), 2);
        assert!(driver.channels("Hall").is_empty());

        fake.set_status(wifi_status());
        tokio::time::sleep(POLL).await;
        assert_eq!(driver.channels("Hall").len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_field_skips_only_that_channel() {
        let mut status = wifi_status();
        status.as_object_mut().unwrap().remove("set_room_temp");
        let driver = driver_with(vec![("Hall", wifi("h"), FakeThermostat::new(status))]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;

        let events = drain(&mut rx);
        assert_eq!(registered(&events).len(), 6);
        assert!(data_for(&events, "heatmiserHalltarget").is_empty());
        assert_eq!(data_for(&events, "heatmiserHallcurrent").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn factory_failure_skips_only_that_thermostat() {
        let driver = driver_with(vec![("Hall", wifi("h"), FakeThermostat::new(wifi_status()))]);
        driver
            .config(Some(&RpcRequest::new(
                "setCredentials",
                json!({ "name": "Ghost", "host": "10.0.0.99", "port": "8068", "pin": "1" }),
            )))
            .unwrap();

        driver.start();
        settle().await;

        assert_eq!(driver.thermostat_names(), vec!["Hall"]);
        assert_eq!(driver.channels("Hall").len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_does_not_duplicate_pollers() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);

        driver.start();
        driver.start();
        settle().await;

        assert_eq!(fake.reads(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_polling() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);

        driver.start();
        settle().await;
        driver.shutdown();
        tokio::time::sleep(POLL * 3).await;

        assert_eq!(fake.reads(), 1);
        assert!(!driver.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_keeps_registered_channels() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;
        driver.shutdown();
        driver.start();
        settle().await;

        let events = drain(&mut rx);
        assert_eq!(fake.reads(), 2);
        assert_eq!(registered(&events).len(), 6);
        assert_eq!(data_for(&events, "heatmiserHalltarget").len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn names_sharing_a_device_id_register_once() {
        let spaced = FakeThermostat::new(wifi_status());
        let joined = FakeThermostat::new(wifi_status());
        let config = DriverConfig::new()
            .with_poll_interval(POLL)
            .with_thermostat("Living Room", wifi("10.0.0.1"))
            .with_thermostat("LivingRoom", wifi("10.0.0.2"));
        let driver = driver_by_host(
            config,
            vec![("10.0.0.1", spaced.clone()), ("10.0.0.2", joined.clone())],
        );
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;

        let events = drain(&mut rx);
        assert_eq!(registered(&events).len(), 6);
        assert_eq!(driver.thermostat_names(), vec!["Living Room"]);
        assert_eq!(joined.reads(), 0);

        driver.write("heatmiserLivingRoomtarget", 20.0).await.unwrap();
        assert_eq!(spaced.calls().len(), 1);
        assert!(joined.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_reads_outside_schedule() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);

        driver.start();
        settle().await;
        driver.refresh("Hall").await.unwrap();

        assert_eq!(fake.reads(), 2);
        assert!(matches!(
            driver.refresh("Attic").await,
            Err(Error::ThermostatNotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn watch_state_sees_updates() {
        let fake = FakeThermostat::new(wifi_status());
        let driver = driver_with(vec![("Hall", wifi("h"), fake.clone())]);

        driver.start();
        settle().await;
        let mut watch = driver.watch_state("Hall").unwrap();

        fake.set_status(json!({
            "model": "PRT",
            "heating_on": true,
            "built_in_air_temp": 18.0,
            "set_room_temp": 21.0,
            "temp_hold_minutes": 0,
            "run_mode": "frost_protection"
        }));
        tokio::time::sleep(POLL).await;

        assert!(watch.has_changed().unwrap());
        let state = watch.borrow_and_update().clone();
        assert_eq!(state.air_temperature(), Some(18.0));
        assert_eq!(state.away(), Some(true));
    }
}

// ============================================================================
// Channel writes
// ============================================================================

mod writes {
    use super::*;

    async fn started(
        name: &str,
        settings: ThermostatConfig,
        status: Value,
    ) -> (Driver<impl ClientFactory>, Arc<FakeThermostat>) {
        let fake = FakeThermostat::new(status);
        let driver = driver_with(vec![(name, settings, fake.clone())]);
        driver.start();
        settle().await;
        (driver, fake)
    }

    #[tokio::test(start_paused = true)]
    async fn wifi_target_is_written_as_heating_target() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;

        driver.write("heatmiserHalltarget", "22.5").await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::Write(WifiWrite::target(Temperature::new(22.5).unwrap()))]
        );
        assert_eq!(
            driver.state("Hall").unwrap().target_temperature(),
            Some(Temperature::new(22.5).unwrap())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn non_numeric_target_is_rejected_without_writing() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;

        let err = driver.write("heatmiserHalltarget", "warm").await.unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::NotANumber(_))));
        assert!(fake.calls().is_empty());
        assert_eq!(
            driver.state("Hall").unwrap().target_temperature(),
            Some(Temperature::new(21.0).unwrap())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn neohub_target_addresses_zone_by_name() {
        let (driver, fake) = started("Kitchen", neohub("hub"), neohub_status()).await;

        driver.write("heatmiserKitchentarget", 19).await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::SetTemperature(19.0, vec!["Kitchen".to_string()])]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wifi_hold_is_written_in_minutes() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;

        driver.write("heatmiserHallhold", "90").await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::Write(WifiWrite::hold(HoldDuration::from_minutes(90).unwrap()))]
        );
        assert_eq!(driver.state("Hall").unwrap().hold().map(|h| h.minutes()), Some(90));
    }

    #[tokio::test(start_paused = true)]
    async fn neohub_hold_uses_cached_target_and_splits_hours() {
        let (driver, fake) = started("Bed Room", neohub("hub"), neohub_status()).await;

        driver.write("heatmiserBedRoomhold", 125).await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::SetHold {
                hold_id: "BedRoom".to_string(),
                target: 22.0,
                hours: 2,
                minutes: 5,
                zones: vec!["Bed Room".to_string()],
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn neohub_hold_after_target_write_uses_new_target() {
        let (driver, fake) = started("Kitchen", neohub("hub"), neohub_status()).await;

        driver.write("heatmiserKitchentarget", 24.0).await.unwrap();
        driver.write("heatmiserKitchenhold", "30").await.unwrap();

        assert!(matches!(
            fake.calls().last(),
            Some(Call::SetHold { target, hours: 0, minutes: 30, .. }) if *target == 24.0
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn neohub_hold_without_known_target_fails() {
        let mut status = neohub_status();
        status.as_object_mut().unwrap().remove("CURRENT_SET_TEMPERATURE");
        let (driver, fake) = started("Kitchen", neohub("hub"), status).await;

        let err = driver.write("heatmiserKitchenhold", 60).await.unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn negative_hold_is_rejected() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;

        let err = driver.write("heatmiserHallhold", "-5").await.unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::HoldOutOfRange(-5))));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn wifi_away_sets_frost_protection() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;

        driver.write("heatmiserHallaway", "true").await.unwrap();
        driver.write("heatmiserHallaway", "no").await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![
                Call::Write(WifiWrite::away(true)),
                Call::Write(WifiWrite::away(false)),
            ]
        );
        assert_eq!(driver.state("Hall").unwrap().away(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn neohub_away_uses_set_away() {
        let (driver, fake) = started("Kitchen", neohub("hub"), neohub_status()).await;

        driver.write("heatmiserKitchenaway", true).await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::SetAway(true, vec!["Kitchen".to_string()])]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sensor_channels_are_read_only() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;

        for guid in ["heatmiserHallheating", "heatmiserHallcurrent", "heatmiserHallfloor"] {
            let err = driver.write(guid, 20).await.unwrap_err();
            assert!(matches!(err, Error::ReadOnlyChannel(ref g) if g == guid));
        }
        assert!(fake.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_channel() {
        let (driver, _fake) = started("Hall", wifi("h"), wifi_status()).await;

        let err = driver.write("heatmiserAtticaway", true).await.unwrap_err();
        assert!(matches!(err, Error::ChannelNotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_write_is_returned() {
        let (driver, fake) = started("Hall", wifi("h"), wifi_status()).await;
        fake.fail_writes();

        let err = driver.write("heatmiserHalltarget", 20).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::CommandRejected(_))));
    }
}

// ============================================================================
// Configuration RPC
// ============================================================================

mod configuration {
    use super::*;

    #[tokio::test]
    async fn without_request_returns_add_form() {
        let driver = driver_with(vec![]);

        let form = driver.config(None).unwrap();

        assert!(matches!(
            form.contents.last(),
            Some(FormElement::Submit { rpc_method, .. }) if rpc_method == "setCredentials"
        ));
    }

    #[tokio::test]
    async fn set_credentials_saves_thermostat() {
        let driver = driver_with(vec![]);
        let mut rx = driver.subscribe();

        let response = driver
            .config(Some(&RpcRequest::new(
                "setCredentials",
                json!({ "name": "", "host": "192.168.1.5", "port": "8068", "pin": "4321" }),
            )))
            .unwrap();

        assert!(matches!(
            &response.contents[0],
            FormElement::Paragraph { text } if text == "Successfully saved."
        ));

        let saved = driver.config_snapshot();
        assert_eq!(
            saved.thermostats["192.168.1.5_8068"],
            ThermostatConfig::wifi("192.168.1.5", 8068, 4321)
        );

        let events = drain(&mut rx);
        assert!(matches!(
            events.as_slice(),
            [HubEvent::ConfigSaved(c)] if c.thermostats.contains_key("192.168.1.5_8068")
        ));
        assert!(driver.thermostat_names().is_empty(), "not polled before start");
    }

    #[tokio::test(start_paused = true)]
    async fn thermostat_added_while_running_is_polled() {
        let attic = FakeThermostat::new(wifi_status());
        let fakes = HashMap::from([
            ("Hall".to_string(), FakeThermostat::new(wifi_status())),
            ("Attic".to_string(), attic.clone()),
        ]);
        let config = DriverConfig::new()
            .with_poll_interval(POLL)
            .with_thermostat("Hall", wifi("10.0.0.7"));
        let driver = Driver::new(config, move |name: &str, settings: &ThermostatConfig| {
            fakes
                .get(name)
                .cloned()
                .map(|fake| FakeClient::new(settings, fake))
                .ok_or_else(|| ProtocolError::ConnectionFailed(name.to_string()))
        });

        driver.start();
        settle().await;
        assert_eq!(attic.reads(), 0);

        driver
            .config(Some(&RpcRequest::new(
                "setCredentials",
                json!({ "name": "Attic", "host": "10.0.0.8", "port": 8068, "pin": 1 }),
            )))
            .unwrap();
        settle().await;

        assert_eq!(attic.reads(), 1);
        assert_eq!(driver.thermostat_names(), vec!["Attic", "Hall"]);
        assert_eq!(driver.channels("Attic").len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_running_thermostat_polls_new_host_only() {
        let old = FakeThermostat::new(wifi_status());
        let new = FakeThermostat::new(wifi_status());
        let config = DriverConfig::new()
            .with_poll_interval(POLL)
            .with_thermostat("Hall", wifi("10.0.0.7"));
        let driver = driver_by_host(config, vec![("10.0.0.7", old.clone()), ("10.0.0.9", new.clone())]);
        let mut rx = driver.subscribe();

        driver.start();
        settle().await;
        driver.config(Some(&credentials("Hall", "10.0.0.9"))).unwrap();
        settle().await;
        tokio::time::sleep(POLL).await;

        let events = drain(&mut rx);
        assert_eq!(registered(&events).len(), 6);
        assert_eq!(old.reads(), 1);
        assert_eq!(new.reads(), 2);
        assert_eq!(driver.channels("Hall").len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_replace_is_saved_and_stops_old_client() {
        let old = FakeThermostat::new(wifi_status());
        let config = DriverConfig::new()
            .with_poll_interval(POLL)
            .with_thermostat("Hall", wifi("10.0.0.7"));
        let driver = driver_by_host(config, vec![("10.0.0.7", old.clone())]);

        driver.start();
        settle().await;
        let mut rx = driver.subscribe();

        let response = driver.config(Some(&credentials("Hall", "bad"))).unwrap();
        tokio::time::sleep(POLL * 2).await;

        assert!(matches!(
            &response.contents[0],
            FormElement::Paragraph { text } if text == "Successfully saved."
        ));
        assert_eq!(driver.config_snapshot().thermostats["Hall"].host, "bad");
        assert!(matches!(drain(&mut rx).as_slice(), [HubEvent::ConfigSaved(_)]));
        assert_eq!(old.reads(), 1);
        assert!(driver.thermostat_names().is_empty());
    }

    #[tokio::test]
    async fn name_sharing_a_device_id_is_rejected() {
        let driver = driver_with(vec![("LivingRoom", wifi("h"), FakeThermostat::new(wifi_status()))]);
        let mut rx = driver.subscribe();

        let err = driver
            .config(Some(&credentials("Living Room", "10.0.0.2")))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::DeviceIdConflict { ref existing, .. }) if existing == "LivingRoom"
        ));
        assert!(!driver.config_snapshot().thermostats.contains_key("Living Room"));
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn invalid_parameters_are_rejected() {
        let driver = driver_with(vec![]);

        let err = driver
            .config(Some(&RpcRequest::new(
                "setCredentials",
                json!({ "host": "h", "port": "eighty", "pin": "1" }),
            )))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidParameter { field: "port", .. })
        ));
        assert!(driver.config_snapshot().thermostats.is_empty());
    }

    #[tokio::test]
    async fn unknown_method() {
        let driver = driver_with(vec![]);

        let err = driver
            .config(Some(&RpcRequest::new("reboot", Value::Null)))
            .unwrap_err();

        assert!(matches!(err, Error::Config(ConfigError::UnknownMethod(ref m)) if m == "reboot"));
    }
}
