// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration forms exchanged with the hub's settings UI.
//!
//! The hub renders a list of form elements and calls back into the driver
//! with an [`RpcRequest`] when the user submits it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::types::ThermostatKind;

use super::ThermostatConfig;

/// RPC method submitted by the "add thermostat" form.
pub const SET_CREDENTIALS: &str = "setCredentials";

/// One element of a configuration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormElement {
    /// Single-line text input.
    InputFieldText {
        /// Parameter name in the submitted RPC.
        field_name: String,
        /// Initial value.
        value: String,
        /// Label shown next to the input.
        label: String,
        /// Placeholder shown while empty.
        placeholder: String,
        /// Whether the field must be filled.
        required: bool,
    },
    /// Masked text input.
    InputFieldPassword {
        /// Parameter name in the submitted RPC.
        field_name: String,
        /// Initial value.
        value: String,
        /// Label shown next to the input.
        label: String,
        /// Placeholder shown while empty.
        placeholder: String,
        /// Whether the field must be filled.
        required: bool,
    },
    /// Drop-down list.
    InputFieldSelect {
        /// Parameter name in the submitted RPC.
        field_name: String,
        /// Label shown next to the list.
        label: String,
        /// Choices.
        options: Vec<SelectOption>,
        /// Whether a choice is required.
        required: bool,
    },
    /// Button submitting the form to `rpc_method`.
    Submit {
        /// Button caption.
        name: String,
        /// RPC method invoked on submit.
        rpc_method: String,
    },
    /// Static text.
    Paragraph {
        /// The text.
        text: String,
    },
    /// Button closing the dialog.
    Close {
        /// Button caption.
        text: String,
    },
}

/// A choice of an [`FormElement::InputFieldSelect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Caption.
    pub name: String,
    /// Submitted value.
    pub value: String,
    /// Whether the option is preselected.
    pub selected: bool,
}

/// A form returned to the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Form elements in display order.
    pub contents: Vec<FormElement>,
}

impl ConfigResponse {
    /// The "add thermostat" form.
    #[must_use]
    pub fn add_thermostat() -> Self {
        let text = |field_name: &str, value: &str, label: &str, placeholder: &str, required| {
            FormElement::InputFieldText {
                field_name: field_name.to_string(),
                value: value.to_string(),
                label: label.to_string(),
                placeholder: placeholder.to_string(),
                required,
            }
        };
        let option = |kind: ThermostatKind, name: &str| SelectOption {
            name: name.to_string(),
            value: kind.as_str().to_string(),
            selected: kind == ThermostatKind::default(),
        };
        let default_port = ThermostatKind::Wifi.default_port().to_string();

        Self {
            contents: vec![
                text("name", "", "Friendly name", "living room", false),
                text("host", "", "Heatmiser host", "", true),
                text("port", default_port.as_str(), "Heatmiser port", default_port.as_str(), true),
                FormElement::InputFieldPassword {
                    field_name: "pin".to_string(),
                    value: String::new(),
                    label: "Heatmiser pin".to_string(),
                    placeholder: String::new(),
                    required: true,
                },
                FormElement::InputFieldSelect {
                    field_name: "kind".to_string(),
                    label: "Thermostat type".to_string(),
                    options: vec![
                        option(ThermostatKind::Wifi, "WiFi thermostat"),
                        option(ThermostatKind::NeoHub, "NeoHub"),
                    ],
                    required: false,
                },
                FormElement::Submit {
                    name: "Add".to_string(),
                    rpc_method: SET_CREDENTIALS.to_string(),
                },
            ],
        }
    }

    /// Confirmation shown after saving.
    #[must_use]
    pub fn saved() -> Self {
        Self {
            contents: vec![
                FormElement::Paragraph {
                    text: "Successfully saved.".to_string(),
                },
                FormElement::Close {
                    text: "Close".to_string(),
                },
            ],
        }
    }
}

/// A form submission from the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Invoked method.
    pub method: String,
    /// Submitted fields.
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Thermostat settings submitted through the "add thermostat" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Name the thermostat is stored under.
    pub name: String,
    /// Connection settings.
    pub thermostat: ThermostatConfig,
}

impl Credentials {
    /// Reads the submitted fields.
    ///
    /// An empty name defaults to `host_port`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `host`, `port` or `pin` is missing or
    /// not usable.
    pub fn from_params(params: &Value) -> Result<Self, ConfigError> {
        let host = string_param(params, "host")
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingParameter("host"))?;
        let port = integer_param(params, "port")?;
        let pin = integer_param(params, "pin")?;
        let kind = match string_param(params, "kind") {
            Some(kind) => kind.parse()?,
            None => ThermostatKind::default(),
        };

        let name = match string_param(params, "name") {
            Some(name) if !name.is_empty() => name,
            _ => format!("{host}_{port}"),
        };

        Ok(Self {
            name,
            thermostat: ThermostatConfig {
                host,
                port,
                pin,
                kind,
            },
        })
    }
}

fn string_param(params: &Value, field: &str) -> Option<String> {
    match params.get(field)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer_param(params: &Value, field: &'static str) -> Result<u16, ConfigError> {
    let invalid = |value: &Value| ConfigError::InvalidParameter {
        field,
        value: value.to_string(),
    };

    let value = params
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(ConfigError::MissingParameter(field))?;

    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| invalid(value)),
        Value::String(s) if s.trim().is_empty() => Err(ConfigError::MissingParameter(field)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid(value)),
        _ => Err(invalid(value)),
    }
}
