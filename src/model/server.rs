// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Local, TimeZone as _};
use serde::Deserialize;
use url::Url;

use super::DataLimit;

pub(crate) const DEFAULT_SERVER_NAME: &str = "Outline server";
pub(crate) const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The `/server` document as sent by the control API. Every field is
/// optional here; [`ServerInfo::new`] decides what an absent field means.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerPayload {
    name: Option<String>,
    server_id: Option<String>,
    metrics_enabled: Option<bool>,
    created_timestamp_ms: Option<i64>,
    version: Option<String>,
    access_key_data_limit: Option<DataLimit>,
    port_for_new_access_keys: Option<u16>,
    hostname_for_access_keys: Option<String>,
}

/// Local copy of the server configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ServerInfo {
    target: Url,
    pub(crate) name: String,
    pub(crate) server_id: String,
    pub(crate) metrics_enabled: bool,
    pub(crate) created_timestamp_ms: Option<i64>,
    /// `created_timestamp_ms` rendered in the local time zone, or empty if
    /// the server did not report one.
    pub(crate) created_at: String,
    pub(crate) version: String,
    /// `None` means keys are not limited server-wide.
    pub(crate) data_limit: Option<DataLimit>,
    pub(crate) port_for_new_access_keys: u16,
    pub(crate) hostname_for_access_keys: String,
}

impl ServerInfo {
    pub(crate) fn new(target: Url, payload: ServerPayload) -> Self {
        Self {
            target,
            name: payload
                .name
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_owned()),
            server_id: payload.server_id.unwrap_or_default(),
            metrics_enabled: payload.metrics_enabled.unwrap_or(false),
            created_timestamp_ms: payload.created_timestamp_ms,
            created_at: payload
                .created_timestamp_ms
                .map(format_timestamp_ms)
                .unwrap_or_default(),
            version: payload.version.unwrap_or_default(),
            data_limit: payload.access_key_data_limit,
            port_for_new_access_keys: payload.port_for_new_access_keys.unwrap_or(0),
            hostname_for_access_keys: payload.hostname_for_access_keys.unwrap_or_default(),
        }
    }

    /// The base URL this information was fetched from.
    pub(crate) const fn target(&self) -> &Url {
        &self.target
    }
}

fn format_timestamp_ms(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|t| t.format(CREATED_AT_FORMAT).to_string())
        .unwrap_or_default()
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TelemetryStatus {
    pub(crate) metrics_enabled: bool,
}
