// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::Deserialize;
use tabled::Tabled;

use super::{format_data_limit, DataLimit};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessKeyPayload {
    id: String,
    name: Option<String>,
    password: Option<SecretString>,
    port: Option<u16>,
    method: Option<String>,
    access_url: Option<String>,
    data_limit: Option<DataLimit>,
}

/// One access key as the control API describes it. Only the `id` is
/// required; everything else falls back to an empty value.
#[derive(Clone, Debug, Deserialize, Tabled)]
#[serde(from = "AccessKeyPayload")]
pub(crate) struct AccessKeyInfo {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(skip)]
    pub(crate) password: SecretString,
    #[tabled(rename = "Port")]
    pub(crate) port: u16,
    #[tabled(rename = "Method")]
    pub(crate) method: String,
    #[tabled(skip)]
    pub(crate) access_url: String,
    #[tabled(rename = "Data Limit", display_with = "format_data_limit")]
    pub(crate) data_limit: Option<DataLimit>,
}

impl From<AccessKeyPayload> for AccessKeyInfo {
    fn from(value: AccessKeyPayload) -> Self {
        Self {
            id: value.id,
            name: value.name.unwrap_or_default(),
            password: value
                .password
                .unwrap_or_else(|| SecretString::new(String::new())),
            port: value.port.unwrap_or(0),
            method: value.method.unwrap_or_default(),
            access_url: value.access_url.unwrap_or_default(),
            data_limit: value.data_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessKeyList {
    #[serde(default)]
    pub(crate) access_keys: Vec<AccessKeyInfo>,
}

/// Bytes transferred so far, by access key ID.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferMetrics {
    #[serde(default)]
    pub(crate) bytes_transferred_by_user_id: BTreeMap<String, u64>,
}
