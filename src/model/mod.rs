// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod access_key;
pub(crate) mod server;

use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) use access_key::{AccessKeyInfo, AccessKeyList, TransferMetrics};
pub(crate) use server::{ServerInfo, ServerPayload, TelemetryStatus};

/// A transfer quota, as both the server-wide and the per-key limits are
/// written on the wire.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub(crate) struct DataLimit {
    pub(crate) bytes: u64,
}

impl DataLimit {
    pub(crate) const fn new(bytes: u64) -> Self {
        Self { bytes }
    }

    /// The body the control API expects when a limit is being set.
    pub(crate) fn to_request(self) -> serde_json::Value {
        serde_json::json!({ "limit": self })
    }
}

impl fmt::Display for DataLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.bytes)
    }
}

pub(crate) fn format_data_limit(limit: &Option<DataLimit>) -> String {
    limit.map_or_else(|| "unlimited".to_owned(), |l| l.to_string())
}
