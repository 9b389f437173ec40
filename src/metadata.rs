// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use once_cell::sync::Lazy;

pub(crate) static CLIENT_NAME: Lazy<String> =
    Lazy::new(|| option_env!("CARGO_PKG_NAME").unwrap_or("outline-ctl").to_owned());
pub(crate) static CLIENT_VERSION: Lazy<String> =
    Lazy::new(|| option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0").to_owned());
pub(crate) static USER_AGENT: Lazy<String> =
    Lazy::new(|| format!("{}/{}", *CLIENT_NAME, *CLIENT_VERSION));

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// The cipher requested for every access key we create.
pub(crate) const ACCESS_KEY_METHOD: &str = "chacha20-ietf-poly1305";
