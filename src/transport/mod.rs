// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod http;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{Api, Operation, Result};

pub(crate) use http::Http;

#[derive(Clone, Debug)]
pub(crate) struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    pub(crate) const fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Passes the response through if its status is one of `success`, and
    /// otherwise turns the status into the failure it means for `operation`.
    pub(crate) fn check(self, operation: Operation, success: &[StatusCode]) -> Result<Self> {
        if success.contains(&self.status) {
            Ok(self)
        } else {
            debug!("Status {} is not a success while {}", self.status, operation);
            Err(Api::from_status(operation, self.status).into())
        }
    }

    pub(crate) fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends one request to the control API and hands back whatever it answered,
/// whatever the status.
#[async_trait]
pub(crate) trait Transport: Send + Sync {
    /// The base URL every request path is appended to. It identifies the
    /// remote server and carries its access token.
    fn base_url(&self) -> &Url;

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response>;
}
