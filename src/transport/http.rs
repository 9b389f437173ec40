// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use url::Url;

use crate::{
    error::{Connectivity, Result},
    metadata,
};

use super::{Response, Transport};

pub(crate) struct Http {
    client: reqwest::Client,
    base_url: Url,
}

impl Http {
    pub(crate) fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            // The control API presents a self-signed certificate whose
            // fingerprint is handed out together with the URL token. There is
            // no public chain to verify it against.
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .user_agent(metadata::USER_AGENT.as_str())
            .build()
            .map_err(Connectivity::from)?;

        Ok(Self { client, base_url })
    }

    // Url::join would replace the token segment, so paths are appended as
    // text instead.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Transport for Http {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        debug!("{} {}", method, path);

        let mut req = self.client.request(method, self.endpoint(path));
        if let Some(ref body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(Connectivity::from)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(Connectivity::from)?;
        debug!("{} answered {} ({} bytes)", path, status, body.len());

        Ok(Response::new(status, body.to_vec()))
    }
}
