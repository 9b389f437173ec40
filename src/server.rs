// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::{info, warn};
use reqwest::{Method, StatusCode};
use serde_json::json;

use crate::{
    error::{Operation, Result},
    model::{DataLimit, ServerInfo, ServerPayload, TelemetryStatus},
    transport::Transport,
};

/// Server-level endpoints of the control API, plus a mirror of the server
/// configuration that only changes once the server has accepted a write.
pub(crate) struct ServerClient {
    transport: Arc<dyn Transport>,
    info: ServerInfo,
}

impl ServerClient {
    /// Fetches the server configuration. There is no client without it.
    pub(crate) async fn connect(transport: Arc<dyn Transport>) -> Result<Self> {
        let payload: ServerPayload = transport
            .send(Method::GET, "/server", None)
            .await?
            .check(Operation::FetchServer, &[StatusCode::OK])?
            .json()?;
        let info = ServerInfo::new(transport.base_url().clone(), payload);
        info!(
            "Connected to server {:?} (ID {:?}, version {:?})",
            info.name, info.server_id, info.version
        );

        Ok(Self { transport, info })
    }

    pub(crate) const fn info(&self) -> &ServerInfo {
        &self.info
    }

    async fn write(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        self.transport
            .send(method, path, body)
            .await?
            .check(operation, &[StatusCode::NO_CONTENT])
            .map(|_| ())
            .map_err(|e| {
                warn!("Server refused {}: {}", operation, e);
                e
            })
    }

    pub(crate) async fn rename(&mut self, name: &str) -> Result<()> {
        self.write(
            Operation::RenameServer,
            Method::PUT,
            "/name",
            Some(json!({ "name": name })),
        )
        .await?;

        self.info.name = name.to_owned();
        info!("Server renamed to {:?}", name);
        Ok(())
    }

    /// The hostname is checked by the server alone; it may resolve it before
    /// accepting it.
    pub(crate) async fn set_hostname(&mut self, hostname: &str) -> Result<()> {
        self.write(
            Operation::SetHostname,
            Method::PUT,
            "/server/hostname-for-access-keys",
            Some(json!({ "hostname": hostname })),
        )
        .await?;

        self.info.hostname_for_access_keys = hostname.to_owned();
        info!("Hostname for new access keys set to {:?}", hostname);
        Ok(())
    }

    /// Asks the server directly. The mirrored flag is left alone.
    pub(crate) async fn telemetry_enabled(&self) -> Result<bool> {
        let status: TelemetryStatus = self
            .transport
            .send(Method::GET, "/metrics/enabled", None)
            .await?
            .check(Operation::GetTelemetry, &[StatusCode::OK])?
            .json()?;
        Ok(status.metrics_enabled)
    }

    pub(crate) async fn set_telemetry_enabled(&mut self, enabled: bool) -> Result<()> {
        self.write(
            Operation::SetTelemetry,
            Method::PUT,
            "/metrics/enabled",
            Some(json!({ "metricsEnabled": enabled })),
        )
        .await?;

        self.info.metrics_enabled = enabled;
        info!("Metrics sharing {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub(crate) async fn set_default_port(&mut self, port: u16) -> Result<()> {
        self.write(
            Operation::SetDefaultPort,
            Method::PUT,
            "/server/port-for-new-access-keys",
            Some(json!({ "port": port })),
        )
        .await?;

        self.info.port_for_new_access_keys = port;
        info!("Port for new access keys set to {}", port);
        Ok(())
    }

    pub(crate) async fn set_global_data_limit(&mut self, bytes: u64) -> Result<()> {
        let limit = DataLimit::new(bytes);
        self.write(
            Operation::SetGlobalDataLimit,
            Method::PUT,
            "/server/access-key-data-limit",
            Some(limit.to_request()),
        )
        .await?;

        self.info.data_limit = Some(limit);
        info!("Global data limit set to {}", limit);
        Ok(())
    }

    pub(crate) async fn clear_global_data_limit(&mut self) -> Result<()> {
        self.write(
            Operation::ClearGlobalDataLimit,
            Method::DELETE,
            "/server/access-key-data-limit",
            None,
        )
        .await?;

        self.info.data_limit = None;
        info!("Global data limit removed");
        Ok(())
    }
}
