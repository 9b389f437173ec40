// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, sync::Arc, time::Duration};

use futures_util::lock::Mutex;
use url::Url;

use crate::{
    access_key::AccessKeyClient,
    cache::{self, InstanceCache},
    error::Result,
    model::{AccessKeyInfo, ServerInfo, TransferMetrics},
    server::ServerClient,
    transport::{Http, Transport},
};

/// One handle on one Outline server: its configuration and its access keys.
///
/// Writes to either half are serialized, so the local copy always matches
/// the last write the server accepted.
pub(crate) struct Outline {
    target: Url,
    server: Mutex<ServerClient>,
    keys: Mutex<AccessKeyClient>,
}

impl Outline {
    /// Returns the process-wide handle for `url`, connecting to it first if
    /// nobody has yet.
    pub(crate) async fn connect(url: &Url, timeout: Duration) -> Result<Arc<Self>> {
        Self::connect_with(&cache::INSTANCES, url, || {
            let transport: Arc<dyn Transport> = Arc::new(Http::new(url.clone(), timeout)?);
            Ok(transport)
        })
        .await
    }

    pub(crate) async fn connect_with<F>(
        cache: &InstanceCache,
        url: &Url,
        transport: F,
    ) -> Result<Arc<Self>>
    where
        F: FnOnce() -> Result<Arc<dyn Transport>> + Send,
    {
        cache
            .get_or_create(url.as_str(), || async move { Self::new(transport()?).await })
            .await
    }

    pub(crate) async fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        let server = ServerClient::connect(Arc::clone(&transport)).await?;
        let keys = AccessKeyClient::new(Arc::clone(&transport));

        Ok(Self {
            target: transport.base_url().clone(),
            server: Mutex::new(server),
            keys: Mutex::new(keys),
        })
    }

    pub(crate) const fn target(&self) -> &Url {
        &self.target
    }

    pub(crate) async fn server_info(&self) -> ServerInfo {
        self.server.lock().await.info().clone()
    }

    pub(crate) async fn rename_server(&self, name: &str) -> Result<()> {
        self.server.lock().await.rename(name).await
    }

    pub(crate) async fn set_hostname(&self, hostname: &str) -> Result<()> {
        self.server.lock().await.set_hostname(hostname).await
    }

    pub(crate) async fn telemetry_enabled(&self) -> Result<bool> {
        self.server.lock().await.telemetry_enabled().await
    }

    pub(crate) async fn set_telemetry_enabled(&self, enabled: bool) -> Result<()> {
        self.server.lock().await.set_telemetry_enabled(enabled).await
    }

    pub(crate) async fn set_default_port(&self, port: u16) -> Result<()> {
        self.server.lock().await.set_default_port(port).await
    }

    pub(crate) async fn set_global_data_limit(&self, bytes: u64) -> Result<()> {
        self.server.lock().await.set_global_data_limit(bytes).await
    }

    pub(crate) async fn clear_global_data_limit(&self) -> Result<()> {
        self.server.lock().await.clear_global_data_limit().await
    }

    // LINT: The command line works one request at a time and never looks at
    // the focus afterwards.
    #[allow(dead_code)]
    pub(crate) async fn focused_access_key(&self) -> Option<AccessKeyInfo> {
        self.keys.lock().await.focused().cloned()
    }

    pub(crate) async fn list_access_keys(&self) -> Result<Vec<AccessKeyInfo>> {
        self.keys.lock().await.list_all().await
    }

    pub(crate) async fn load_access_key(&self, id: &str) -> Result<AccessKeyInfo> {
        self.keys.lock().await.load(id).await.cloned()
    }

    pub(crate) async fn create_access_key(&self) -> Result<AccessKeyInfo> {
        self.keys.lock().await.create().await
    }

    pub(crate) async fn delete_access_key(&self, id: &str) -> Result<()> {
        self.keys.lock().await.delete(id).await
    }

    pub(crate) async fn rename_access_key(
        &self,
        id: &str,
        name: impl Display + Send,
    ) -> Result<()> {
        self.keys.lock().await.rename(id, name).await
    }

    pub(crate) async fn set_access_key_data_limit(&self, id: &str, bytes: u64) -> Result<()> {
        self.keys.lock().await.set_data_limit(id, bytes).await
    }

    pub(crate) async fn clear_access_key_data_limit(&self, id: &str) -> Result<()> {
        self.keys.lock().await.clear_data_limit(id).await
    }

    pub(crate) async fn transfer_metrics(&self) -> Result<TransferMetrics> {
        self.keys.lock().await.all_metrics().await
    }
}
