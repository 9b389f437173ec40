// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt::Display, sync::Arc};

use log::{info, warn};
use reqwest::{Method, StatusCode};
use serde_json::json;

use crate::{
    error::{Operation, Result},
    metadata,
    model::{AccessKeyInfo, AccessKeyList, DataLimit, TransferMetrics},
    transport::{Response, Transport},
};

fn key_path(id: &str) -> String {
    format!("/access-keys/{}", urlencoding::encode(id))
}

/// Per-key endpoints of the control API. At most one key is in focus at a
/// time; it is kept in step with the writes made through this client.
pub(crate) struct AccessKeyClient {
    transport: Arc<dyn Transport>,
    focus: Option<AccessKeyInfo>,
}

impl AccessKeyClient {
    pub(crate) const fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            focus: None,
        }
    }

    pub(crate) const fn focused(&self) -> Option<&AccessKeyInfo> {
        self.focus.as_ref()
    }

    fn focused_mut(&mut self, id: &str) -> Option<&mut AccessKeyInfo> {
        self.focus.as_mut().filter(|key| key.id == id)
    }

    async fn request(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        success: &[StatusCode],
    ) -> Result<Response> {
        self.transport
            .send(method, path, body)
            .await?
            .check(operation, success)
            .map_err(|e| {
                warn!("Server refused {}: {}", operation, e);
                e
            })
    }

    pub(crate) async fn list_all(&self) -> Result<Vec<AccessKeyInfo>> {
        let list: AccessKeyList = self
            .request(
                Operation::ListAccessKeys,
                Method::GET,
                "/access-keys",
                None,
                &[StatusCode::OK],
            )
            .await?
            .json()?;
        Ok(list.access_keys)
    }

    /// Fetches a key and puts it in focus. The previous focus survives any
    /// failure.
    pub(crate) async fn load(&mut self, id: &str) -> Result<&AccessKeyInfo> {
        let key: AccessKeyInfo = self
            .request(
                Operation::LoadAccessKey,
                Method::GET,
                &key_path(id),
                None,
                &[StatusCode::OK],
            )
            .await?
            .json()?;

        info!("Access key {:?} loaded", key.id);
        Ok(self.focus.insert(key))
    }

    /// Asks the server for a new key. The server picks its ID, name, port and
    /// access URL. Focus does not move to the new key.
    pub(crate) async fn create(&self) -> Result<AccessKeyInfo> {
        let key: AccessKeyInfo = self
            .request(
                Operation::CreateAccessKey,
                Method::POST,
                "/access-keys",
                Some(json!({ "method": metadata::ACCESS_KEY_METHOD })),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await?
            .json()?;

        info!("Access key {:?} created", key.id);
        Ok(key)
    }

    pub(crate) async fn delete(&mut self, id: &str) -> Result<()> {
        let _ = self
            .request(
                Operation::DeleteAccessKey,
                Method::DELETE,
                &key_path(id),
                None,
                &[StatusCode::NO_CONTENT],
            )
            .await?;

        if self.focused_mut(id).is_some() {
            self.focus = None;
        }
        info!("Access key {:?} deleted", id);
        Ok(())
    }

    pub(crate) async fn rename(&mut self, id: &str, name: impl Display + Send) -> Result<()> {
        let name = name.to_string();
        let _ = self
            .request(
                Operation::RenameAccessKey,
                Method::PUT,
                &format!("{}/name", key_path(id)),
                Some(json!({ "name": name })),
                &[StatusCode::NO_CONTENT],
            )
            .await?;

        info!("Access key {:?} renamed to {:?}", id, name);
        if let Some(key) = self.focused_mut(id) {
            key.name = name;
        }
        Ok(())
    }

    pub(crate) async fn set_data_limit(&mut self, id: &str, bytes: u64) -> Result<()> {
        let limit = DataLimit::new(bytes);
        let _ = self
            .request(
                Operation::SetAccessKeyDataLimit,
                Method::PUT,
                &format!("{}/data-limit", key_path(id)),
                Some(limit.to_request()),
                &[StatusCode::NO_CONTENT],
            )
            .await?;

        if let Some(key) = self.focused_mut(id) {
            key.data_limit = Some(limit);
        }
        info!("Access key {:?} limited to {}", id, limit);
        Ok(())
    }

    pub(crate) async fn clear_data_limit(&mut self, id: &str) -> Result<()> {
        let _ = self
            .request(
                Operation::ClearAccessKeyDataLimit,
                Method::DELETE,
                &format!("{}/data-limit", key_path(id)),
                None,
                &[StatusCode::NO_CONTENT],
            )
            .await?;

        if let Some(key) = self.focused_mut(id) {
            key.data_limit = None;
        }
        info!("Access key {:?} no longer limited", id);
        Ok(())
    }

    pub(crate) async fn all_metrics(&self) -> Result<TransferMetrics> {
        self.request(
            Operation::GetTransferMetrics,
            Method::GET,
            "/metrics/transfer",
            None,
            &[StatusCode::OK],
        )
        .await?
        .json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Api, Connectivity, Error},
        transport::mock::{Recorded, Scripted},
    };

    const KEY_3: &str = r#"{"id":"3","name":"phone","password":"pw","port":12345,"method":"chacha20-ietf-poly1305","accessUrl":"ss://x@h:12345/?outline=1"}"#;

    fn client(script: Scripted) -> (Arc<Scripted>, AccessKeyClient) {
        let transport = Arc::new(script);
        let client = AccessKeyClient::new(Arc::clone(&transport) as Arc<dyn Transport>);
        (transport, client)
    }

    fn scripted() -> Result<Scripted> {
        Scripted::new("https://h/token")
    }

    #[tokio::test]
    async fn starts_without_focus() -> Result<()> {
        let (transport, client) = client(scripted()?);
        assert!(client.focused().is_none());
        assert!(transport.requests().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn load_rename_delete() -> Result<()> {
        let (transport, mut client) = client(
            scripted()?
                .reply(200, KEY_3)
                .reply(204, "")
                .reply(204, ""),
        );

        let loaded = client.load("3").await?;
        assert_eq!(loaded.id, "3");
        assert_eq!(loaded.name, "phone");

        client.rename("3", 42).await?;
        assert_eq!(client.focused().map(|k| k.name.as_str()), Some("42"));

        client.delete("3").await?;
        assert!(client.focused().is_none());

        assert_eq!(
            transport.requests().await,
            [
                Recorded {
                    method: Method::GET,
                    path: "/access-keys/3".to_owned(),
                    body: None,
                },
                Recorded {
                    method: Method::PUT,
                    path: "/access-keys/3/name".to_owned(),
                    body: Some(json!({ "name": "42" })),
                },
                Recorded {
                    method: Method::DELETE,
                    path: "/access-keys/3".to_owned(),
                    body: None,
                },
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_key_keeps_focus() -> Result<()> {
        let (_transport, mut client) = client(
            scripted()?
                .reply(404, "")
                .reply(200, KEY_3)
                .reply(404, ""),
        );

        assert!(matches!(
            client.load("missing-id").await,
            Err(Error::Api(Api::AccessKeyNotFound))
        ));
        assert!(client.focused().is_none());

        let _ = client.load("3").await?;
        assert!(matches!(
            client.load("missing-id").await,
            Err(Error::Api(Api::AccessKeyNotFound))
        ));
        assert_eq!(client.focused().map(|k| k.id.as_str()), Some("3"));
        Ok(())
    }

    #[tokio::test]
    async fn loaded_key_without_id_is_a_decode_error() -> Result<()> {
        let (_transport, mut client) = client(scripted()?.reply(200, r#"{"name":"x"}"#));
        assert!(matches!(
            client.load("3").await,
            Err(Error::Connectivity(Connectivity::Decode(_)))
        ));
        assert!(client.focused().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn writes_to_other_keys_leave_focus_alone() -> Result<()> {
        let (_transport, mut client) = client(
            scripted()?
                .reply(200, KEY_3)
                .reply(204, "")
                .reply(204, "")
                .reply(204, ""),
        );
        let _ = client.load("3").await?;

        client.rename("4", "tablet").await?;
        client.set_data_limit("4", 100).await?;
        client.delete("4").await?;

        let focused = client.focused();
        assert_eq!(focused.map(|k| k.name.as_str()), Some("phone"));
        assert_eq!(focused.and_then(|k| k.data_limit), None);
        Ok(())
    }

    #[tokio::test]
    async fn failed_writes_leave_focus_alone() -> Result<()> {
        let (_transport, mut client) = client(
            scripted()?
                .reply(200, KEY_3)
                .reply(404, "")
                .reply(404, "")
                .reply(400, "")
                .reply(404, "")
                .reply(400, ""),
        );
        let _ = client.load("3").await?;

        assert!(matches!(
            client.rename("3", "x").await,
            Err(Error::Api(Api::AccessKeyNotFound))
        ));
        assert!(matches!(
            client.delete("3").await,
            Err(Error::Api(Api::AccessKeyNotFound))
        ));
        assert!(matches!(
            client.set_data_limit("3", 0).await,
            Err(Error::Api(Api::InvalidDataLimit))
        ));
        assert!(matches!(
            client.set_data_limit("3", 5).await,
            Err(Error::Api(Api::AccessKeyNotFound))
        ));
        assert!(matches!(
            client.clear_data_limit("3").await,
            Err(Error::Api(Api::InvalidDataLimit))
        ));

        let focused = client.focused();
        assert_eq!(focused.map(|k| k.name.as_str()), Some("phone"));
        assert_eq!(focused.and_then(|k| k.data_limit), None);
        Ok(())
    }

    #[tokio::test]
    async fn data_limit_follows_focus() -> Result<()> {
        let (transport, mut client) = client(
            scripted()?
                .reply(200, KEY_3)
                .reply(204, "")
                .reply(204, ""),
        );
        let _ = client.load("3").await?;

        client.set_data_limit("3", 2048).await?;
        assert_eq!(
            client.focused().and_then(|k| k.data_limit),
            Some(DataLimit::new(2048))
        );

        client.clear_data_limit("3").await?;
        assert_eq!(client.focused().and_then(|k| k.data_limit), None);

        let requests = transport.requests().await;
        assert_eq!(requests[1].path, "/access-keys/3/data-limit");
        assert_eq!(requests[1].body, Some(json!({ "limit": { "bytes": 2048 } })));
        assert_eq!(requests[2].method, Method::DELETE);
        Ok(())
    }

    #[tokio::test]
    async fn create_does_not_move_focus() -> Result<()> {
        let (transport, mut client) = client(
            scripted()?
                .reply(200, KEY_3)
                .reply(201, r#"{"id":"7","name":"","port":12345,"method":"chacha20-ietf-poly1305"}"#),
        );
        let _ = client.load("3").await?;

        let created = client.create().await?;
        assert_eq!(created.id, "7");
        assert_eq!(client.focused().map(|k| k.id.as_str()), Some("3"));

        let requests = transport.requests().await;
        assert_eq!(requests[1].method, Method::POST);
        assert_eq!(requests[1].path, "/access-keys");
        assert_eq!(
            requests[1].body,
            Some(json!({ "method": "chacha20-ietf-poly1305" }))
        );
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_other_statuses() -> Result<()> {
        let (_transport, client) = client(scripted()?.reply(500, ""));
        assert!(matches!(
            client.create().await,
            Err(Error::Api(Api::UnexpectedStatus {
                operation: Operation::CreateAccessKey,
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn listing_and_metrics_are_returned_as_is() -> Result<()> {
        let (_transport, client) = client(
            scripted()?
                .reply(200, r#"{"accessKeys":[{"id":"0","name":"a"},{"id":"3","name":"phone"}]}"#)
                .reply(200, r#"{"bytesTransferredByUserId":{"0":10,"3":20}}"#),
        );

        let keys = client.list_all().await?;
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].name, "phone");
        assert!(client.focused().is_none());

        let metrics = client.all_metrics().await?;
        assert_eq!(metrics.bytes_transferred_by_user_id.get("3"), Some(&20));
        assert!(client.focused().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn ids_are_escaped_in_paths() -> Result<()> {
        let (transport, mut client) = client(scripted()?.reply(204, ""));
        client.delete("a/b c").await?;
        assert_eq!(transport.requests().await[0].path, "/access-keys/a%2Fb%20c");
        Ok(())
    }
}
