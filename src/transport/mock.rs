// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;

use async_trait::async_trait;
use futures_util::lock::Mutex;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::{Connectivity, Result};

use super::{Response, Transport};

enum Reply {
    Status(StatusCode, Vec<u8>),
    TimedOut,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Recorded {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<serde_json::Value>,
}

/// Answers requests from a fixed script, in order, and remembers what it was
/// asked. Running out of script reads as a timeout.
pub(crate) struct Scripted {
    base_url: Url,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Recorded>>,
}

impl Scripted {
    pub(crate) fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn reply(mut self, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::IM_A_TEAPOT);
        self.replies
            .get_mut()
            .push_back(Reply::Status(status, body.as_bytes().to_vec()));
        self
    }

    pub(crate) fn time_out(mut self) -> Self {
        self.replies.get_mut().push_back(Reply::TimedOut);
        self
    }

    pub(crate) async fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().await.clone()
    }

    pub(crate) async fn push_reply(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::IM_A_TEAPOT);
        self.replies
            .lock()
            .await
            .push_back(Reply::Status(status, body.as_bytes().to_vec()));
    }
}

#[async_trait]
impl Transport for Scripted {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        self.requests.lock().await.push(Recorded {
            method,
            path: path.to_owned(),
            body,
        });

        match self.replies.lock().await.pop_front() {
            Some(Reply::Status(status, body)) => Ok(Response::new(status, body)),
            Some(Reply::TimedOut) | None => Err(Connectivity::TimedOut.into()),
        }
    }
}
