// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{error::Result, outline::Outline};

pub(crate) mod keys;
pub(crate) mod server;

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, outline: &Outline) -> Result<()>;
}
