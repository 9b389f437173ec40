// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tabled::{
    builder::Builder,
    settings::{object::Segment, Alignment, Modify, Style},
    Table,
};

use secrecy::ExposeSecret as _;

use crate::{error::Result, model::AccessKeyInfo, outline::Outline};

#[derive(Debug, Subcommand)]
enum Action {
    /// List all access keys.
    List,

    /// Show one access key, followed by the URL a client connects with.
    Show {
        #[clap()]
        id: String,

        /// Also print the key's password.
        #[arg(long)]
        reveal: bool,
    },

    /// Create an access key. The server picks its name, port and URL.
    Create,

    /// Delete an access key.
    Delete {
        #[clap()]
        id: String,
    },

    /// Rename an access key.
    Rename {
        #[clap()]
        id: String,

        #[clap()]
        name: String,
    },

    /// Limit how much data an access key may transfer.
    DataLimit {
        #[clap()]
        id: String,

        #[clap()]
        bytes: u64,
    },

    /// Lift the data limit from an access key.
    NoDataLimit {
        #[clap()]
        id: String,
    },

    /// Show how much data each access key has transferred.
    Metrics,
}

/// Manage the access keys clients connect with.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[command(subcommand)]
    action: Action,
}

fn describe_key(key: &AccessKeyInfo, reveal: bool) -> String {
    let mut out = format!(
        "{}\n{}",
        Table::new([key]).with(Style::rounded()),
        key.access_url
    );
    if reveal {
        out.push_str("\nPassword: ");
        out.push_str(key.password.expose_secret());
    }
    out
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, outline: &Outline) -> Result<()> {
        match self.action {
            Action::List => {
                let keys = outline.list_access_keys().await?;
                if !keys.is_empty() {
                    println!(
                        "{}",
                        Table::new(&keys)
                            .with(Style::rounded())
                            .with(Modify::new(Segment::new(1.., 0..=1)).with(Alignment::left()))
                    );
                }
            }
            Action::Show { id, reveal } => {
                let key = outline.load_access_key(&id).await?;
                println!("{}", describe_key(&key, reveal));
            }
            Action::Create => {
                let key = outline.create_access_key().await?;
                println!("Created access key {}", key.id);
                println!("{}", key.access_url);
            }
            Action::Delete { id } => outline.delete_access_key(&id).await?,
            Action::Rename { id, name } => outline.rename_access_key(&id, name).await?,
            Action::DataLimit { id, bytes } => {
                outline.set_access_key_data_limit(&id, bytes).await?;
            }
            Action::NoDataLimit { id } => outline.clear_access_key_data_limit(&id).await?,
            Action::Metrics => {
                let metrics = outline.transfer_metrics().await?;
                let mut builder = Builder::default();
                builder.push_record(["ID".to_owned(), "Bytes Transferred".to_owned()]);
                for (id, bytes) in metrics.bytes_transferred_by_user_id {
                    builder.push_record([id, bytes.to_string()]);
                }
                println!("{}", builder.build().with(Style::rounded()));
            }
        }
        Ok(())
    }
}
