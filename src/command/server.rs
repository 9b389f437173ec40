// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::Result,
    model::{format_data_limit, ServerInfo},
    outline::Outline,
};

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Show the server configuration.
    Show,

    /// Rename the server.
    Rename {
        /// The new display name.
        name: String,
    },

    /// Change the hostname or IP address written into new access keys. If
    /// it is a hostname, its DNS records must already point at the server.
    Hostname {
        #[clap()]
        hostname: String,
    },

    /// Change the port new access keys listen on. It may be a port that
    /// existing keys already use.
    Port {
        #[clap()]
        port: u16,
    },

    /// Show whether metrics are shared with the Outline developers, or turn
    /// sharing on or off.
    Telemetry {
        #[arg(value_enum)]
        state: Option<Toggle>,
    },

    /// Limit how much data every access key may transfer.
    DataLimit {
        #[clap()]
        bytes: u64,
    },

    /// Lift the data limit from all access keys.
    NoDataLimit,
}

/// Inspect or change the server configuration.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[command(subcommand)]
    action: Action,
}

fn print_info(info: &ServerInfo) {
    let rows = [
        ("Name", info.name.clone()),
        ("Server ID", info.server_id.clone()),
        ("Version", info.version.clone()),
        ("Created", info.created_at.clone()),
        (
            "API Host",
            info.target().host_str().unwrap_or_default().to_owned(),
        ),
        ("Hostname for Keys", info.hostname_for_access_keys.clone()),
        ("Port for Keys", info.port_for_new_access_keys.to_string()),
        ("Data Limit", format_data_limit(&info.data_limit)),
        (
            "Metrics Sharing",
            if info.metrics_enabled { "on" } else { "off" }.to_owned(),
        ),
    ];

    let mut builder = Builder::default();
    for (name, value) in rows {
        builder.push_record([name.to_owned(), value]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, outline: &Outline) -> Result<()> {
        match self.action {
            Action::Show => print_info(&outline.server_info().await),
            Action::Rename { name } => {
                outline.rename_server(&name).await?;
                println!("Server renamed to {}", outline.server_info().await.name);
            }
            Action::Hostname { hostname } => {
                outline.set_hostname(&hostname).await?;
                println!(
                    "New access keys will use {}",
                    outline.server_info().await.hostname_for_access_keys
                );
            }
            Action::Port { port } => {
                outline.set_default_port(port).await?;
                println!(
                    "New access keys will use port {}",
                    outline.server_info().await.port_for_new_access_keys
                );
            }
            Action::Telemetry { state: None } => {
                let enabled = outline.telemetry_enabled().await?;
                println!("Metrics sharing is {}", if enabled { "on" } else { "off" });
            }
            Action::Telemetry { state: Some(state) } => {
                outline.set_telemetry_enabled(state == Toggle::On).await?;
                println!(
                    "Metrics sharing is {}",
                    if outline.server_info().await.metrics_enabled {
                        "on"
                    } else {
                        "off"
                    }
                );
            }
            Action::DataLimit { bytes } => {
                outline.set_global_data_limit(bytes).await?;
                println!(
                    "Data limit for all keys: {}",
                    format_data_limit(&outline.server_info().await.data_limit)
                );
            }
            Action::NoDataLimit => {
                outline.clear_global_data_limit().await?;
                println!(
                    "Data limit for all keys: {}",
                    format_data_limit(&outline.server_info().await.data_limit)
                );
            }
        }
        Ok(())
    }
}
