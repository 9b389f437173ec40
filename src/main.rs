// SPDX-FileCopyrightText: 2022-2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod access_key;
mod cache;
mod command;
mod error;
mod metadata;
mod model;
mod outline;
mod server;
mod transport;

use std::{process, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{debug, error};
use outline::Outline;
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Server(command::server::Command),
    Keys(command::keys::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, outline: &Outline) -> Result<()> {
        match self {
            Self::Server(cmd) => cmd.execute(outline).await,
            Self::Keys(cmd) => cmd.execute(outline).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The management API URL printed by the Outline installer, including
    /// its secret path segment.
    #[arg(long, env = "OUTLINE_API_URL", hide_env_values = true, value_parser = Url::parse)]
    url: Url,

    /// How long to wait for each request to the server, in seconds.
    #[arg(long, env = "OUTLINE_TIMEOUT", default_value_t = metadata::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    #[clap(subcommand)]
    command: Command,
}

async fn run(args: Args) -> Result<()> {
    let outline = Outline::connect(&args.url, Duration::from_secs(args.timeout)).await?;
    debug!(
        "Connected to the management API on {}",
        outline.target().host_str().unwrap_or("(no host)")
    );

    command::Command::execute(args.command, &outline).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("OUTLINE_LOG", "warn")
        .write_style("OUTLINE_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
