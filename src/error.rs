// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io, result};

use reqwest::StatusCode;
use thiserror::Error;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("could not talk to the control API: {0}")]
    Connectivity(#[from] Connectivity),
    #[error("control API error: {0}")]
    Api(#[from] Api),
    #[error("internal error: {0}")]
    Internal(#[from] Internal),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Connectivity(Connectivity::Decode(value)),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Connectivity(value.into())
    }
}

#[derive(Error, Debug)]
pub(crate) enum Connectivity {
    #[error("request timed out")]
    TimedOut,
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("response could not be decoded: {0}")]
    Decode(serde_json::Error),
}

impl From<reqwest::Error> for Connectivity {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::TimedOut
        } else {
            // The base URL embeds the access token, so it must not end up in
            // error messages.
            Self::Transport(value.without_url())
        }
    }
}

/// A remote call, as far as the meaning of its status codes is concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Operation {
    FetchServer,
    RenameServer,
    SetHostname,
    GetTelemetry,
    SetTelemetry,
    SetDefaultPort,
    SetGlobalDataLimit,
    ClearGlobalDataLimit,
    ListAccessKeys,
    LoadAccessKey,
    CreateAccessKey,
    DeleteAccessKey,
    RenameAccessKey,
    SetAccessKeyDataLimit,
    ClearAccessKeyDataLimit,
    GetTransferMetrics,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::FetchServer => "fetching server information",
            Self::RenameServer => "renaming the server",
            Self::SetHostname => "changing the hostname for access keys",
            Self::GetTelemetry => "reading the metrics sharing status",
            Self::SetTelemetry => "changing the metrics sharing status",
            Self::SetDefaultPort => "changing the port for new access keys",
            Self::SetGlobalDataLimit => "setting the global data limit",
            Self::ClearGlobalDataLimit => "removing the global data limit",
            Self::ListAccessKeys => "listing access keys",
            Self::LoadAccessKey => "fetching an access key",
            Self::CreateAccessKey => "creating an access key",
            Self::DeleteAccessKey => "deleting an access key",
            Self::RenameAccessKey => "renaming an access key",
            Self::SetAccessKeyDataLimit => "setting an access key data limit",
            Self::ClearAccessKeyDataLimit => "removing an access key data limit",
            Self::GetTransferMetrics => "fetching transfer metrics",
        })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum Api {
    #[error("invalid name")]
    InvalidName,
    #[error("an invalid hostname or IP address was provided")]
    InvalidHostname,
    #[error("the server could not validate the hostname (this can happen when DNS for it is not set up)")]
    HostnameValidation,
    #[error("the requested port wasn't an integer from 1 through 65535, or the request had no port parameter")]
    InvalidPort,
    #[error("the requested port is already in use by another service")]
    PortInUse,
    #[error("invalid data limit")]
    InvalidDataLimit,
    #[error("access key does not exist")]
    AccessKeyNotFound,
    #[error("invalid request to change the metrics sharing status")]
    TelemetryRequest,
    #[error("unexpected status {status} while {operation}")]
    UnexpectedStatus {
        operation: Operation,
        status: StatusCode,
    },
}

impl Api {
    /// Describes why `operation` failed, given the status the control API
    /// answered with. The caller is responsible for deciding that the status
    /// is not a success.
    pub(crate) fn from_status(operation: Operation, status: StatusCode) -> Self {
        match (operation, status.as_u16()) {
            (Operation::RenameServer, 400) => Self::InvalidName,
            (Operation::SetHostname, 400) => Self::InvalidHostname,
            (Operation::SetHostname, 500) => Self::HostnameValidation,
            (Operation::SetDefaultPort, 400) => Self::InvalidPort,
            (Operation::SetDefaultPort, 409) => Self::PortInUse,
            (
                Operation::SetGlobalDataLimit
                | Operation::ClearGlobalDataLimit
                | Operation::SetAccessKeyDataLimit
                | Operation::ClearAccessKeyDataLimit,
                400,
            ) => Self::InvalidDataLimit,
            (
                Operation::SetGlobalDataLimit
                | Operation::ClearGlobalDataLimit
                | Operation::SetAccessKeyDataLimit
                | Operation::ClearAccessKeyDataLimit
                | Operation::LoadAccessKey
                | Operation::RenameAccessKey
                | Operation::DeleteAccessKey,
                404,
            ) => Self::AccessKeyNotFound,
            (Operation::SetTelemetry, 400) => Self::TelemetryRequest,
            _ => Self::UnexpectedStatus { operation, status },
        }
    }
}

#[derive(Error, Debug)]
pub(crate) enum Internal {
    #[error("cached instance has a different type than requested")]
    CachedTypeMismatch,
}
