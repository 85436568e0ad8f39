// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// Errors that can occur during store operations.
///
/// A successful query with zero rows is `Ok` with an empty result; every
/// variant here represents an actual failure. Callers can therefore tell
/// "nothing matched" apart from "the operation failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A database connection could not be opened.
    ConnectionFailed(String),
    /// Statement execution failed.
    Database(String),
    /// No connection became available within the acquire timeout.
    AcquireTimeout {
        /// How long the acquire waited before giving up.
        waited: Duration,
    },
    /// The pool is draining and rejects new acquisitions.
    PoolDraining,
    /// In-flight connections did not finish within the drain grace period.
    DrainTimeout {
        /// The grace period that elapsed.
        grace: Duration,
    },
    /// A dynamic query was rejected before any SQL was built.
    InvalidQuery(String),
    /// An incremental large-text read failed.
    LobRead(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "Database connection failed: {msg}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::AcquireTimeout { waited } => {
                write!(f, "No pooled connection available after {waited:?}")
            }
            Self::PoolDraining => write!(f, "Connection pool is draining"),
            Self::DrainTimeout { grace } => {
                write!(f, "Pool drain did not complete within {grace:?}")
            }
            Self::InvalidQuery(msg) => write!(f, "Invalid dynamic query: {msg}"),
            Self::LobRead(msg) => write!(f, "Large text read failed: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<crate::dynamic::DynamicQueryError> for StoreError {
    fn from(err: crate::dynamic::DynamicQueryError) -> Self {
        Self::InvalidQuery(err.to_string())
    }
}
