// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pooled data-access layer for the GameVault catalog service.
//!
//! This crate is the query/access core: a bounded connection pool with a
//! `with_connection` unit-of-work contract, parameterized CRUD statements,
//! an explicitly unsafe dynamic query interface, the four fixed relational
//! analytics statements, and incremental large-text drains.
//!
//! ## Error contract
//!
//! Every operation returns a typed [`StoreError`] on failure. "Zero rows
//! matched" is always a successful empty result; callers never need to
//! guess whether an empty set means a failed query.
//!
//! ## The unsafe dynamic interface
//!
//! The [`dynamic`] module interpolates caller-supplied column lists and
//! predicates directly into SQL. See its module documentation for the
//! trust-boundary rationale; nothing outside that module builds SQL from
//! caller text.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod analytics;
mod crud;
pub mod dynamic;
mod error;
mod lob;
mod pool;
mod rows;
mod schema;
mod store;

#[cfg(test)]
mod tests;

pub use dynamic::DynamicQueryError;
pub use error::StoreError;
pub use pool::{Pool, PoolConfig};
pub use rows::PositionalRow;
pub use schema::initialize_schema;
pub use store::Store;
