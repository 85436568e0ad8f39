// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the GameVault catalog service.
//!
//! These are the wire-facing value types shared between the HTTP layer and
//! the persistence layer. They carry no behavior beyond serialization; all
//! referential integrity lives in the store's schema.

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

mod types;

#[cfg(test)]
mod tests;

pub use types::{DemoRename, DemoRow, ItemUpdate, NewPlayer};
