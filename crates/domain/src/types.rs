// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A player to be inserted into the catalog.
///
/// `username` is the player's unique identifier. The counters are
/// non-negative by convention; the store does not enforce this.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewPlayer {
    /// The unique username.
    pub username: String,
    /// Number of followers.
    pub followers: i64,
    /// Number of players this player follows.
    pub following: i64,
    /// Number of reviews written.
    pub reviews: i64,
    /// Number of achievements earned.
    pub achievements: i64,
}

/// An item update matched on the *old* (name, price, function) triple.
///
/// Items have no exposed surrogate key, so the update identifies the row by
/// all three of its previous values and rewrites all three.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    /// The current item name.
    pub old_name: String,
    /// The replacement item name.
    pub new_name: String,
    /// The current price.
    pub old_price: f64,
    /// The replacement price.
    pub new_price: f64,
    /// The current free-text function descriptor.
    pub old_function: String,
    /// The replacement function descriptor.
    pub new_function: String,
}

/// A row in the disposable demonstration table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoRow {
    /// The primary key.
    pub id: i64,
    /// The row name.
    pub name: String,
}

/// A rename of a demonstration row, matched on the old name.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRename {
    /// The current name.
    pub old_name: String,
    /// The replacement name.
    pub new_name: String,
}
