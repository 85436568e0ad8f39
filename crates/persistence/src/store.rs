// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The store adapter: one async method per logical operation.
//!
//! The pool is an explicitly owned resource handle injected here, not a
//! process-wide global. Every method acquires a connection through
//! [`Pool::with_connection`] exactly once; no operation nests acquisition.

use gamevault_domain::{DemoRename, DemoRow, ItemUpdate, NewPlayer};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;

use crate::error::StoreError;
use crate::pool::{Pool, PoolConfig};
use crate::rows::PositionalRow;
use crate::{analytics, crud, dynamic};

/// Pooled access to the catalog database.
#[derive(Clone)]
pub struct Store {
    pool: Pool,
}

impl Store {
    /// Opens a store over a fresh shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be started.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            pool: Pool::open_in_memory(PoolConfig::default())?,
        })
    }

    /// Opens a store over a database file, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be started.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            pool: Pool::open_file(path, PoolConfig::default())?,
        })
    }

    /// Wraps an existing pool, for callers that need non-default sizing.
    #[must_use]
    pub const fn with_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Checks that a pooled connection can be acquired.
    ///
    /// # Errors
    ///
    /// Returns an error if acquisition fails.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.pool.with_connection(|_conn| Ok(())).await
    }

    /// Drains the pool with the given grace period.
    ///
    /// # Errors
    ///
    /// Returns an error if in-flight work does not finish in time.
    pub async fn close(&self, grace: Duration) -> Result<(), StoreError> {
        self.pool.close(grace).await
    }

    /// Fetches all players.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_players(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool.with_connection(|conn| crud::fetch_players(conn)).await
    }

    /// Fetches all items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_items(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool.with_connection(|conn| crud::fetch_items(conn)).await
    }

    /// Fetches all games.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_games(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool.with_connection(|conn| crud::fetch_games(conn)).await
    }

    /// Fetches all demonstration rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_demotable(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(|conn| crud::fetch_demotable(conn))
            .await
    }

    /// Inserts a player.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_player(&self, player: NewPlayer) -> Result<bool, StoreError> {
        self.pool
            .with_connection(move |conn| crud::insert_player(conn, &player))
            .await
    }

    /// Deletes a player by trimmed username.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_player(&self, username: &str) -> Result<bool, StoreError> {
        self.pool
            .with_connection(|conn| crud::delete_player(conn, username))
            .await
    }

    /// Updates an item matched on its old triple.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_item(&self, update: ItemUpdate) -> Result<bool, StoreError> {
        self.pool
            .with_connection(move |conn| crud::update_item(conn, &update))
            .await
    }

    /// Drops and recreates the demonstration table.
    ///
    /// # Errors
    ///
    /// Returns an error if the recreate fails.
    pub async fn reset_demotable(&self) -> Result<(), StoreError> {
        self.pool
            .with_connection(|conn| crud::reset_demotable(conn))
            .await
    }

    /// Inserts a demonstration row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_demo_row(&self, row: DemoRow) -> Result<bool, StoreError> {
        self.pool
            .with_connection(move |conn| crud::insert_demo_row(conn, &row))
            .await
    }

    /// Renames demonstration rows matched on the old name.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn rename_demo_row(&self, rename: DemoRename) -> Result<bool, StoreError> {
        self.pool
            .with_connection(move |conn| crud::rename_demo_row(conn, &rename))
            .await
    }

    /// Counts demonstration rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the count fails.
    pub async fn count_demotable(&self) -> Result<i64, StoreError> {
        self.pool
            .with_connection(|conn| crud::count_demotable(conn))
            .await
    }

    /// Players with more achievements than the referenced username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; a missing reference is a
    /// successful empty result.
    pub async fn players_above_reference(
        &self,
        username: &str,
    ) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(|conn| analytics::players_above_reference(conn, username))
            .await
    }

    /// Games reviewed by every author in the review table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn games_reviewed_by_all(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(|conn| analytics::games_reviewed_by_all(conn))
            .await
    }

    /// Average rating per reviewed game.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn average_ratings(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(|conn| analytics::average_ratings(conn))
            .await
    }

    /// Players meeting the fixed follower threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn popular_players(&self) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(|conn| analytics::popular_players(conn))
            .await
    }

    /// Ad-hoc projection over the player table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuery`] for an empty or blank column
    /// list, or a database error if execution fails.
    pub async fn project_players(
        &self,
        columns: Vec<String>,
    ) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(move |conn| dynamic::project_players(conn, &columns))
            .await
    }

    /// Ad-hoc game selection with a caller-supplied predicate.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuery`] for a blank predicate, or a
    /// database error if execution fails.
    pub async fn select_games(&self, predicate: &str) -> Result<Vec<PositionalRow>, StoreError> {
        self.pool
            .with_connection(|conn| dynamic::select_games(conn, predicate))
            .await
    }

    /// Filtered game/review join with review bodies fully drained.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidQuery`] for a blank predicate, a
    /// database error if execution fails, or [`StoreError::LobRead`] if
    /// any body drain fails.
    pub async fn join_reviews(
        &self,
        predicate: &str,
    ) -> Result<Vec<Map<String, Value>>, StoreError> {
        self.pool
            .with_connection(|conn| dynamic::join_games_reviews(conn, predicate))
            .await
    }
}
