// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parameterized CRUD statements against the fixed catalog tables.
//!
//! Every write reports whether it affected at least one row; writes
//! auto-commit individually with no multi-statement atomicity.

use gamevault_domain::{DemoRename, DemoRow, ItemUpdate, NewPlayer};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::StoreError;
use crate::rows::{PositionalRow, collect_positional};

/// Fetches every player row, positionally.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn fetch_players(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT username, followers, following, reviews, achievements FROM player",
    )?;
    collect_positional(&mut stmt, [])
}

/// Fetches every item row, positionally.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn fetch_items(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare("SELECT price, name, function, id FROM item")?;
    collect_positional(&mut stmt, [])
}

/// Fetches every game row, positionally.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn fetch_games(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare("SELECT price, name, genre, platform, release_year FROM game")?;
    collect_positional(&mut stmt, [])
}

/// Fetches every demonstration row, positionally.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn fetch_demotable(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name FROM demotable")?;
    collect_positional(&mut stmt, [])
}

/// Inserts a player. Returns `true` if the row was inserted.
///
/// # Errors
///
/// Returns an error if execution fails, including a duplicate username.
pub fn insert_player(conn: &Connection, player: &NewPlayer) -> Result<bool, StoreError> {
    let affected: usize = conn.execute(
        "INSERT INTO player (username, followers, following, reviews, achievements)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            player.username,
            player.followers,
            player.following,
            player.reviews,
            player.achievements
        ],
    )?;
    Ok(affected > 0)
}

/// Deletes a player whose stored username matches after whitespace trimming.
///
/// Returns `true` if at least one row was removed.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn delete_player(conn: &Connection, username: &str) -> Result<bool, StoreError> {
    let affected: usize = conn.execute(
        "DELETE FROM player WHERE TRIM(username) = ?1",
        params![username],
    )?;
    debug!(affected, "Deleted player rows");
    Ok(affected > 0)
}

/// Updates an item matched on its old (name, price, function) triple,
/// rewriting all three. Returns `true` if a row matched.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn update_item(conn: &Connection, update: &ItemUpdate) -> Result<bool, StoreError> {
    let affected: usize = conn.execute(
        "UPDATE item SET name = ?1, price = ?2, function = ?3
         WHERE name = ?4 AND price = ?5 AND function = ?6",
        params![
            update.new_name,
            update.new_price,
            update.new_function,
            update.old_name,
            update.old_price,
            update.old_function
        ],
    )?;
    Ok(affected > 0)
}

/// Drops and recreates the demonstration table.
///
/// A failed drop is tolerated (the table may not exist yet); a failed
/// create is not.
///
/// # Errors
///
/// Returns an error if the table cannot be recreated.
pub fn reset_demotable(conn: &Connection) -> Result<(), StoreError> {
    if let Err(err) = conn.execute("DROP TABLE demotable", []) {
        debug!(error = %err, "demotable did not exist before reset");
    }
    conn.execute(
        "CREATE TABLE demotable (id INTEGER PRIMARY KEY, name TEXT)",
        [],
    )?;
    Ok(())
}

/// Inserts a demonstration row. Returns `true` if the row was inserted.
///
/// # Errors
///
/// Returns an error if execution fails, including a duplicate id.
pub fn insert_demo_row(conn: &Connection, row: &DemoRow) -> Result<bool, StoreError> {
    let affected: usize = conn.execute(
        "INSERT INTO demotable (id, name) VALUES (?1, ?2)",
        params![row.id, row.name],
    )?;
    Ok(affected > 0)
}

/// Renames demonstration rows matched on the old name. Returns `true` if a
/// row matched.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn rename_demo_row(conn: &Connection, rename: &DemoRename) -> Result<bool, StoreError> {
    let affected: usize = conn.execute(
        "UPDATE demotable SET name = ?1 WHERE name = ?2",
        params![rename.new_name, rename.old_name],
    )?;
    Ok(affected > 0)
}

/// Counts demonstration rows.
///
/// # Errors
///
/// Returns an error if execution fails, including a missing table.
pub fn count_demotable(conn: &Connection) -> Result<i64, StoreError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM demotable", [], |row| row.get(0))?;
    Ok(count)
}
