// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The four fixed-shape relational analytics statements.
//!
//! Execution errors propagate; a successful query with zero rows is a
//! valid empty result, never an error.

use rusqlite::{Connection, params};

use crate::error::StoreError;
use crate::rows::{PositionalRow, collect_positional};

/// Players whose achievements strictly exceed those of the referenced
/// username (correlated scalar subquery).
///
/// A reference username matching zero rows leaves the scalar subquery
/// empty; `SQLite` evaluates the comparison against it as no match, so the
/// result is the empty set rather than an error.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn players_above_reference(
    conn: &Connection,
    username: &str,
) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT username, followers, following, reviews, achievements
         FROM player
         WHERE achievements > (
             SELECT achievements
             FROM player
             WHERE username = ?1
         )",
    )?;
    collect_positional(&mut stmt, params![username])
}

/// Relational division: every game reviewed by the full set of authors
/// appearing anywhere in the review table.
///
/// Formulated as a double negation: no author exists for whom no review
/// ties them to this game. The author universe is global across all
/// reviews, deliberately not a caller-supplied set. With no reviews at all
/// the universe is empty and every game qualifies vacuously.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn games_reviewed_by_all(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT g.name, g.developing_company
         FROM game g
         WHERE NOT EXISTS (
             SELECT r2.author_username
             FROM review r2
             WHERE NOT EXISTS (
                 SELECT r1.author_username
                 FROM review r1
                 WHERE r1.game_name = g.name
                   AND r1.game_developing_company = g.developing_company
                   AND r1.author_username = r2.author_username
             )
         )",
    )?;
    collect_positional(&mut stmt, [])
}

/// One row per reviewed game with the arithmetic mean of its ratings.
///
/// Inner-join semantics: games with no reviews do not appear.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn average_ratings(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT g.name, g.developing_company, AVG(r.rating)
         FROM game g
         JOIN review r
           ON g.name = r.game_name
          AND g.developing_company = r.game_developing_company
         GROUP BY g.name, g.developing_company",
    )?;
    collect_positional(&mut stmt, [])
}

/// The fixed follower threshold for [`popular_players`].
const FOLLOWER_THRESHOLD: i64 = 50;

/// Players with at least fifty followers.
///
/// # Errors
///
/// Returns an error if execution fails.
pub fn popular_players(conn: &Connection) -> Result<Vec<PositionalRow>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT username, followers, following, reviews, achievements
         FROM player
         WHERE followers >= ?1",
    )?;
    collect_positional(&mut stmt, params![FOLLOWER_THRESHOLD])
}
