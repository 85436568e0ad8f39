// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The unsafe dynamic query interface: ad-hoc projection, selection, and
//! join filtering from caller-supplied SQL fragments.
//!
//! # Trust boundary
//!
//! These operations interpolate caller-controlled text directly into SQL.
//! Identifiers cannot be bound as parameters in standard SQL, and the
//! predicates here are free-form boolean expressions, so no binding is
//! possible for either. This is a deliberate, documented capability for a
//! single-operator tool: the caller is trusted. All interpolation lives in
//! this one module, so a hardening pass (column allow-lists, identifier
//! quoting, a safe expression sub-language) changes no call sites.
//!
//! The only validation performed is rejecting empty input before any SQL
//! is built; structural validation of the fragments is explicitly not
//! attempted.

use rusqlite::Connection;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::error::StoreError;
use crate::lob;
use crate::rows::{PositionalRow, collect_positional, value_to_json};

/// The fixed game column list used by selection and the join.
const GAME_COLUMNS: &str = "price, name, genre, platform, release_year";

/// Column names of the join's name-keyed records, in select-list order.
/// `text` is appended after the large-text drain.
const JOIN_COLUMNS: [&str; 8] = [
    "price",
    "name",
    "genre",
    "platform",
    "release_year",
    "rating",
    "author_username",
    "time",
];

/// Rejections raised before any SQL text is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DynamicQueryError {
    /// The projection column list was empty.
    #[error("projection requires at least one column")]
    EmptyColumnList,
    /// A projection column was empty or whitespace-only.
    #[error("projection column {index} is blank")]
    BlankColumn {
        /// Zero-based position of the offending column.
        index: usize,
    },
    /// The predicate was empty or whitespace-only.
    #[error("predicate must not be blank")]
    BlankPredicate,
}

/// Builds a projection over the player table selecting exactly the given
/// columns, in order, unfiltered.
///
/// Column names are interpolated verbatim; whether they are real player
/// columns is the caller's responsibility.
///
/// # Errors
///
/// Returns an error if the column list is empty or contains a blank entry.
pub fn projection_sql(columns: &[String]) -> Result<String, DynamicQueryError> {
    if columns.is_empty() {
        return Err(DynamicQueryError::EmptyColumnList);
    }
    for (index, column) in columns.iter().enumerate() {
        if column.trim().is_empty() {
            return Err(DynamicQueryError::BlankColumn { index });
        }
    }
    Ok(format!("SELECT {} FROM player", columns.join(", ")))
}

/// Builds a selection of the fixed game column list filtered by the
/// caller's predicate, appended verbatim.
///
/// # Errors
///
/// Returns an error if the predicate is blank.
pub fn selection_sql(predicate: &str) -> Result<String, DynamicQueryError> {
    if predicate.trim().is_empty() {
        return Err(DynamicQueryError::BlankPredicate);
    }
    Ok(format!("SELECT {GAME_COLUMNS} FROM game WHERE {predicate}"))
}

/// Builds the game/review inner join on the composite (name,
/// developing_company) key, filtered by the caller's predicate.
///
/// The review body is not selected directly; the statement carries each
/// review's rowid so the large text can be drained incrementally
/// afterwards.
///
/// # Errors
///
/// Returns an error if the predicate is blank.
pub fn join_sql(predicate: &str) -> Result<String, DynamicQueryError> {
    if predicate.trim().is_empty() {
        return Err(DynamicQueryError::BlankPredicate);
    }
    Ok(format!(
        "SELECT g.price, g.name, g.genre, g.platform, g.release_year,
                r.rating, r.author_username, r.time,
                r.rowid, r.text IS NOT NULL
         FROM game g
         JOIN review r
           ON g.name = r.game_name
          AND g.developing_company = r.game_developing_company
         WHERE {predicate}"
    ))
}

/// Executes an ad-hoc player projection, returning positional rows in the
/// requested column order.
///
/// # Errors
///
/// Returns an error if the column list is invalid or execution fails.
pub fn project_players(
    conn: &Connection,
    columns: &[String],
) -> Result<Vec<PositionalRow>, StoreError> {
    let sql: String = projection_sql(columns)?;
    debug!(sql = %sql, "Executing projection query");
    let mut stmt = conn.prepare(&sql)?;
    collect_positional(&mut stmt, [])
}

/// Executes an ad-hoc game selection, returning positional rows.
///
/// # Errors
///
/// Returns an error if the predicate is blank or execution fails.
pub fn select_games(conn: &Connection, predicate: &str) -> Result<Vec<PositionalRow>, StoreError> {
    let sql: String = selection_sql(predicate)?;
    debug!(sql = %sql, "Executing selection query");
    let mut stmt = conn.prepare(&sql)?;
    collect_positional(&mut stmt, [])
}

/// Executes the filtered game/review join, returning name-keyed records
/// with every review body fully drained into `text`.
///
/// This is the one operation that holds its connection across more than a
/// single statement execution: the statement runs first, then each row's
/// large text is drained over the same connection before it is released.
///
/// # Errors
///
/// Returns an error if the predicate is blank, execution fails, or any
/// text drain fails — a drain failure rejects the whole operation.
pub fn join_games_reviews(
    conn: &Connection,
    predicate: &str,
) -> Result<Vec<Map<String, Value>>, StoreError> {
    let sql: String = join_sql(predicate)?;
    debug!(sql = %sql, "Executing join query");

    let mut collected: Vec<(Map<String, Value>, i64, bool)> = Vec::new();
    {
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut record: Map<String, Value> = Map::new();
            for (index, name) in JOIN_COLUMNS.iter().enumerate() {
                record.insert((*name).to_string(), value_to_json(row.get_ref(index)?));
            }
            let rowid: i64 = row.get(JOIN_COLUMNS.len())?;
            let has_text: bool = row.get(JOIN_COLUMNS.len() + 1)?;
            collected.push((record, rowid, has_text));
        }
    }

    let mut records: Vec<Map<String, Value>> = Vec::with_capacity(collected.len());
    for (mut record, rowid, has_text) in collected {
        let text: Value = if has_text {
            Value::String(lob::drain_text(conn, "review", "text", rowid)?)
        } else {
            Value::Null
        };
        record.insert(String::from("text"), text);
        records.push(record);
    }
    Ok(records)
}
