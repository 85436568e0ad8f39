// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Result shaping: tabular `SQLite` results into JSON-ready values.
//!
//! Positional results are ordered value sequences matching the statement's
//! select list. Only the game/review join produces name-keyed records, for
//! the one consumer that matches on a column name.

use rusqlite::types::ValueRef;
use rusqlite::{Params, Statement};
use serde_json::Value;

use crate::error::StoreError;

/// One result row as an ordered sequence of column values.
pub type PositionalRow = Vec<Value>;

/// Converts a single `SQLite` value into its JSON representation.
///
/// A non-finite real has no JSON number form and becomes null; blobs are
/// exposed as lossy UTF-8 strings.
pub fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Number(n.into()),
        ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Runs a prepared statement and collects every row positionally, column
/// order matching the statement's select list.
///
/// # Errors
///
/// Returns an error if execution or row extraction fails; zero rows is a
/// successful empty result.
pub fn collect_positional<P: Params>(
    stmt: &mut Statement<'_>,
    params: P,
) -> Result<Vec<PositionalRow>, StoreError> {
    let column_count: usize = stmt.column_count();
    let mut rows = stmt.query(params)?;
    let mut collected: Vec<PositionalRow> = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values: PositionalRow = Vec::with_capacity(column_count);
        for index in 0..column_count {
            values.push(value_to_json(row.get_ref(index)?));
        }
        collected.push(values);
    }
    Ok(collected)
}
