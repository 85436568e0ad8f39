// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incremental large-text reads.
//!
//! Review bodies are never handed across the component boundary as opaque
//! handles: they are drained to completion into an in-memory string first,
//! chunk by chunk in arrival order, over the blob API.

use rusqlite::{Connection, MAIN_DB};
use std::io::Read;

use crate::error::StoreError;

/// Chunk size for incremental reads.
const CHUNK_SIZE: usize = 4096;

/// Drains one large text value into a `String`.
///
/// Reads the value in fixed-size chunks until exhaustion, concatenating in
/// arrival order. The drain acts on result data already fetched and holds
/// no pool resource beyond the caller's connection.
///
/// # Errors
///
/// Returns [`StoreError::LobRead`] if the value cannot be opened, a chunk
/// read fails, or the drained bytes are not valid UTF-8; any such failure
/// rejects the enclosing operation.
pub fn drain_text(
    conn: &Connection,
    table: &str,
    column: &str,
    rowid: i64,
) -> Result<String, StoreError> {
    let mut blob = conn
        .blob_open(MAIN_DB, table, column, rowid, true)
        .map_err(|err| StoreError::LobRead(err.to_string()))?;

    let capacity: usize = usize::try_from(blob.size()).unwrap_or(0);
    let mut content: Vec<u8> = Vec::with_capacity(capacity);
    let mut chunk: [u8; CHUNK_SIZE] = [0; CHUNK_SIZE];
    loop {
        let read: usize = blob
            .read(&mut chunk)
            .map_err(|err| StoreError::LobRead(err.to_string()))?;
        if read == 0 {
            break;
        }
        content.extend_from_slice(&chunk[..read]);
    }

    String::from_utf8(content).map_err(|err| StoreError::LobRead(err.to_string()))
}
