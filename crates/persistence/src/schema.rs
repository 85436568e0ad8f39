// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::StoreError;

/// Initializes the catalog schema.
///
/// Referential integrity for reviews is enforced here by the store; the
/// access layer above assumes it and never re-checks. The demonstration
/// table is created too so it can be read before its first reset.
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
    info!("Initializing database schema");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS player (
            username TEXT PRIMARY KEY NOT NULL,
            followers INTEGER NOT NULL DEFAULT 0,
            following INTEGER NOT NULL DEFAULT 0,
            reviews INTEGER NOT NULL DEFAULT 0,
            achievements INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS item (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            function TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS game (
            name TEXT NOT NULL,
            developing_company TEXT NOT NULL,
            price REAL,
            genre TEXT,
            platform TEXT,
            release_year INTEGER,
            PRIMARY KEY (name, developing_company)
        );

        CREATE TABLE IF NOT EXISTS review (
            author_username TEXT NOT NULL,
            game_name TEXT NOT NULL,
            game_developing_company TEXT NOT NULL,
            rating REAL NOT NULL,
            text TEXT,
            time TEXT,
            FOREIGN KEY(author_username) REFERENCES player(username),
            FOREIGN KEY(game_name, game_developing_company)
                REFERENCES game(name, developing_company)
        );

        CREATE INDEX IF NOT EXISTS idx_review_game
            ON review(game_name, game_developing_company);

        CREATE TABLE IF NOT EXISTS demotable (
            id INTEGER PRIMARY KEY,
            name TEXT
        );
        ",
    )?;

    Ok(())
}
