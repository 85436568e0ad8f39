// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod analytics_tests;

use std::time::Duration;

use crate::pool::{Pool, PoolConfig};

/// Opens a default-sized pool over a fresh in-memory database.
pub fn test_pool() -> Pool {
    Pool::open_in_memory(PoolConfig::default()).unwrap()
}

/// Opens a pool with explicit sizing for contention tests.
pub fn sized_pool(max_connections: usize, acquire_timeout: Duration) -> Pool {
    Pool::open_in_memory(PoolConfig {
        min_connections: 1,
        max_connections,
        increment: 1,
        acquire_timeout,
    })
    .unwrap()
}

/// Seeds the player/game/review graph used by the analytics and join tests.
///
/// Game A is reviewed by both authors, game B only by `x`, and game C is
/// unreviewed. The author universe is therefore `{x, y}`.
pub async fn seed_review_graph(pool: &Pool) {
    pool.with_connection(|conn| {
        conn.execute_batch(
            "INSERT INTO player (username, followers, following, reviews, achievements) VALUES
                ('x', 10, 1, 2, 5),
                ('y', 80, 2, 1, 9);
             INSERT INTO game (name, developing_company, price, genre, platform, release_year) VALUES
                ('A', 'Acme', 59.99, 'RPG', 'PC', 2023),
                ('B', 'Acme', 19.99, 'Puzzle', 'Switch', 2021),
                ('C', 'Bolt', 39.99, 'Racing', 'PC', 2022);
             INSERT INTO review (author_username, game_name, game_developing_company, rating, text, time) VALUES
                ('x', 'A', 'Acme', 4.0, 'Loved the combat loop.', '2024-01-05 10:00:00'),
                ('y', 'A', 'Acme', 2.0, 'Too grindy for me.', '2024-01-06 11:30:00'),
                ('x', 'B', 'Acme', 5.0, 'Tight puzzles.', '2024-02-01 09:15:00');",
        )?;
        Ok(())
    })
    .await
    .unwrap();
}
