// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the four fixed relational analytics statements.

use serde_json::json;

use crate::analytics;
use crate::pool::Pool;
use crate::tests::{seed_review_graph, test_pool};

#[tokio::test]
async fn threshold_returns_players_strictly_above_the_reference() {
    let pool: Pool = test_pool();
    seed_review_graph(&pool).await;

    // x has 5 achievements, y has 9; only y strictly exceeds x.
    let rows = pool
        .with_connection(|conn| analytics::players_above_reference(conn, "x"))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], json!("y"));
}

#[tokio::test]
async fn threshold_with_a_missing_reference_is_empty_not_an_error() {
    let pool: Pool = test_pool();
    seed_review_graph(&pool).await;

    let rows = pool
        .with_connection(|conn| analytics::players_above_reference(conn, "nobody"))
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn division_returns_only_games_reviewed_by_every_author() {
    let pool: Pool = test_pool();
    seed_review_graph(&pool).await;

    // Universe is {x, y}; A is reviewed by both, B only by x, C by nobody.
    let rows = pool
        .with_connection(|conn| analytics::games_reviewed_by_all(conn))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], vec![json!("A"), json!("Acme")]);
}

#[tokio::test]
async fn division_with_no_reviews_holds_vacuously_for_every_game() {
    let pool: Pool = test_pool();
    let rows = pool
        .with_connection(|conn| {
            conn.execute_batch(
                "INSERT INTO game (name, developing_company) VALUES
                    ('A', 'Acme'),
                    ('B', 'Bolt');",
            )?;
            analytics::games_reviewed_by_all(conn)
        })
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn grouped_average_returns_the_mean_per_reviewed_game() {
    let pool: Pool = test_pool();
    seed_review_graph(&pool).await;

    let mut rows = pool
        .with_connection(|conn| analytics::average_ratings(conn))
        .await
        .unwrap();
    rows.sort_by(|a, b| a[0].as_str().cmp(&b[0].as_str()));

    // A averaged over ratings 4 and 2; B has the single rating 5.
    // C is unreviewed and absent under inner-join semantics.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![json!("A"), json!("Acme"), json!(3.0)]);
    assert_eq!(rows[1], vec![json!("B"), json!("Acme"), json!(5.0)]);
}

#[tokio::test]
async fn follower_threshold_keeps_only_players_at_or_above_fifty() {
    let pool: Pool = test_pool();
    seed_review_graph(&pool).await;

    let rows = pool
        .with_connection(|conn| analytics::popular_players(conn))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], json!("y"));
    assert_eq!(rows[0][1], json!(80));
}
