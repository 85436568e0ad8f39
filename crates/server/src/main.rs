// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use gamevault_domain::{DemoRename, DemoRow, ItemUpdate, NewPlayer};
use gamevault_persistence::{PositionalRow, Store, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{error, info};

/// How long in-flight units of work get to finish during shutdown.
const DRAIN_GRACE: Duration = Duration::from_secs(10);

/// GameVault Server - HTTP front end for the game catalog database
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. Falls back to the GAMEVAULT_DB
    /// environment variable, then to an in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The pooled store every handler executes against.
    store: Store,
}

/// Response envelope for the fixed table fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableResponse {
    /// The table rows, positional.
    data: Vec<PositionalRow>,
}

/// Response envelope for write operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
}

/// Response envelope for the demonstration table count.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CountResponse {
    /// Success indicator.
    success: bool,
    /// The row count.
    count: i64,
}

/// Response envelope for analytics and dynamic queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DataResponse {
    /// Success indicator.
    success: bool,
    /// The result rows, positional.
    data: Vec<PositionalRow>,
}

/// Response envelope for the game/review join, whose rows are name-keyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JoinResponse {
    /// Success indicator.
    success: bool,
    /// The joined records.
    data: Vec<Map<String, Value>>,
}

/// Request body for deleting a player.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DeletePlayerRequest {
    /// The username to delete, trimmed before comparison.
    username: String,
}

/// Request body for the ad-hoc player projection.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ProjectPlayerRequest {
    /// The columns to select. Missing or empty is a client error.
    columns: Option<Vec<String>>,
}

/// Request body for the achievement-threshold query.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct NestedAggregateRequest {
    /// The reference player's username.
    username: String,
}

/// Request body for the ad-hoc game selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SelectGameRequest {
    /// The free-text predicate. Anything but a string is a client error.
    conditions: Option<Value>,
}

/// Request body for the filtered game/review join.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct JoinTableRequest {
    /// The free-text predicate. Anything but a string is a client error.
    #[serde(rename = "where")]
    predicate: Option<Value>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Success indicator, always false here.
    success: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl HttpError {
    /// A 400 rejection for malformed request fields.
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: String::from(message),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidQuery(_) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            _ => {
                error!(error = %err, "Store error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("database operation failed"),
                }
            }
        }
    }
}

/// Maps a write's rows-affected outcome to the response envelope.
///
/// Zero rows affected is reported as a failure, distinct from a database
/// error, so stale updates and absent deletes do not look like successes.
fn write_result(affected: bool, message: &str) -> Result<Json<WriteResponse>, HttpError> {
    if affected {
        Ok(Json(WriteResponse { success: true }))
    } else {
        Err(HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from(message),
        })
    }
}

/// Handler for GET /check-db-connection endpoint.
///
/// Probes the pool and reports plain text, never an error status.
async fn handle_check_db_connection(AxumState(state): AxumState<AppState>) -> &'static str {
    match state.store.ping().await {
        Ok(()) => "connected",
        Err(err) => {
            error!(error = %err, "Connection check failed");
            "unable to connect"
        }
    }
}

/// Handler for GET /player endpoint.
async fn handle_fetch_players(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<TableResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.fetch_players().await?;
    Ok(Json(TableResponse { data }))
}

/// Handler for GET /item endpoint.
async fn handle_fetch_items(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<TableResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.fetch_items().await?;
    Ok(Json(TableResponse { data }))
}

/// Handler for GET /game endpoint.
async fn handle_fetch_games(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<TableResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.fetch_games().await?;
    Ok(Json(TableResponse { data }))
}

/// Handler for GET /demotable endpoint.
async fn handle_fetch_demotable(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<TableResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.fetch_demotable().await?;
    Ok(Json(TableResponse { data }))
}

/// Handler for POST /insert-player endpoint.
async fn handle_insert_player(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<NewPlayer>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(username = %req.username, "Handling insert_player request");
    let affected: bool = state.store.insert_player(req).await?;
    write_result(affected, "player was not inserted")
}

/// Handler for POST /delete-Player endpoint.
///
/// The capitalised path segment is part of the public surface.
async fn handle_delete_player(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<DeletePlayerRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(username = %req.username, "Handling delete_player request");
    let affected: bool = state.store.delete_player(&req.username).await?;
    write_result(affected, "no player matched the given username")
}

/// Handler for POST /update-item endpoint.
async fn handle_update_item(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ItemUpdate>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(old_name = %req.old_name, new_name = %req.new_name, "Handling update_item request");
    let affected: bool = state.store.update_item(req).await?;
    write_result(affected, "no item matched the old name, price, and function")
}

/// Handler for POST /project-player endpoint.
///
/// Rejects a missing or empty column list with 400 before the store is
/// consulted.
async fn handle_project_player(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ProjectPlayerRequest>,
) -> Result<Json<DataResponse>, HttpError> {
    let columns: Vec<String> = req
        .columns
        .filter(|columns| !columns.is_empty())
        .ok_or_else(|| HttpError::bad_request("columns must be a non-empty array"))?;
    info!(columns = ?columns, "Handling project_player request");
    let data: Vec<PositionalRow> = state.store.project_players(columns).await?;
    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// Handler for POST /initiate-demotable endpoint.
async fn handle_initiate_demotable(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling initiate_demotable request");
    state.store.reset_demotable().await?;
    Ok(Json(WriteResponse { success: true }))
}

/// Handler for POST /insert-demotable endpoint.
async fn handle_insert_demotable(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<DemoRow>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(id = req.id, "Handling insert_demotable request");
    let affected: bool = state.store.insert_demo_row(req).await?;
    write_result(affected, "row was not inserted")
}

/// Handler for POST /update-name-demotable endpoint.
async fn handle_update_name_demotable(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<DemoRename>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(old_name = %req.old_name, new_name = %req.new_name, "Handling update_name request");
    let affected: bool = state.store.rename_demo_row(req).await?;
    write_result(affected, "no row matched the old name")
}

/// Handler for GET /count-demotable endpoint.
async fn handle_count_demotable(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<CountResponse>, HttpError> {
    let count: i64 = state.store.count_demotable().await?;
    Ok(Json(CountResponse {
        success: true,
        count,
    }))
}

/// Handler for POST /nested-aggregate endpoint.
///
/// Players with more achievements than the referenced player. An unknown
/// reference yields an empty result, not an error.
async fn handle_nested_aggregate(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<NestedAggregateRequest>,
) -> Result<Json<DataResponse>, HttpError> {
    info!(username = %req.username, "Handling nested_aggregate request");
    let data: Vec<PositionalRow> = state.store.players_above_reference(&req.username).await?;
    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// Handler for GET /division endpoint.
///
/// Games reviewed by every author present in the review table.
async fn handle_division(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.games_reviewed_by_all().await?;
    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// Handler for GET /group-by endpoint.
///
/// Average rating per reviewed game.
async fn handle_group_by(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.average_ratings().await?;
    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// Handler for GET /having-aggregate endpoint.
///
/// Players at or above the fixed follower threshold.
async fn handle_having_aggregate(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<DataResponse>, HttpError> {
    let data: Vec<PositionalRow> = state.store.popular_players().await?;
    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// Handler for POST /select-game endpoint.
///
/// Rejects a missing or non-string conditions field with 400.
async fn handle_select_game(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<SelectGameRequest>,
) -> Result<Json<DataResponse>, HttpError> {
    let predicate: &str = req
        .conditions
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| HttpError::bad_request("conditions must be a string"))?;
    info!(predicate = %predicate, "Handling select_game request");
    let data: Vec<PositionalRow> = state.store.select_games(predicate).await?;
    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// Handler for POST /join-table endpoint.
///
/// Rejects a missing or non-string where field with 400.
async fn handle_join_table(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<JoinTableRequest>,
) -> Result<Json<JoinResponse>, HttpError> {
    let predicate: &str = req
        .predicate
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| HttpError::bad_request("where must be a string"))?;
    info!(predicate = %predicate, "Handling join_table request");
    let data: Vec<Map<String, Value>> = state.store.join_reviews(predicate).await?;
    Ok(Json(JoinResponse {
        success: true,
        data,
    }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/check-db-connection", get(handle_check_db_connection))
        .route("/player", get(handle_fetch_players))
        .route("/item", get(handle_fetch_items))
        .route("/game", get(handle_fetch_games))
        .route("/demotable", get(handle_fetch_demotable))
        .route("/insert-player", post(handle_insert_player))
        .route("/delete-Player", post(handle_delete_player))
        .route("/update-item", post(handle_update_item))
        .route("/project-player", post(handle_project_player))
        .route("/initiate-demotable", post(handle_initiate_demotable))
        .route("/insert-demotable", post(handle_insert_demotable))
        .route("/update-name-demotable", post(handle_update_name_demotable))
        .route("/count-demotable", get(handle_count_demotable))
        .route("/nested-aggregate", post(handle_nested_aggregate))
        .route("/division", get(handle_division))
        .route("/group-by", get(handle_group_by))
        .route("/having-aggregate", get(handle_having_aggregate))
        .route("/select-game", post(handle_select_game))
        .route("/join-table", post(handle_join_table))
        .with_state(app_state)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => error!(error = %err, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing GameVault Server");

    // Open the store (file-based from the CLI argument or environment,
    // otherwise in-memory)
    let database: Option<String> = args
        .database
        .or_else(|| std::env::var("GAMEVAULT_DB").ok());
    let store: Store = if let Some(db_path) = &database {
        info!("Using file-based database at: {}", db_path);
        Store::open_file(db_path)?
    } else {
        info!("Using in-memory database");
        Store::in_memory()?
    };

    let app_state: AppState = AppState {
        store: store.clone(),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server until a shutdown signal arrives
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drain the pool; in-flight work gets the grace period to finish
    info!("Shutdown signal received, draining connection pool");
    if let Err(err) = store.close(DRAIN_GRACE).await {
        error!(error = %err, "Pool drain failed");
        std::process::exit(1);
    }
    info!("Pool drained, exiting");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    /// Helper to create test app state over a fresh in-memory store.
    fn create_test_app_state() -> AppState {
        let store: Store = Store::in_memory().expect("Failed to create in-memory store");
        AppState { store }
    }

    /// Helper to issue a JSON POST against the router.
    async fn post_json(app: Router, uri: &str, body: &Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    /// Helper to issue a GET against the router.
    async fn get_uri(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Helper to read a response body as bytes.
    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn check_db_connection_reports_connected() {
        let app: Router = build_router(create_test_app_state());

        let response = get_uri(app, "/check-db-connection").await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        assert_eq!(body_bytes(response).await, b"connected");
    }

    #[tokio::test]
    async fn inserted_player_appears_in_the_table_fetch() {
        let app: Router = build_router(create_test_app_state());

        let insert = post_json(
            app.clone(),
            "/insert-player",
            &json!({
                "username": "ada",
                "followers": 3,
                "following": 1,
                "reviews": 0,
                "achievements": 7
            }),
        )
        .await;
        assert_eq!(insert.status(), HttpStatusCode::OK);
        let write: WriteResponse = serde_json::from_slice(&body_bytes(insert).await).unwrap();
        assert!(write.success);

        let fetch = get_uri(app, "/player").await;
        assert_eq!(fetch.status(), HttpStatusCode::OK);
        let table: TableResponse = serde_json::from_slice(&body_bytes(fetch).await).unwrap();
        assert_eq!(table.data, vec![vec![json!("ada"), json!(3), json!(1), json!(0), json!(7)]]);
    }

    #[tokio::test]
    async fn deleting_an_absent_player_is_a_failure_envelope() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(app, "/delete-Player", &json!({"username": "ghost"})).await;

        assert_eq!(response.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(!body.success);
    }

    #[tokio::test]
    async fn delete_removes_an_inserted_player() {
        let app: Router = build_router(create_test_app_state());

        post_json(
            app.clone(),
            "/insert-player",
            &json!({
                "username": "ada",
                "followers": 0,
                "following": 0,
                "reviews": 0,
                "achievements": 0
            }),
        )
        .await;

        let delete = post_json(app.clone(), "/delete-Player", &json!({"username": "ada"})).await;
        assert_eq!(delete.status(), HttpStatusCode::OK);

        let fetch = get_uri(app, "/player").await;
        let table: TableResponse = serde_json::from_slice(&body_bytes(fetch).await).unwrap();
        assert!(table.data.is_empty());
    }

    #[tokio::test]
    async fn update_item_with_a_stale_triple_is_a_failure_envelope() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(
            app,
            "/update-item",
            &json!({
                "oldName": "Sword",
                "newName": "Blade",
                "oldPrice": 10.0,
                "newPrice": 12.0,
                "oldFunction": "melee",
                "newFunction": "melee"
            }),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(!body.success);
    }

    #[tokio::test]
    async fn project_player_without_columns_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let missing = post_json(app.clone(), "/project-player", &json!({})).await;
        assert_eq!(missing.status(), HttpStatusCode::BAD_REQUEST);

        let empty = post_json(app, "/project-player", &json!({"columns": []})).await;
        assert_eq!(empty.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn project_player_returns_the_requested_columns() {
        let app: Router = build_router(create_test_app_state());

        post_json(
            app.clone(),
            "/insert-player",
            &json!({
                "username": "ada",
                "followers": 3,
                "following": 1,
                "reviews": 0,
                "achievements": 7
            }),
        )
        .await;

        let response = post_json(
            app,
            "/project-player",
            &json!({"columns": ["username", "achievements"]}),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: DataResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.success);
        assert_eq!(body.data, vec![vec![json!("ada"), json!(7)]]);
    }

    #[tokio::test]
    async fn demotable_lifecycle_over_the_endpoints() {
        let app: Router = build_router(create_test_app_state());

        let initiate = post_json(app.clone(), "/initiate-demotable", &json!({})).await;
        assert_eq!(initiate.status(), HttpStatusCode::OK);

        let insert = post_json(
            app.clone(),
            "/insert-demotable",
            &json!({"id": 1, "name": "first"}),
        )
        .await;
        assert_eq!(insert.status(), HttpStatusCode::OK);

        let count = get_uri(app.clone(), "/count-demotable").await;
        let counted: CountResponse = serde_json::from_slice(&body_bytes(count).await).unwrap();
        assert!(counted.success);
        assert_eq!(counted.count, 1);

        let rename = post_json(
            app.clone(),
            "/update-name-demotable",
            &json!({"oldName": "first", "newName": "renamed"}),
        )
        .await;
        assert_eq!(rename.status(), HttpStatusCode::OK);

        let fetch = get_uri(app, "/demotable").await;
        let table: TableResponse = serde_json::from_slice(&body_bytes(fetch).await).unwrap();
        assert_eq!(table.data, vec![vec![json!(1), json!("renamed")]]);
    }

    #[tokio::test]
    async fn nested_aggregate_with_an_unknown_reference_is_empty_success() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(app, "/nested-aggregate", &json!({"username": "nobody"})).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: DataResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.success);
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn analytics_endpoints_succeed_on_an_empty_database() {
        let app: Router = build_router(create_test_app_state());

        for uri in ["/division", "/group-by", "/having-aggregate"] {
            let response = get_uri(app.clone(), uri).await;
            assert_eq!(response.status(), HttpStatusCode::OK);
            let body: DataResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
            assert!(body.success);
            assert!(body.data.is_empty());
        }
    }

    #[tokio::test]
    async fn select_game_with_a_missing_conditions_field_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let missing = post_json(app.clone(), "/select-game", &json!({})).await;
        assert_eq!(missing.status(), HttpStatusCode::BAD_REQUEST);

        let non_string = post_json(app.clone(), "/select-game", &json!({"conditions": 5})).await;
        assert_eq!(non_string.status(), HttpStatusCode::BAD_REQUEST);

        let blank = post_json(app, "/select-game", &json!({"conditions": "  "})).await;
        assert_eq!(blank.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn select_game_applies_the_predicate() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(app, "/select-game", &json!({"conditions": "1 = 0"})).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: DataResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.success);
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn join_table_with_a_missing_where_field_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(app, "/join-table", &json!({})).await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn join_table_succeeds_with_a_trivial_predicate() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(app, "/join-table", &json!({"where": "1 = 1"})).await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let body: JoinResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body.success);
        assert!(body.data.is_empty());
    }
}
