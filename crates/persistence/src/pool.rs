// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bounded connection pool and the `with_connection` unit-of-work contract.
//!
//! This is the only place connection lifecycle is handled. Every logical
//! store operation calls [`Pool::with_connection`] exactly once; the pool
//! guarantees the connection is returned on every exit path before the call
//! resolves, so a failing unit of work can never leak capacity.

use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::schema;

/// Atomic counter for generating unique in-memory database names.
///
/// Each pool over an in-memory database receives a unique shared-cache URI,
/// ensuring deterministic test isolation without time-based collisions.
static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Per-connection busy timeout for writer contention between pooled
/// connections to the same database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool sizing and acquisition behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Connections opened eagerly and kept resident.
    pub min_connections: usize,
    /// Upper bound on concurrently live connections.
    pub max_connections: usize,
    /// How many connections to open when the idle set is empty.
    pub increment: usize,
    /// How long an acquire may wait for a released connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 3,
            increment: 1,
            acquire_timeout: Duration::from_secs(60),
        }
    }
}

/// Where the pool's connections point.
#[derive(Debug, Clone)]
enum Source {
    /// A database file on disk.
    File(PathBuf),
    /// A shared-cache in-memory database, identified by URI.
    ///
    /// The pool's resident minimum connection keeps the shared database
    /// alive for the lifetime of the pool.
    Memory(String),
}

/// Idle connections plus the count of all connections ever opened and not
/// yet dropped. Both are guarded together so growth decisions see a
/// consistent view.
struct Idle {
    connections: Vec<Connection>,
    open: usize,
}

struct PoolInner {
    source: Source,
    config: PoolConfig,
    semaphore: Arc<Semaphore>,
    idle: Mutex<Idle>,
    draining: AtomicBool,
}

/// A bounded pool of `SQLite` connections.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct Pool {
    inner: Arc<PoolInner>,
}

impl Pool {
    /// Opens a pool over a database file, creating it if absent.
    ///
    /// The schema is initialized and `min_connections` are opened eagerly.
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be opened or the schema
    /// cannot be initialized.
    pub fn open_file<P: AsRef<Path>>(path: P, config: PoolConfig) -> Result<Self, StoreError> {
        Self::bootstrap(Source::File(path.as_ref().to_path_buf()), config)
    }

    /// Opens a pool over a fresh shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be opened or the schema
    /// cannot be initialized.
    pub fn open_in_memory(config: PoolConfig) -> Result<Self, StoreError> {
        let db_id: u64 = MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let uri: String = format!("file:gamevault_mem_{db_id}?mode=memory&cache=shared");
        Self::bootstrap(Source::Memory(uri), config)
    }

    fn bootstrap(source: Source, config: PoolConfig) -> Result<Self, StoreError> {
        let resident: usize = config.min_connections.clamp(1, config.max_connections);
        let mut connections: Vec<Connection> = Vec::with_capacity(resident);
        for _ in 0..resident {
            connections.push(open_connection(&source)?);
        }
        if let Some(first) = connections.first() {
            schema::initialize_schema(first)?;
        }
        info!(
            resident,
            max = config.max_connections,
            "Connection pool started"
        );

        Ok(Self {
            inner: Arc::new(PoolInner {
                source,
                semaphore: Arc::new(Semaphore::new(config.max_connections)),
                idle: Mutex::new(Idle {
                    connections,
                    open: resident,
                }),
                draining: AtomicBool::new(false),
                config,
            }),
        })
    }

    /// Acquires a connection, runs the unit of work, and releases the
    /// connection back to the pool on every exit path.
    ///
    /// An acquire beyond capacity suspends cooperatively until a connection
    /// is released; an acquire that cannot be satisfied within the
    /// configured timeout fails with [`StoreError::AcquireTimeout`].
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is draining, the acquire times out, a
    /// connection cannot be opened, or the unit of work itself fails.
    pub async fn with_connection<T, F>(&self, unit_of_work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        if self.inner.draining.load(Ordering::Acquire) {
            return Err(StoreError::PoolDraining);
        }

        let acquire = Arc::clone(&self.inner.semaphore).acquire_owned();
        let permit: OwnedSemaphorePermit =
            match timeout(self.inner.config.acquire_timeout, acquire).await {
                Ok(Ok(permit)) => permit,
                Ok(Err(_)) => return Err(StoreError::PoolDraining),
                Err(_) => {
                    warn!(
                        waited = ?self.inner.config.acquire_timeout,
                        "Connection acquire timed out"
                    );
                    return Err(StoreError::AcquireTimeout {
                        waited: self.inner.config.acquire_timeout,
                    });
                }
            };

        // Drain may have begun while we were waiting on the semaphore.
        if self.inner.draining.load(Ordering::Acquire) {
            return Err(StoreError::PoolDraining);
        }

        let mut conn: Connection = self.checkout()?;
        let outcome: Result<T, StoreError> = unit_of_work(&mut conn);
        self.checkin(conn);
        drop(permit);
        outcome
    }

    /// Takes an idle connection, growing the pool by the configured
    /// increment when the idle set is empty. The held semaphore permit
    /// guarantees headroom below `max_connections`.
    fn checkout(&self) -> Result<Connection, StoreError> {
        let mut idle = self.inner.idle.lock();
        if let Some(conn) = idle.connections.pop() {
            return Ok(conn);
        }

        let headroom: usize = self.inner.config.max_connections.saturating_sub(idle.open);
        let to_open: usize = if headroom == 0 {
            1
        } else {
            self.inner.config.increment.clamp(1, headroom)
        };
        for _ in 0..to_open {
            idle.connections.push(open_connection(&self.inner.source)?);
            idle.open += 1;
        }
        debug!(opened = to_open, total = idle.open, "Grew connection pool");

        idle.connections
            .pop()
            .ok_or_else(|| StoreError::ConnectionFailed(String::from("pool has no connection")))
    }

    /// Returns a connection to the idle set. During drain the connection is
    /// dropped instead; either way the caller's result is never masked.
    fn checkin(&self, conn: Connection) {
        let mut idle = self.inner.idle.lock();
        if self.inner.draining.load(Ordering::Acquire) {
            idle.open = idle.open.saturating_sub(1);
            debug!("Dropped connection returned during drain");
            drop(conn);
            return;
        }
        idle.connections.push(conn);
    }

    /// Drains the pool: rejects new acquisitions, waits up to `grace` for
    /// in-flight units of work to finish, then drops all connections.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DrainTimeout`] if in-flight work does not
    /// finish within the grace period.
    pub async fn close(&self, grace: Duration) -> Result<(), StoreError> {
        self.inner.draining.store(true, Ordering::Release);
        info!(grace = ?grace, "Draining connection pool");

        let capacity: u32 = u32::try_from(self.inner.config.max_connections).unwrap_or(u32::MAX);
        match timeout(grace, self.inner.semaphore.acquire_many(capacity)).await {
            Ok(Ok(permits)) => permits.forget(),
            Ok(Err(_)) => {}
            Err(_) => return Err(StoreError::DrainTimeout { grace }),
        }

        let mut idle = self.inner.idle.lock();
        let dropped: usize = idle.connections.len();
        idle.connections.clear();
        idle.open = 0;
        info!(connections = dropped, "Connection pool drained");
        Ok(())
    }
}

/// Opens one connection to the pool's source with per-connection pragmas
/// applied. Foreign key enforcement is per-connection in `SQLite`, so it is
/// set here rather than in the schema.
fn open_connection(source: &Source) -> Result<Connection, StoreError> {
    let conn: Connection = match source {
        Source::File(path) => Connection::open(path),
        Source::Memory(uri) => Connection::open_with_flags(
            uri,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        ),
    }
    .map_err(|err| StoreError::ConnectionFailed(err.to_string()))?;

    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    Ok(conn)
}
