//! Connection pool, pragmas, and migrations.

pub mod write_actor;

use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use folio_core::errors::{DatabaseError, Error, Result};

pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = Arc<Pool<ConnectionManager<SqliteConnection>>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a caller waits for a pooled connection before the request fails.
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const POOL_MAX_SIZE: u32 = 10;

/// Applies the per-connection pragmas every session needs: cascade deletes
/// only work with foreign keys switched on, and WAL plus a busy timeout keep
/// concurrent readers off the writer's back.
#[derive(Debug)]
struct ConnectionPragmas;

impl diesel::r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for ConnectionPragmas
{
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates the bounded connection pool for `db_path`.
pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(POOL_MAX_SIZE)
        .connection_timeout(POOL_ACQUIRE_TIMEOUT)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

/// Fetches a connection, converting pool exhaustion into a typed error
/// instead of queueing indefinitely.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get()
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))
}

/// Runs all embedded migrations to completion.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = get_connection(pool)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(DatabaseError::MigrationFailed(e.to_string())))?;
    Ok(())
}
