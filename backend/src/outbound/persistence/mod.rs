//! SQLite persistence adapter built on Diesel.

mod diesel_product_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_product_repository::DieselProductRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Bring a connection's schema up to date.
///
/// Run once at startup (and by tests against fresh in-memory databases)
/// before the repository is used.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PoolError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| PoolError::migration(err.to_string()))
}
