//! Backend entry-point: wires the product pages, session middleware, and
//! health probes.

mod server;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use std::env;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{self, DbPool, PoolConfig};
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "products.db".into());
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .map_err(|e| std::io::Error::other(format!("failed to open {database_url}: {e}")))?;
    let mut conn = pool
        .get()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    persistence::run_migrations(&mut conn).map_err(|e| std::io::Error::other(e.to_string()))?;
    drop(conn);
    info!(database = %database_url, "schema up to date");

    let config =
        ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr).with_db_pool(pool);
    info!(addr = %config.bind_addr(), "starting HTTP server");
    let health_state = web::Data::new(HealthState::new());
    server::create_server(health_state, config)?.await
}

/// Load the session signing key, falling back to an ephemeral key in dev.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}
