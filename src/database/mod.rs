use error_stack::{Report, ResultExt};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};

use crate::config;

pub mod error;
pub use error::*;

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Sqlite>;
pub type Connection = sqlx::SqliteConnection;

#[derive(Clone)]
pub struct Pool {
  pool: sqlx::SqlitePool,
}

impl Pool {
  /// Opens a pool for the configured SQLite database, creating
  /// the database file if needed, and applies pending migrations.
  pub async fn new(cfg: &config::Database) -> Result<Self> {
    let mut pool_opts = SqlitePoolOptions::new()
      .acquire_timeout(Duration::from_secs(cfg.timeout_secs.get()))
      .max_connections(cfg.pool_size.get());

    if let Some(min_idle) = cfg.min_idle {
      pool_opts = pool_opts.min_connections(min_idle.get());
    }

    let connect_opts = SqliteConnectOptions::from_str(cfg.url.as_str())
      .change_context(Error::InvalidUrl)?
      .create_if_missing(true);

    let pool = Self {
      pool: pool_opts.connect_lazy_with(connect_opts),
    };

    pool.wait_until_healthy().await?;
    pool.migrate().await?;

    Ok(pool)
  }

  /// Private in-memory database with every migration applied.
  ///
  /// Every connection to `sqlite::memory:` opens a fresh database,
  /// so the pool holds exactly one connection that never expires.
  pub async fn in_memory() -> Result<Self> {
    let connect_opts =
      SqliteConnectOptions::from_str("sqlite::memory:").change_context(Error::InvalidUrl)?;

    let pool = SqlitePoolOptions::new()
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None)
      .max_lifetime(None)
      .connect_with(connect_opts)
      .await
      .into_db_error()?;

    let pool = Self { pool };
    pool.migrate().await?;

    Ok(pool)
  }
}

impl std::fmt::Debug for Pool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.pool.fmt(f)
  }
}

impl Pool {
  #[must_use]
  pub fn connections(&self) -> u32 {
    self.pool.size()
  }

  #[must_use]
  pub fn is_healthy(&self) -> bool {
    self.connections() > 0
  }

  #[tracing::instrument(name = "db.connect", skip(self))]
  pub async fn get(&self) -> Result<PoolConnection> {
    if let Some(inner) = self.pool.try_acquire() {
      Ok(inner)
    } else {
      let result = self.pool.acquire().await;
      result.map_err(|e| match e {
        sqlx::Error::PoolTimedOut if !self.is_healthy() => {
          Report::new(e).change_context(Error::UnhealthyPool)
        }
        e => Report::new(Error::Internal(e)),
      })
    }
  }

  #[tracing::instrument(skip(self))]
  pub async fn wait_until_healthy(&self) -> Result<()> {
    match self.pool.acquire().await {
      Ok(..) => Ok(()),
      Err(e) if !self.is_healthy() => Err(e).change_context(Error::UnhealthyPool),
      Err(err) => Err(Report::new(Error::Internal(err))),
    }
  }

  #[tracing::instrument(name = "db.migrate", skip(self))]
  pub async fn migrate(&self) -> Result<()> {
    sqlx::migrate!("./migrations")
      .run(&self.pool)
      .await
      .change_context(Error::Migration)
  }
}
