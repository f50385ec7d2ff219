use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{auth::SessionManager, config, database, store::UserStore};

/// State shared by every worker and request handler.
#[derive(Debug, Clone)]
pub struct App {
  pub config: Arc<config::Server>,
  pub db: database::Pool,
  pub sessions: Arc<SessionManager>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
    let db = database::Pool::new(&cfg.db)
      .await
      .change_context(AppError)
      .attach_printable("could not connect to the user database")?;

    Ok(Self::with_pool(cfg, db))
  }

  #[must_use]
  pub fn with_pool(cfg: config::Server, db: database::Pool) -> Self {
    let sessions = SessionManager::new(&cfg.session);
    Self {
      config: Arc::new(cfg),
      db,
      sessions: Arc::new(sessions),
    }
  }

  #[must_use]
  pub fn store(&self) -> &dyn UserStore {
    &self.db
  }
}
