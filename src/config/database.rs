use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

/// Configuration for connecting to the SQLite user database.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Database {
  /// Connection URL of the SQLite database. The file is created
  /// if it does not exist yet.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_DB_URL` or `DATABASE_URL`
  pub url: Sensitive<String>,
  /// Minimum idle database connections kept in the pool.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_DB_MIN_IDLE`
  pub min_idle: Option<NonZeroU32>,
  /// Maximum amount of connections the pool may open.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_DB_POOL_SIZE`
  pub pool_size: NonZeroU32,
  /// How long this server can wait for a connection to be
  /// acquired before giving up.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_DB_TIMEOUT_SECS`
  pub timeout_secs: NonZeroU64,
}

impl Database {
  const DEFAULT_URL: &'static str = "sqlite://users.db";
  const DEFAULT_POOL_SIZE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(n) => n,
    None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
  };
  const DEFAULT_TIMEOUT_SECS: NonZeroU64 = match NonZeroU64::new(5) {
    Some(n) => n,
    None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
  };
}

impl Default for Database {
  fn default() -> Self {
    Self {
      url: Sensitive::new(Self::DEFAULT_URL.to_string()),
      min_idle: None,
      pool_size: Self::DEFAULT_POOL_SIZE,
      timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
    }
  }
}

impl Validate for Database {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("url", {
      let mut error = ValidateError::msg_builder();
      if !validator::extras::validate_url(&self.url) {
        error.insert("Invalid database connection URL");
      } else if !self.url.starts_with("sqlite:") {
        error.insert("Only SQLite databases are supported");
      }
      error.build()
    });

    if let Some(min_idle) = self.min_idle {
      if min_idle > self.pool_size {
        fields.insert(
          "min_idle",
          ValidateError::message("Must not be greater than pool_size"),
        );
      }
    }

    fields.build().into_result()
  }
}
