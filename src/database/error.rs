use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
  /// The configured connection URL cannot be parsed
  /// as a SQLite connection string.
  #[error("invalid connection url")]
  InvalidUrl,
  /// An error caused by an [`sqlx`] error.
  #[error("received a pool error: {0}")]
  Internal(sqlx::Error),
  /// Embedded migrations could not be applied.
  #[error("failed to run migrations")]
  Migration,
  /// The pool has no reliable connection to the database.
  #[error("unhealthy database pool")]
  UnhealthyPool,
  /// A write was rejected by a UNIQUE constraint. Holds the
  /// offending `table.column` reported by SQLite.
  #[error("unique constraint violated on {0}")]
  UniqueViolation(String),
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
  fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
  fn into_db_error(self) -> Result<T> {
    self.map_err(|e| {
      let column = match &e {
        sqlx::Error::Database(err) if err.is_unique_violation() => Some(
          err
            .message()
            .rsplit(": ")
            .next()
            .unwrap_or_default()
            .to_string(),
        ),
        _ => None,
      };

      match column {
        Some(column) => Report::new(e).change_context(Error::UniqueViolation(column)),
        None => Report::new(Error::Internal(e)),
      }
    })
  }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Inspects the current context of a database report without
/// matching on it at every call site.
pub trait ErrorExt2 {
  fn unique_violation(&self) -> Option<&str>;
}

impl ErrorExt2 for Report<Error> {
  fn unique_violation(&self) -> Option<&str> {
    match self.current_context() {
      Error::UniqueViolation(column) => Some(column),
      _ => None,
    }
  }
}
