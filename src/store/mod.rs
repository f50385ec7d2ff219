//! Lookup and persistence of user records.
//!
//! Services only talk to the [`UserStore`] trait so they can be
//! exercised against [`MemoryUserStore`] as well as the SQLite
//! [`Pool`].
use async_trait::async_trait;
use error_stack::{Result, ResultExt};
use std::fmt::Display;
use thiserror::Error;

use crate::{
  database::{ErrorExt2, Pool},
  schema::{NewUser, User},
  types::UserId,
};

mod memory;
pub use memory::MemoryUserStore;

/// Unique column a user record can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
  Username,
  Email,
}

impl Display for LookupField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Username => f.write_str("username"),
      Self::Email => f.write_str("email"),
    }
  }
}

#[derive(Debug, Error)]
#[error("Failed to look up user")]
pub struct LookupError;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
  #[error("user with the same {0} already exists")]
  Duplicate(LookupField),
  #[error("Failed to insert user")]
  Internal,
}

#[async_trait]
pub trait UserStore: Send + Sync {
  /// Exact, case-sensitive match on a unique column.
  async fn find_by(&self, field: LookupField, value: &str) -> Result<Option<User>, LookupError>;

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, LookupError>;

  /// Persists a new record. The store assigns `id` and `created_at`.
  async fn insert(&self, user: NewUser<'_>) -> Result<User, InsertError>;
}

#[async_trait]
impl UserStore for Pool {
  async fn find_by(&self, field: LookupField, value: &str) -> Result<Option<User>, LookupError> {
    let mut conn = self.get().await.change_context(LookupError)?;
    let result = match field {
      LookupField::Username => User::by_username(&mut conn, value).await,
      LookupField::Email => User::by_email(&mut conn, value).await,
    };
    result
      .change_context(LookupError)
      .attach_printable_lazy(|| format!("by {field}"))
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, LookupError> {
    let mut conn = self.get().await.change_context(LookupError)?;
    User::by_id(&mut conn, id).await.change_context(LookupError)
  }

  async fn insert(&self, user: NewUser<'_>) -> Result<User, InsertError> {
    let mut conn = self.get().await.change_context(InsertError::Internal)?;
    user.insert(&mut conn).await.map_err(|report| {
      let context = match report.unique_violation() {
        Some("users.email") => InsertError::Duplicate(LookupField::Email),
        Some("users.username") => InsertError::Duplicate(LookupField::Username),
        _ => InsertError::Internal,
      };
      report.change_context(context)
    })
  }
}
