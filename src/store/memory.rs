use async_trait::async_trait;
use chrono::Utc;
use error_stack::{Report, Result};
use tokio::sync::RwLock;

use super::{InsertError, LookupError, LookupField, UserStore};
use crate::{
  schema::{NewUser, User},
  types::UserId,
  util::Sensitive,
};

/// [`UserStore`] kept entirely in memory. Records are lost when it
/// is dropped.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
  users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
  async fn find_by(&self, field: LookupField, value: &str) -> Result<Option<User>, LookupError> {
    let users = self.users.read().await;
    let user = users.iter().find(|user| match field {
      LookupField::Username => user.username == value,
      LookupField::Email => user.email == value,
    });
    Ok(user.cloned())
  }

  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, LookupError> {
    let users = self.users.read().await;
    Ok(users.iter().find(|user| user.id == id).cloned())
  }

  async fn insert(&self, user: NewUser<'_>) -> Result<User, InsertError> {
    let mut users = self.users.write().await;
    if users.iter().any(|v| v.username == user.username) {
      return Err(Report::new(InsertError::Duplicate(LookupField::Username)));
    }
    if users.iter().any(|v| v.email == user.email) {
      return Err(Report::new(InsertError::Duplicate(LookupField::Email)));
    }

    let record = User {
      id: UserId::new(users.len() as u64 + 1),
      created_at: Utc::now().naive_utc(),
      username: user.username.to_string(),
      email: user.email.to_string(),
      password_hash: Sensitive::new(user.password_hash.as_str().to_string()),
    };
    users.push(record.clone());

    Ok(record)
  }
}
