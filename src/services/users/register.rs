use error_stack::{Report, Result, ResultExt};
use thiserror::Error;

use crate::{
  auth::password,
  schema::{NewUser, User},
  store::{InsertError, LookupField, UserStore},
  util::Sensitive,
};

#[derive(Debug)]
pub struct Register<'a> {
  pub email: &'a str,
  pub username: &'a str,
  pub password: Sensitive<&'a str>,
  pub confirmation: Sensitive<&'a str>,
}

#[derive(Debug)]
pub struct RegisterResult {
  pub user: User,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
  #[error("email is already registered")]
  DuplicateEmail,
  #[error("username is already taken")]
  DuplicateUsername,
  #[error("password confirmation does not match")]
  PasswordMismatch,
  #[error("could not persist new user")]
  Persistence,
}

impl Register<'_> {
  #[tracing::instrument(skip(store), name = "services.users.register")]
  pub async fn perform(self, store: &dyn UserStore) -> Result<RegisterResult, RegisterError> {
    if self.is_taken(store, LookupField::Email, self.email).await? {
      return Err(Report::new(RegisterError::DuplicateEmail));
    }

    if self.password.value() != self.confirmation.value() {
      return Err(Report::new(RegisterError::PasswordMismatch));
    }

    if self.is_taken(store, LookupField::Username, self.username).await? {
      return Err(Report::new(RegisterError::DuplicateUsername));
    }

    let input = Sensitive::new(self.password.as_str().to_string());
    let password_hash = password::hash_blocking(input)
      .await
      .change_context(RegisterError::Persistence)?;

    let user = NewUser {
      username: self.username,
      email: self.email,
      password_hash: password_hash.as_deref(),
    };

    // Somebody else may have taken the email or username since
    // the checks above.
    let user = store.insert(user).await.map_err(|report| {
      let context = match report.current_context() {
        InsertError::Duplicate(LookupField::Email) => RegisterError::DuplicateEmail,
        InsertError::Duplicate(LookupField::Username) => RegisterError::DuplicateUsername,
        InsertError::Internal => RegisterError::Persistence,
      };
      report.change_context(context)
    })?;

    Ok(RegisterResult { user })
  }

  async fn is_taken(
    &self,
    store: &dyn UserStore,
    field: LookupField,
    value: &str,
  ) -> Result<bool, RegisterError> {
    let user = store
      .find_by(field, value)
      .await
      .change_context(RegisterError::Persistence)?;

    Ok(user.is_some())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    database::Pool,
    store::{LookupError, MemoryUserStore},
    test_utils,
    types::UserId,
  };
  use async_trait::async_trait;

  /// Store whose lookups always miss and whose inserts always fail
  /// with the given error.
  struct RejectingStore(InsertError);

  #[async_trait]
  impl UserStore for RejectingStore {
    async fn find_by(&self, _: LookupField, _: &str) -> Result<Option<User>, LookupError> {
      Ok(None)
    }

    async fn find_by_id(&self, _: UserId) -> Result<Option<User>, LookupError> {
      Ok(None)
    }

    async fn insert(&self, _: NewUser<'_>) -> Result<User, InsertError> {
      Err(Report::new(self.0))
    }
  }

  fn request<'a>(
    email: &'a str,
    username: &'a str,
    password: &'a str,
    confirmation: &'a str,
  ) -> Register<'a> {
    Register {
      email,
      username,
      password: Sensitive::new(password),
      confirmation: Sensitive::new(confirmation),
    }
  }

  #[tokio::test]
  async fn should_register() {
    let pool = Pool::in_memory().await.unwrap();
    let result = request("a@x.com", "alice", "secret", "secret")
      .perform(&pool)
      .await
      .unwrap();

    let stored = pool
      .find_by(LookupField::Email, "a@x.com")
      .await
      .unwrap()
      .unwrap();

    assert_eq!(stored.id, result.user.id);
    assert_eq!(stored.username, "alice");
    assert_ne!(stored.password_hash.as_str(), "secret");
    assert!(password::verify("secret", &stored.password_hash).unwrap());
  }

  #[tokio::test]
  async fn should_reject_if_email_is_taken() {
    let store = MemoryUserStore::default();
    test_utils::register_user(&store, "alice", "a@x.com", "secret").await;

    let error = request("a@x.com", "alice2", "p", "p")
      .perform(&store)
      .await
      .unwrap_err();

    assert_eq!(error.current_context(), &RegisterError::DuplicateEmail);
    assert!(store
      .find_by(LookupField::Username, "alice2")
      .await
      .unwrap()
      .is_none());
  }

  #[tokio::test]
  async fn should_reject_if_username_is_taken() {
    let store = MemoryUserStore::default();
    test_utils::register_user(&store, "alice", "a@x.com", "secret").await;

    let error = request("b@x.com", "alice", "p", "p")
      .perform(&store)
      .await
      .unwrap_err();

    assert_eq!(error.current_context(), &RegisterError::DuplicateUsername);
    assert!(store
      .find_by(LookupField::Email, "b@x.com")
      .await
      .unwrap()
      .is_none());
  }

  #[tokio::test]
  async fn should_reject_mismatched_passwords() {
    let store = MemoryUserStore::default();
    let error = request("a@x.com", "alice", "secret", "secret2")
      .perform(&store)
      .await
      .unwrap_err();

    assert_eq!(error.current_context(), &RegisterError::PasswordMismatch);
    assert!(store
      .find_by(LookupField::Email, "a@x.com")
      .await
      .unwrap()
      .is_none());
  }

  #[tokio::test]
  async fn duplicate_email_wins_over_mismatch() {
    let store = MemoryUserStore::default();
    test_utils::register_user(&store, "alice", "a@x.com", "secret").await;

    let error = request("a@x.com", "bob", "p1", "p2")
      .perform(&store)
      .await
      .unwrap_err();

    assert_eq!(error.current_context(), &RegisterError::DuplicateEmail);
  }

  #[tokio::test]
  async fn mismatch_wins_over_duplicate_username() {
    let store = MemoryUserStore::default();
    test_utils::register_user(&store, "alice", "a@x.com", "secret").await;

    let error = request("new@x.com", "alice", "p1", "p2")
      .perform(&store)
      .await
      .unwrap_err();

    assert_eq!(error.current_context(), &RegisterError::PasswordMismatch);
  }

  #[tokio::test]
  async fn should_report_persistence_failures() {
    let store = RejectingStore(InsertError::Internal);
    let error = request("a@x.com", "alice", "p", "p")
      .perform(&store)
      .await
      .unwrap_err();

    assert_eq!(error.current_context(), &RegisterError::Persistence);
  }

  #[tokio::test]
  async fn duplicates_found_on_insert_map_back() {
    let cases = [
      (LookupField::Email, RegisterError::DuplicateEmail),
      (LookupField::Username, RegisterError::DuplicateUsername),
    ];

    for (field, expected) in cases {
      let store = RejectingStore(InsertError::Duplicate(field));
      let error = request("a@x.com", "alice", "p", "p")
        .perform(&store)
        .await
        .unwrap_err();

      assert_eq!(error.current_context(), &expected);
    }
  }
}
