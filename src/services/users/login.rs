use error_stack::{Result, ResultExt};
use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::debug;

use crate::{
  auth::password,
  store::{LookupField, UserStore},
  types::UserId,
  util::Sensitive,
};

// Verified against when the user does not exist so both failure
// paths spend the same time hashing.
static DUMMY_HASH: Lazy<Option<Sensitive<String>>> =
  Lazy::new(|| password::hash("turnstile-unknown-user").ok());

/// Checks a submitted username and password against the store.
/// It never touches the session; establishing one is up to the
/// caller on [`AuthResult::Success`].
#[derive(Debug)]
pub struct Login<'a> {
  pub username: &'a str,
  pub password: Sensitive<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResult {
  Success(UserId),
  Failure(AuthFailure),
}

/// Why a login attempt was rejected. Only used for logging, every
/// reason shows the client the same [`message`](AuthFailure::message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
  UnknownUser,
  WrongPassword,
}

impl AuthFailure {
  pub const MESSAGE: &'static str = "Error: check your login details and try again.";

  #[must_use]
  pub const fn message(self) -> &'static str {
    Self::MESSAGE
  }
}

#[derive(Debug, Error)]
#[error("Failed to authenticate user")]
pub struct LoginError;

impl Login<'_> {
  #[tracing::instrument(skip(store), name = "services.users.login")]
  pub async fn perform(self, store: &dyn UserStore) -> Result<AuthResult, LoginError> {
    let user = store
      .find_by(LookupField::Username, self.username)
      .await
      .change_context(LoginError)?;

    let input = Sensitive::new(self.password.as_str().to_string());
    let Some(user) = user else {
      tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_ref() {
          password::verify(input.as_str(), hash).ok();
        }
      })
      .await
      .ok();

      debug!("rejected login: unknown user");
      return Ok(AuthResult::Failure(AuthFailure::UnknownUser));
    };

    let matched = password::verify_blocking(input, user.password_hash)
      .await
      .change_context(LoginError)
      .attach_printable_lazy(|| format!("stored hash of user {} is unusable", user.id))?;

    if matched {
      Ok(AuthResult::Success(user.id))
    } else {
      debug!(user.id = %user.id, "rejected login: wrong password");
      Ok(AuthResult::Failure(AuthFailure::WrongPassword))
    }
  }
}
