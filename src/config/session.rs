use serde::Deserialize;
use std::num::NonZeroU64;
use validator::{extras::validate_length, Validate, ValidateError};

use crate::util::{MaybeGenerated, Sensitive};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Session {
  /// Secret key signing the session cookies. If it is not set, a
  /// random key is generated on startup and every session is lost
  /// when the server restarts.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_SESSION_SECRET`
  pub secret: MaybeGenerated<Sensitive<String>>,
  /// **Environment variables**:
  /// - `TURNSTILE_SESSION_COOKIE_NAME`
  pub cookie_name: String,
  /// How long a login stays valid.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_SESSION_LIFETIME_SECS`
  pub lifetime_secs: NonZeroU64,
  /// Restricts the session cookie to HTTPS connections.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_SESSION_SECURE`
  pub secure: bool,
}

impl Session {
  pub const MIN_SECRET_LENGTH: usize = 24;
  pub const MAX_SECRET_LENGTH: usize = 1024;

  const DEFAULT_COOKIE_NAME: &'static str = "turnstile_session";
  // 7 days
  const DEFAULT_LIFETIME_SECS: NonZeroU64 = match NonZeroU64::new(60 * 60 * 24 * 7) {
    Some(n) => n,
    None => panic!("DEFAULT_LIFETIME_SECS is accidentally set to 0"),
  };

  #[must_use]
  pub fn generate_secret() -> MaybeGenerated<Sensitive<String>> {
    const CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";
    let output: String = random_string::generate(64, CHARSET);
    MaybeGenerated::Generated(Sensitive::new(output))
  }
}

impl Default for Session {
  fn default() -> Self {
    Self {
      secret: Self::generate_secret(),
      cookie_name: Self::DEFAULT_COOKIE_NAME.to_string(),
      lifetime_secs: Self::DEFAULT_LIFETIME_SECS,
      secure: false,
    }
  }
}

impl Validate for Session {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if !validate_length(
      self.secret.value(),
      Some(Self::MIN_SECRET_LENGTH),
      Some(Self::MAX_SECRET_LENGTH),
      None,
    ) {
      fields.insert("secret", ValidateError::message("Invalid session secret key"));
    }

    let valid_name = !self.cookie_name.is_empty()
      && self
        .cookie_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !valid_name {
      fields.insert("cookie_name", ValidateError::message("Invalid cookie name"));
    }

    fields.build().into_result()
  }
}
