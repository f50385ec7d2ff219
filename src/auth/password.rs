use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use error_stack::{Result, ResultExt};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::util::Sensitive;

static CONTEXT: Lazy<Argon2<'static>> =
  Lazy::new(|| Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params()));

#[cfg(not(test))]
fn params() -> argon2::Params {
  argon2::Params::DEFAULT
}

// Unoptimized test builds take seconds per hash with the default cost.
#[cfg(test)]
fn params() -> argon2::Params {
  argon2::Params::new(argon2::Params::MIN_M_COST, 1, 1, None).unwrap_or_default()
}

#[derive(Debug, Error)]
#[error("Failed to generate password hash")]
pub struct HashPasswordError;

/// Hashes a plaintext password into a salted argon2id PHC string.
pub fn hash(password: &str) -> Result<Sensitive<String>, HashPasswordError> {
  let salt = SaltString::generate(&mut rand_core::OsRng);
  let password_hash = CONTEXT
    .hash_password(password.as_bytes(), &salt)
    .change_context(HashPasswordError)?;

  Ok(Sensitive::new(password_hash.to_string()))
}

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

/// Checks `password` against a PHC string made by [`hash`].
/// A mismatch is `Ok(false)`, only a malformed hash is an error.
pub fn verify(password: &str, hash: &str) -> Result<bool, VerifyPasswordError> {
  let hash = PasswordHash::new(hash)
    .change_context(VerifyPasswordError)
    .attach_printable("could not parse password hash")?;

  match CONTEXT.verify_password(password.as_bytes(), &hash) {
    Ok(..) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(error) => Err(error).change_context(VerifyPasswordError),
  }
}

/// [`hash`] on the blocking thread pool.
pub async fn hash_blocking(
  password: Sensitive<String>,
) -> Result<Sensitive<String>, HashPasswordError> {
  tokio::task::spawn_blocking(move || hash(password.as_str()))
    .await
    .change_context(HashPasswordError)
    .attach_printable("hashing task panicked")?
}

/// [`verify`] on the blocking thread pool.
pub async fn verify_blocking(
  password: Sensitive<String>,
  hash: Sensitive<String>,
) -> Result<bool, VerifyPasswordError> {
  tokio::task::spawn_blocking(move || verify(password.as_str(), hash.as_str()))
    .await
    .change_context(VerifyPasswordError)
    .attach_printable("verification task panicked")?
}
