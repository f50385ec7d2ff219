use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

/// Fields submitted by the login page.
#[derive(Debug, Deserialize)]
pub struct Request {
  pub username: Sensitive<String>,
  pub password: Sensitive<String>,
}

// Only the username has to be present. The password goes to the
// verifier as submitted, so anything that was hashed at signup
// can log in again.
impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if self.username.is_empty() {
      fields.insert("username", ValidateError::message("Username is required"));
    }
    fields.build().into_result()
  }
}
