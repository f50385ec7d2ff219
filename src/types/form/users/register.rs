use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::util::{validation, Sensitive};

/// Fields submitted by the signup page.
#[derive(Debug, Deserialize)]
pub struct Request {
  pub email: Sensitive<String>,
  pub username: Sensitive<String>,
  pub password: Sensitive<String>,
  #[serde(rename = "repeat-password")]
  pub repeat_password: Sensitive<String>,
}

// Whether both passwords match is not a form concern; the
// registration service reports it with its own notice.
impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if !validation::is_valid_email(&self.email) {
      fields.insert("email", ValidateError::message("Invalid e-mail address"));
    }
    if !validation::is_valid_username(&self.username) {
      fields.insert("username", ValidateError::message("Invalid username"));
    }
    if !validation::is_valid_password(&self.password) {
      fields.insert("password", ValidateError::message("Invalid password"));
    }
    fields.build().into_result()
  }
}
