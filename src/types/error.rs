use std::fmt::Display;

/// Public category of a failed request. The category decides the
/// status code and the page shown to the client; the details stay
/// in the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  Internal,
  InvalidFormBody(String),
  NotFound,
  Unauthorized,
}

impl Error {
  /// Message safe to show on a rendered page.
  #[must_use]
  pub fn public_message(&self) -> &str {
    match self {
      Error::Internal => "Something went wrong on our side. Please try again later.",
      Error::InvalidFormBody(message) => message,
      Error::NotFound => "The page you are looking for does not exist.",
      Error::Unauthorized => "Please log in to access this page.",
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Internal => f.write_str("Failed to perform request"),
      Error::InvalidFormBody(..) => f.write_str("User performed request with invalid body"),
      Error::NotFound => f.write_str("Requested resource does not exist"),
      Error::Unauthorized => f.write_str("Attempt to access user-only route"),
    }
  }
}
