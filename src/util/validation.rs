use once_cell::sync::Lazy;
use regex::Regex;
use validator::extras::validate_length;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
  #[allow(clippy::expect_used)]
  Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
    .expect("compile email regex")
});

pub const USERNAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 200;
pub const PASSWORD_MAX: usize = 128;

/// Loose syntactic check of an email address. Matching is done on
/// the shape of the address only; nothing is normalized.
pub fn is_valid_email(email: &str) -> bool {
  validate_length(email, Some(1), Some(EMAIL_MAX), None) && EMAIL_REGEX.is_match(email)
}

pub fn is_valid_username(name: &str) -> bool {
  validate_length(name, Some(1), Some(USERNAME_MAX), None)
}

pub fn is_valid_password(pass: &str) -> bool {
  validate_length(pass, Some(1), Some(PASSWORD_MAX), None)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn emails() {
    assert!(is_valid_email("a@x.com"));
    assert!(is_valid_email("alice.smith+tag@example.co.uk"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("alice"));
    assert!(!is_valid_email("alice@"));
    assert!(!is_valid_email(&format!("{}@x.com", "a".repeat(EMAIL_MAX))));
  }

  #[test]
  fn usernames() {
    assert!(is_valid_username("alice"));
    assert!(is_valid_username("Alice Smith"));
    assert!(!is_valid_username(""));
    assert!(!is_valid_username(&"a".repeat(USERNAME_MAX + 1)));
  }

  #[test]
  fn passwords() {
    assert!(is_valid_password("p"));
    assert!(!is_valid_password(""));
    assert!(!is_valid_password(&"p".repeat(PASSWORD_MAX + 1)));
  }
}
