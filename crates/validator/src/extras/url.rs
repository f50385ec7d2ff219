use url::Url;

#[must_use]
pub fn validate_url(url: &str) -> bool {
  Url::parse(url).is_ok()
}

#[cfg(test)]
mod tests {
  use super::validate_url;

  #[test]
  fn accepts_database_urls() {
    assert!(validate_url("sqlite://users.db"));
    assert!(validate_url("sqlite::memory:"));
    assert!(!validate_url("users.db"));
    assert!(!validate_url(""));
  }
}
