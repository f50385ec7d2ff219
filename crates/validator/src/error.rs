use indexmap::IndexMap;
use std::borrow::Cow;

/// Collects the messages of a single value.
#[derive(Default)]
pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
  pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) {
    self.0.push(message.into());
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Messages(self.0)
  }
}

/// Collects the errors of named fields, keeping insertion order.
#[derive(Default)]
pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

impl FieldBuilder {
  /// Empty errors are skipped so callers can insert the result
  /// of every field check unconditionally.
  pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: ValidateError) {
    if !value.is_empty() {
      self.0.insert(key.into(), value);
    }
  }

  #[must_use]
  pub fn build(self) -> ValidateError {
    ValidateError::Fields(self.0)
  }
}

/// Tree of everything wrong with a validated value.
#[derive(PartialEq, Eq)]
pub enum ValidateError {
  Fields(IndexMap<Cow<'static, str>, ValidateError>),
  Messages(Vec<Cow<'static, str>>),
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("Invalid data occurred")
  }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::Fields(n) => n.fmt(f),
      ValidateError::Messages(n) => n.fmt(f),
    }
  }
}

impl ValidateError {
  #[must_use]
  pub fn field_builder() -> FieldBuilder {
    FieldBuilder::default()
  }

  #[must_use]
  pub fn msg_builder() -> MessageBuilder {
    MessageBuilder::default()
  }

  /// Shorthand for a message node holding a single message.
  #[must_use]
  pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
    ValidateError::Messages(vec![message.into()])
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      ValidateError::Fields(n) => n.is_empty(),
      ValidateError::Messages(n) => n.is_empty(),
    }
  }

  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }

  /// Every message paired with the dotted path of the field it
  /// belongs to, in insertion order.
  #[must_use]
  pub fn flatten(&self) -> Vec<(String, &str)> {
    fn walk<'a>(err: &'a ValidateError, path: &mut Vec<&'a str>, out: &mut Vec<(String, &'a str)>) {
      match err {
        ValidateError::Fields(fields) => {
          for (field, inner) in fields {
            path.push(field.as_ref());
            walk(inner, path, out);
            path.pop();
          }
        },
        ValidateError::Messages(messages) => {
          let joined = path.join(".");
          out.extend(messages.iter().map(|m| (joined.clone(), m.as_ref())));
        },
      }
    }

    let mut out = Vec::new();
    walk(self, &mut Vec::new(), &mut out);
    out
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Validate;

  struct Signup {
    email: &'static str,
    username: &'static str,
  }

  impl Validate for Signup {
    fn validate(&self) -> Result<(), ValidateError> {
      let mut fields = ValidateError::field_builder();
      let mut msg = ValidateError::msg_builder();
      if self.email.is_empty() {
        msg.insert("Email is required");
      }
      if !self.email.contains('@') {
        msg.insert("Invalid email address");
      }
      fields.insert("email", msg.build());

      let mut account = ValidateError::field_builder();
      if self.username.is_empty() {
        account.insert("username", ValidateError::message("Username is empty"));
      }
      fields.insert("account", account.build());
      fields.build().into_result()
    }
  }

  fn failing() -> ValidateError {
    Signup { email: "", username: "" }.validate().unwrap_err()
  }

  #[test]
  fn debug_fmt() {
    const EXPECTED: &str = r#"{"email": ["Email is required", "Invalid email address"], "account": {"username": ["Username is empty"]}}"#;
    assert_eq!(EXPECTED, format!("{:?}", failing()));
  }

  #[test]
  fn flatten() {
    assert_eq!(
      failing().flatten(),
      vec![
        ("email".to_string(), "Email is required"),
        ("email".to_string(), "Invalid email address"),
        ("account.username".to_string(), "Username is empty"),
      ]
    );
  }

  #[test]
  fn passes_when_nothing_is_wrong() {
    let form = Signup { email: "a@x.com", username: "alice" };
    assert!(form.validate().is_ok());
  }

  #[test]
  fn empty_nodes_are_skipped() {
    assert!(ValidateError::msg_builder().build().is_empty());
    assert!(ValidateError::field_builder().build().is_empty());
    assert!(!ValidateError::message("Hello world!").is_empty());

    let mut err = ValidateError::field_builder();
    err.insert("ignored", ValidateError::msg_builder().build());
    assert!(err.build().is_empty());
  }
}
