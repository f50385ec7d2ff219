use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::ops::Deref;

/// Keeps the raw sensitive data in memory but it cannot be
/// accidentally leaked through the console or logs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(value)
  }

  #[must_use]
  pub const fn value(&self) -> &T {
    &self.0
  }
}

impl<T> Debug for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("<hidden>")
  }
}

impl<T> Display for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("<hidden>")
  }
}

impl<T: Deref> Sensitive<T> {
  #[must_use]
  pub fn as_deref(&self) -> Sensitive<&T::Target> {
    Sensitive(self.0.deref())
  }
}

impl<T: AsRef<str>> Sensitive<T> {
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.0.as_ref()
  }
}

impl Deref for Sensitive<String> {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Deref for Sensitive<&str> {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    self.0
  }
}

impl<'r, DB: sqlx::Database, T: sqlx::Decode<'r, DB>> sqlx::Decode<'r, DB> for Sensitive<T> {
  fn decode(
    value: <DB as sqlx::database::HasValueRef<'r>>::ValueRef,
  ) -> Result<Self, sqlx::error::BoxDynError> {
    T::decode(value).map(Self)
  }
}

impl<DB: sqlx::Database, T: sqlx::Type<DB>> sqlx::Type<DB> for Sensitive<T> {
  fn type_info() -> DB::TypeInfo {
    T::type_info()
  }

  fn compatible(ty: &DB::TypeInfo) -> bool {
    T::compatible(ty)
  }
}

impl validator::HasLength for Sensitive<String> {
  fn length(&self) -> usize {
    validator::HasLength::length(&self.0)
  }
}
