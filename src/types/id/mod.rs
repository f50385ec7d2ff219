use serde::de::{Error as DeError, Unexpected};
use sqlx::Sqlite;
use std::{
  fmt::{Debug, Display},
  hash::Hash,
  marker::PhantomData,
  num::NonZeroU64,
  str::FromStr,
};
use thiserror::Error;

use self::marker::Marker;

pub mod marker;

/// Identifier of a user record, assigned by the store on creation.
pub type UserId = Id<marker::UserMarker>;

/// Row id of a record. Never zero, SQLite starts counting at 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id<T: Marker> {
  value: NonZeroU64,
  phantom: PhantomData<T>,
}

impl<T: Marker> Id<T> {
  /// # Panics
  ///
  /// It will panic if the value is 0.
  #[must_use]
  #[track_caller]
  pub const fn new(n: u64) -> Self {
    match Self::new_checked(n) {
      Some(id) => id,
      None => panic!("value is zero"),
    }
  }

  #[must_use]
  pub const fn new_checked(n: u64) -> Option<Self> {
    match NonZeroU64::new(n) {
      Some(value) => Some(Self {
        value,
        phantom: PhantomData,
      }),
      None => None,
    }
  }

  #[must_use]
  pub const fn get(self) -> u64 {
    self.value.get()
  }
}

impl<T: Marker> Debug for Id<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}({})", T::NAME, self.value)
  }
}

impl<T: Marker> Display for Id<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    Display::fmt(&self.value, f)
  }
}

impl<T: Marker> Hash for Id<T> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.value.hash(state);
  }
}

#[derive(Debug, Error)]
#[error("invalid id {0:?}, expected a nonzero integer")]
pub struct ParseIdError(String);

impl<T: Marker> FromStr for Id<T> {
  type Err = ParseIdError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse::<u64>()
      .ok()
      .and_then(Self::new_checked)
      .ok_or_else(|| ParseIdError(s.to_string()))
  }
}

// Accepts both string and integer encodings.
impl<'de, T: Marker> serde::Deserialize<'de> for Id<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    struct Visitor<T: Marker>(PhantomData<T>);

    impl<T: Marker> serde::de::Visitor<'_> for Visitor<T> {
      type Value = Id<T>;

      fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a nonzero integer id")
      }

      fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
          .ok()
          .and_then(Id::new_checked)
          .ok_or_else(|| DeError::invalid_value(Unexpected::Signed(v), &self))
      }

      fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Id::new_checked(v).ok_or_else(|| DeError::invalid_value(Unexpected::Unsigned(v), &self))
      }

      fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        v.parse()
          .map_err(|_| DeError::invalid_value(Unexpected::Str(v), &self))
      }
    }

    deserializer.deserialize_any(Visitor(PhantomData))
  }
}

impl<T: Marker> serde::Serialize for Id<T> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.collect_str(&self.value)
  }
}

// SQLite stores row ids as signed 64-bit integers.
impl<'q, T: Marker> sqlx::Encode<'q, Sqlite> for Id<T> {
  fn encode_by_ref(
    &self,
    buf: &mut <Sqlite as sqlx::database::HasArguments<'q>>::ArgumentBuffer,
  ) -> sqlx::encode::IsNull {
    match i64::try_from(self.value.get()) {
      Ok(value) => <i64 as sqlx::Encode<'q, Sqlite>>::encode(value, buf),
      Err(..) => sqlx::encode::IsNull::Yes,
    }
  }
}

impl<'r, T: Marker> sqlx::Decode<'r, Sqlite> for Id<T> {
  fn decode(
    value: <Sqlite as sqlx::database::HasValueRef<'r>>::ValueRef,
  ) -> Result<Self, sqlx::error::BoxDynError> {
    let value = <i64 as sqlx::Decode<'r, Sqlite>>::decode(value)?;
    u64::try_from(value)
      .ok()
      .and_then(Self::new_checked)
      .ok_or_else(|| format!("row id {value} is not positive").into())
  }
}

impl<T: Marker> sqlx::Type<Sqlite> for Id<T> {
  fn type_info() -> <Sqlite as sqlx::Database>::TypeInfo {
    <i64 as sqlx::Type<Sqlite>>::type_info()
  }

  fn compatible(ty: &<Sqlite as sqlx::Database>::TypeInfo) -> bool {
    <i64 as sqlx::Type<Sqlite>>::compatible(ty)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;
  use static_assertions::{assert_eq_size, assert_impl_all};

  assert_eq_size!(UserId, u64);
  assert_eq_size!(Option<UserId>, u64);
  assert_impl_all!(UserId:
    Debug, Display, Clone, Copy, Send, Sync, Hash, sqlx::Decode<'static, Sqlite>,
    sqlx::Encode<'static, Sqlite>, sqlx::Type<Sqlite>
  );

  #[test]
  #[should_panic = "value is zero"]
  fn zero_is_rejected() {
    _ = UserId::new(0);
  }

  #[test]
  fn parses_from_str() {
    assert_eq!(UserId::new(42), "42".parse().unwrap());
    assert!("0".parse::<UserId>().is_err());
    assert!("-1".parse::<UserId>().is_err());
    assert!("alice".parse::<UserId>().is_err());
  }

  #[test]
  fn fmt_impls() {
    assert_eq!(UserId::new(1_234_567_890).to_string(), "1234567890");
    assert_eq!(format!("{:?}", UserId::new(1)), "UserId(1)");
  }

  #[test]
  fn serde_impl() {
    let id = UserId::new(1_234_567_890);
    serde_test::assert_de_tokens(&id, &[Token::U64(1_234_567_890)]);
    serde_test::assert_de_tokens(&id, &[Token::Str("1234567890")]);
    serde_test::assert_de_tokens(&id, &[Token::I64(1_234_567_890)]);
    serde_test::assert_de_tokens_error::<UserId>(
      &[Token::I64(-1)],
      "invalid value: integer `-1`, expected a nonzero integer id",
    );
    serde_test::assert_ser_tokens(&id, &[Token::Str("1234567890")]);
  }
}
