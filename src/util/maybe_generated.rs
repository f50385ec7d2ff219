/// A value that was either supplied by the user or generated as a
/// fallback because the user left it out.
#[derive(Clone, PartialEq, Eq)]
pub enum MaybeGenerated<T> {
  Generated(T),
  Set(T),
}

impl<T: std::fmt::Debug> std::fmt::Debug for MaybeGenerated<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = if self.is_generated() { "Generated" } else { "Set" };
    f.debug_tuple(name).field(self.value()).finish()
  }
}

impl<T> MaybeGenerated<T> {
  pub const fn new(value: T) -> Self {
    Self::Set(value)
  }

  pub const fn is_generated(&self) -> bool {
    matches!(self, Self::Generated(..))
  }

  pub const fn value(&self) -> &T {
    match self {
      Self::Set(n) | Self::Generated(n) => n,
    }
  }
}

// Anything read from a config source counts as set.
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for MaybeGenerated<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    T::deserialize(deserializer).map(Self::Set)
  }
}
