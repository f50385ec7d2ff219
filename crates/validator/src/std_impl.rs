use crate::HasLength;
use std::borrow::Cow;

// Lengths are measured in characters, the same unit column
// limits and form fields are described in.
impl HasLength for str {
  fn length(&self) -> usize {
    self.chars().count()
  }
}

impl HasLength for String {
  fn length(&self) -> usize {
    self.as_str().length()
  }
}

impl HasLength for Cow<'_, str> {
  fn length(&self) -> usize {
    self.as_ref().length()
  }
}

impl<T: HasLength + ?Sized> HasLength for &T {
  fn length(&self) -> usize {
    T::length(self)
  }
}
