use crate::HasLength;

/// Checks the length of a value against optional bounds.
///
/// `equal` takes precedence over `min` and `max` when set.
#[must_use]
pub fn validate_length<T: HasLength + ?Sized>(
  value: &T,
  min: Option<usize>,
  max: Option<usize>,
  equal: Option<usize>,
) -> bool {
  let length = value.length();
  if let Some(equal) = equal {
    return length == equal;
  }

  if min.is_some_and(|min| length < min) {
    return false;
  }

  if max.is_some_and(|max| length > max) {
    return false;
  }

  true
}
