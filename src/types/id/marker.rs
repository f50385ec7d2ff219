use crate::internal::Sealed;

/// Ties an [`Id`](super::Id) to the kind of record it points to.
pub trait Marker: Sealed {
  const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMarker;

impl Sealed for UserMarker {}
impl Marker for UserMarker {
  const NAME: &'static str = "UserId";
}
