/// Restricts trait implementations to this crate.
pub trait Sealed {}
