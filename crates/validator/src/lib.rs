mod error;
mod std_impl;

pub use error::*;
pub mod extras;

/// Types that can check their own contents and report every
/// problem found as a [`ValidateError`] tree.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}

/// Types with a measurable length, used by [`extras::validate_length`].
pub trait HasLength {
  fn length(&self) -> usize;
}
