pub mod figment;
pub mod maybe_generated;
pub mod sensitive;
pub mod validation;
pub mod validator;

pub use self::maybe_generated::MaybeGenerated;
pub use self::sensitive::Sensitive;
