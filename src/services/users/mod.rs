mod login;
mod register;

pub use login::{AuthFailure, AuthResult, Login, LoginError};
pub use register::{Register, RegisterError, RegisterResult};
