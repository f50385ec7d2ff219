mod login;
mod logout;
mod profile;
mod register;

pub use login::{login, login_page};
pub use logout::logout;
pub use profile::profile;
pub use register::{register, signup_page};
