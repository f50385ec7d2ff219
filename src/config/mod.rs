use thiserror::Error;

mod database;
mod logging;
mod server;
mod session;

pub use self::database::Database;
pub use self::logging::{InvalidLoggingStyle, Logging, LoggingStyle};
pub use self::server::Server;
pub use self::session::Session;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
