use clap::Parser;
use error_stack::Result;

mod server;

/// Command line options for turnstile.
#[derive(Debug, Parser)]
#[command(about = "User registration and login website", version, author, long_about)]
pub struct Cli {
  #[clap(subcommand)]
  pub subcommand: Subcommand,
}

impl Cli {
  pub fn run(self) -> Result<(), turnstile::server::StartServerError> {
    match self.subcommand {
      Subcommand::Server(args) => self::server::run(&args),
    }
  }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
  Server(self::server::ServerCommand),
}
