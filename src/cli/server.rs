use clap::Parser;
use error_stack::{Result, ResultExt};
use std::net::IpAddr;
use std::num::NonZeroUsize;

use turnstile::{config::Server as Config, logging, server::StartServerError};

/// Serve the website over HTTP
#[derive(Debug, Parser)]
pub struct ServerCommand {
  #[clap(long)]
  pub address: Option<IpAddr>,
  #[clap(long)]
  pub port: Option<u16>,
  #[clap(long)]
  pub workers: Option<NonZeroUsize>,
}

pub fn run(args: &ServerCommand) -> Result<(), StartServerError> {
  let mut config = Config::load().change_context(StartServerError)?;
  args.override_config(&mut config);

  logging::init(&config.logging).change_context(StartServerError)?;
  actix_web::rt::System::new().block_on(turnstile::server::run(config))
}

impl ServerCommand {
  fn override_config(&self, config: &mut Config) {
    // command line flags win over every other source
    if let Some(address) = self.address {
      config.ip = address;
    }

    if let Some(port) = self.port {
      config.port = port;
    }

    if let Some(workers) = self.workers {
      config.workers = workers.get();
    }
  }
}
