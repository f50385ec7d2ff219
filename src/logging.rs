use error_stack::{Result, ResultExt};
use std::io::IsTerminal;
use thiserror::Error;
use tracing::{level_filters::LevelFilter, warn, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

const TARGETS_VAR: &str = "TURNSTILE_LOGGING_TARGETS";

pub fn init(config: &Logging) -> Result<(), TracingInitError> {
  let rust_log = std::env::var("RUST_LOG").ok();
  let targets = rust_log.as_deref().unwrap_or(&config.targets);

  let console = console_layer(config.style, std::io::stderr().is_terminal())
    .with_filter(make_env_filter(targets));

  let registry = tracing_subscriber::Registry::default()
    .with(console)
    .with(ErrorLayer::default());

  tracing::subscriber::set_global_default(registry)
    .change_context(TracingInitError)
    .attach_printable("already initialized tracing")?;

  if rust_log.is_some() && std::env::var(TARGETS_VAR).is_ok() {
    warn!("Both `RUST_LOG` and `{TARGETS_VAR}` are set, `RUST_LOG` will be used to determine the logging targets");
  }

  Ok(())
}

fn console_layer<S>(style: LoggingStyle, ansi: bool) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
  S: Subscriber + for<'a> LookupSpan<'a>,
{
  let layer = tracing_subscriber::fmt::layer()
    .with_ansi(ansi)
    .with_writer(std::io::stderr);

  match style {
    LoggingStyle::Compact => layer.compact().boxed(),
    LoggingStyle::Full => layer.boxed(),
    LoggingStyle::Pretty => layer.pretty().boxed(),
  }
}

fn make_env_filter(targets: &str) -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .parse_lossy(targets)
}
