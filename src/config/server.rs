use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use validator::{Validate, ValidateError};

use super::{Database, Logging, ParseError, Session};
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
  /// **Environment variables**:
  /// - `TURNSTILE_IP`
  pub ip: IpAddr,
  /// **Environment variables**:
  /// - `TURNSTILE_PORT`
  pub port: u16,
  /// Amount of HTTP workers to spawn.
  ///
  /// **Environment variables**:
  /// - `TURNSTILE_WORKERS`
  pub workers: usize,
  pub db: Database,
  pub session: Session,
  pub logging: Logging,
}

impl Default for Server {
  fn default() -> Self {
    Self {
      ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: 5000,
      workers: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
      db: Database::default(),
      session: Session::default(),
      logging: Logging::default(),
    }
  }
}

impl Validate for Server {
  fn validate(&self) -> std::result::Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if self.workers == 0 {
      fields.insert("workers", ValidateError::message("Must be at least 1"));
    }
    if let Err(error) = self.db.validate() {
      fields.insert("db", error);
    }
    if let Err(error) = self.session.validate() {
      fields.insert("session", error);
    }
    fields.build().into_result()
  }
}

impl Server {
  #[tracing::instrument(name = "config.load")]
  pub fn load() -> Result<Self, ParseError> {
    dotenvy::dotenv().ok();

    let config = Self::figment()
      .extract::<Self>()
      .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

    config
      .validate()
      .into_validator_report()
      .change_context(ParseError)?;

    Ok(config)
  }
}

impl Server {
  const DEFAULT_CONFIG_FILE: &'static str = "turnstile.toml";

  /// Creates a default [`Figment`] object to load server
  /// configuration. This function is there for [`Server::load`]
  /// and testing.
  ///
  /// [`Figment`]: figment::Figment
  pub(crate) fn figment() -> figment::Figment {
    use figment::{
      providers::{Env, Format, Toml},
      Figment,
    };

    Figment::new()
      .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
      // One big con about figment (env provider to be specific) especially
      // these fields with underscore in it.
      .merge(Env::prefixed("TURNSTILE_").map(|v| {
        match v.as_str().to_uppercase().as_str() {
          "DB_MIN_IDLE" => "db.min_idle".into(),
          "DB_POOL_SIZE" => "db.pool_size".into(),
          "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

          "SESSION_COOKIE_NAME" => "session.cookie_name".into(),
          "SESSION_LIFETIME_SECS" => "session.lifetime_secs".into(),

          other => other.to_lowercase().replace('_', ".").into(),
        }
      }))
      // Environment variable aliases
      .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "db.url".into()))
  }
}
