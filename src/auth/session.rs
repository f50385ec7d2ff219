use actix_web::{
  cookie::{time::Duration, Cookie, SameSite},
  HttpRequest,
};
use chrono::Utc;
use error_stack::{Result, ResultExt};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config, types::UserId};

const ISSUER: &str = "turnstile";

#[derive(Debug, Error)]
#[error("Failed to establish session")]
pub struct SessionError;

/// Signed contents of a session cookie.
#[derive(Debug, Deserialize, Serialize)]
struct Claims {
  sub: UserId,
  iat: i64,
  exp: i64,
  iss: String,
}

/// Issues, reads and revokes the session cookie binding a browser
/// to one user.
pub struct SessionManager {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  cookie_name: String,
  lifetime_secs: i64,
  secure: bool,
}

impl SessionManager {
  #[must_use]
  pub fn new(cfg: &config::Session) -> Self {
    let secret = cfg.secret.value().as_bytes();

    let mut validation = Validation::new(Algorithm::HS512);
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

    Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      validation,
      cookie_name: cfg.cookie_name.clone(),
      lifetime_secs: i64::try_from(cfg.lifetime_secs.get()).unwrap_or(i64::MAX),
      secure: cfg.secure,
    }
  }

  #[must_use]
  pub fn cookie_name(&self) -> &str {
    &self.cookie_name
  }

  /// Creates a session cookie for `user_id`. Setting it on a
  /// response replaces whatever session the client had before.
  #[tracing::instrument(skip(self))]
  pub fn establish(&self, user_id: UserId) -> Result<Cookie<'static>, SessionError> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
      sub: user_id,
      iat,
      exp: iat.saturating_add(self.lifetime_secs),
      iss: ISSUER.to_string(),
    };
    let token = self.encode(&claims)?;

    let cookie = Cookie::build(self.cookie_name.clone(), token)
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(self.secure)
      .max_age(Duration::seconds(self.lifetime_secs))
      .finish();

    Ok(cookie)
  }

  /// Cookie that makes the client drop its session.
  #[must_use]
  pub fn terminate(&self) -> Cookie<'static> {
    let mut cookie = Cookie::build(self.cookie_name.clone(), "")
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(self.secure)
      .finish();

    cookie.make_removal();
    cookie
  }

  /// Id of the user the request's session is bound to. Missing,
  /// forged or expired sessions resolve to `None`.
  pub fn resolve(&self, req: &HttpRequest) -> Option<UserId> {
    let cookie = req.cookie(&self.cookie_name)?;
    self.decode(cookie.value())
  }

  fn encode(&self, claims: &Claims) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS512);
    jsonwebtoken::encode(&header, claims, &self.encoding_key)
      .change_context(SessionError)
      .attach_printable("could not sign session token")
  }

  fn decode(&self, token: &str) -> Option<UserId> {
    match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
      Ok(data) => Some(data.claims.sub),
      Err(error) => {
        tracing::debug!(%error, "rejected session token");
        None
      }
    }
  }
}

impl std::fmt::Debug for SessionManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SessionManager")
      .field("cookie_name", &self.cookie_name)
      .field("lifetime_secs", &self.lifetime_secs)
      .field("secure", &self.secure)
      .finish_non_exhaustive()
  }
}
