use actix_web::{web, FromRequest, HttpRequest};
use futures::future::{ready, LocalBoxFuture};
use thiserror::Error;

use super::{Error, Notice};
use crate::{schema::User, App};

/// Whoever sent the request, according to its session cookie.
#[derive(Debug)]
pub enum Actor {
  Anonymous,
  User(User),
}

impl Actor {
  /// Requires a logged in user. Anonymous clients get redirected
  /// to the login page with a notice.
  pub fn get_user(self, req: &HttpRequest) -> Result<User, Error> {
    #[derive(Debug, Error)]
    #[error("Attempt to access user-only route")]
    struct Unauthorized;
    match self {
      Self::User(n) => Ok(n),
      Self::Anonymous => {
        let notice = Notice::LoginRequired.cookie(Notice::secure_for(req));
        let error = Error::from_context(crate::types::Error::Unauthorized, Unauthorized);
        Err(error.with_cookie(notice))
      }
    }
  }

  #[must_use]
  pub fn username(&self) -> Option<&str> {
    match self {
      Self::User(user) => Some(&user.username),
      Self::Anonymous => None,
    }
  }
}

impl FromRequest for Actor {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let Some(app) = req.app_data::<web::Data<App>>() else {
      #[derive(Debug, Error)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        crate::types::Error::Internal,
        NoConfig,
      ))));
    };

    let Some(user_id) = app.sessions.resolve(req) else {
      return Box::pin(ready(Ok(Actor::Anonymous)));
    };

    let app = app.clone();
    Box::pin(async move {
      // The user behind a valid session may not exist anymore.
      match app.store().find_by_id(user_id).await? {
        Some(user) => Ok(Actor::User(user)),
        None => Ok(Actor::Anonymous),
      }
    })
  }
}
