//! One-shot notices carried to the next rendered page in a cookie.
use actix_web::{
  cookie::{Cookie, SameSite},
  web, HttpRequest,
};

use crate::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
  InvalidForm,
  LoginFailed,
  LoginRequired,
  EmailExists,
  UsernameTaken,
  PasswordMismatch,
  SignupFailed,
}

impl Notice {
  pub const COOKIE_NAME: &'static str = "flash";

  const ALL: [Notice; 7] = [
    Notice::InvalidForm,
    Notice::LoginFailed,
    Notice::LoginRequired,
    Notice::EmailExists,
    Notice::UsernameTaken,
    Notice::PasswordMismatch,
    Notice::SignupFailed,
  ];

  /// Value stored in the cookie.
  #[must_use]
  pub const fn code(self) -> &'static str {
    match self {
      Notice::InvalidForm => "invalid_form",
      Notice::LoginFailed => "login_failed",
      Notice::LoginRequired => "login_required",
      Notice::EmailExists => "email_exists",
      Notice::UsernameTaken => "username_taken",
      Notice::PasswordMismatch => "password_mismatch",
      Notice::SignupFailed => "signup_failed",
    }
  }

  #[must_use]
  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|notice| notice.code() == code)
  }

  #[must_use]
  pub const fn message(self) -> &'static str {
    match self {
      Notice::InvalidForm => "Error: please fill in every field correctly.",
      Notice::LoginFailed => crate::services::users::AuthFailure::MESSAGE,
      Notice::LoginRequired => "Please log in to access this page.",
      Notice::EmailExists => "Error: email already exists.",
      Notice::UsernameTaken => "Error: username is already taken.",
      Notice::PasswordMismatch => "Error: passwords do not match.",
      Notice::SignupFailed => "Error: could not add new user to database.",
    }
  }

  /// Cookie that leaves this notice for the next page. `secure`
  /// should follow the session cookie.
  #[must_use]
  pub fn cookie(self, secure: bool) -> Cookie<'static> {
    Cookie::build(Self::COOKIE_NAME, self.code())
      .path("/")
      .http_only(true)
      .same_site(SameSite::Lax)
      .secure(secure)
      .finish()
  }

  /// Whether notice cookies sent in response to `req` are marked
  /// `Secure`, which they are whenever session cookies are.
  #[must_use]
  pub fn secure_for(req: &HttpRequest) -> bool {
    req
      .app_data::<web::Data<App>>()
      .is_some_and(|app| app.config.session.secure)
  }

  /// Notice left for this request, if any. Unknown codes are ignored.
  #[must_use]
  pub fn pending(req: &HttpRequest) -> Option<Self> {
    let cookie = req.cookie(Self::COOKIE_NAME)?;
    Self::from_code(cookie.value())
  }

  /// Cookie that discards a shown notice.
  #[must_use]
  pub fn clear(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(Self::COOKIE_NAME, "")
      .path("/")
      .secure(secure)
      .finish();
    cookie.make_removal();
    cookie
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn codes_are_unique() {
    for notice in Notice::ALL {
      assert_eq!(Notice::from_code(notice.code()), Some(notice));
    }
  }

  #[test]
  fn reads_pending_notice() {
    let req = TestRequest::default()
      .cookie(Notice::PasswordMismatch.cookie(false))
      .to_http_request();
    assert_eq!(Notice::pending(&req), Some(Notice::PasswordMismatch));

    let req = TestRequest::default()
      .cookie(Cookie::new(Notice::COOKIE_NAME, "<b>hello</b>"))
      .to_http_request();
    assert_eq!(Notice::pending(&req), None);

    let req = TestRequest::default().to_http_request();
    assert_eq!(Notice::pending(&req), None);
  }

  #[test]
  fn login_failure_message_is_generic() {
    assert_eq!(
      Notice::LoginFailed.message(),
      "Error: check your login details and try again."
    );
  }

  #[test]
  fn cookies_follow_secure_flag() {
    assert_eq!(Notice::LoginFailed.cookie(true).secure(), Some(true));
    assert_eq!(Notice::LoginFailed.cookie(false).secure(), Some(false));
    assert_eq!(Notice::clear(true).secure(), Some(true));
  }
}
