use crate::types;
use actix_web::cookie::Cookie;
use error_stack::{Context, Report};
use thiserror::Error as ThisError;
use tracing_error::SpanTrace;

mod impls;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Context on top of every report carried by [`Error`].
#[derive(Debug, ThisError)]
#[error("Failed to handle request")]
pub struct RequestError;

/// Error returned by controllers. The public [type](types::Error)
/// decides what the client sees; the report and span trace only
/// end up in the logs.
pub struct Error {
  error_type: types::Error,
  report: Report<RequestError>,
  trace: SpanTrace,
  cookie: Option<Cookie<'static>>,
}

impl Error {
  #[must_use]
  pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
    Self::from_report(error_type, Report::new(context))
  }

  #[must_use]
  pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
    Self {
      error_type,
      report: report.change_context(RequestError),
      trace: SpanTrace::capture(),
      cookie: None,
    }
  }

  #[must_use]
  pub fn internal(report: Report<impl Context>) -> Self {
    Self::from_report(types::Error::Internal, report)
  }

  /// Sends `cookie` along with the error response.
  #[must_use]
  pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
    self.cookie = Some(cookie);
    self
  }
}

impl std::fmt::Debug for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Error")
      .field("type", &self.error_type)
      .field("report", &self.report)
      .field("trace", &self.trace)
      .finish()
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{:?}", self.report)?;
    std::fmt::Display::fmt(&self.trace, f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{http::StatusCode, ResponseError};

  #[derive(Debug, ThisError)]
  #[error("no session")]
  struct NoSession;

  #[test]
  fn unauthorized_response_carries_cookie() {
    let error = Error::from_context(types::Error::Unauthorized, NoSession)
      .with_cookie(Cookie::new("flash", "login_required"));

    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = response.cookies().find(|c| c.name() == "flash").unwrap();
    assert_eq!(cookie.value(), "login_required");
  }
}
