use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use error_stack::{Context, Report};
use minijinja::context;

use super::Error;
use crate::{http::see_other, templates, types::Error as ErrorType};

impl ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::NotFound => StatusCode::NOT_FOUND,
      ErrorType::InvalidFormBody(..) => StatusCode::BAD_REQUEST,
      ErrorType::Unauthorized => StatusCode::SEE_OTHER,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    match &self.error_type {
      ErrorType::Unauthorized => {
        let mut response = see_other("/login");
        if let Some(cookie) = &self.cookie {
          response.cookie(cookie.clone());
        }
        return response.finish();
      }
      ErrorType::Internal => tracing::error!(error = %self, "could not handle request"),
      _ => tracing::debug!(error = %self, "rejected request"),
    }

    let status = self.status_code();
    let page = templates::render(
      "error.html",
      context! {
        status => status.as_u16(),
        message => self.error_type.public_message(),
      },
    );

    match page {
      Ok(page) => HttpResponse::build(status)
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(page),
      Err(report) => {
        tracing::error!(?report, "could not render error page");
        HttpResponse::build(status)
          .content_type(mime::TEXT_PLAIN_UTF_8)
          .body(self.error_type.public_message().to_string())
      }
    }
  }
}

impl<C: Context> From<Report<C>> for Error {
  fn from(report: Report<C>) -> Self {
    Error::internal(report)
  }
}
