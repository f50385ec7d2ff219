use actix_web::{http::header, web, HttpResponse, HttpResponseBuilder};

use crate::App;

pub mod actor;
pub mod controllers;
pub mod error;
pub mod flash;

pub use actor::Actor;
pub use error::{Error, Result};
pub use flash::Notice;

/// Form extractor settings shared by every controller.
pub fn form_config() -> web::FormConfig {
  web::FormConfig::default().error_handler(|error, _req| {
    #[derive(Debug, thiserror::Error)]
    #[error("Could not parse form body")]
    struct InvalidFormBody;

    let message = error.to_string();
    Error::from_context(crate::types::Error::InvalidFormBody(message), InvalidFormBody).into()
  })
}

/// `303 See Other` pointing to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponseBuilder {
  let mut builder = HttpResponse::SeeOther();
  builder.insert_header((header::LOCATION, location));
  builder
}

/// Redirects to `location`, showing `notice` on the next page.
pub(crate) fn redirect_with_notice(app: &App, location: &str, notice: Notice) -> HttpResponse {
  let cookie = notice.cookie(app.config.session.secure);
  see_other(location).cookie(cookie).finish()
}
