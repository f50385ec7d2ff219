use actix_web::{web, HttpRequest, HttpResponse};
use minijinja::{context, Value};
use thiserror::Error as ThisError;

use super::{Error, Notice};
use crate::templates;

pub mod pages;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(pages::index))
    .route("/profile", web::get().to(users::profile))
    .route("/logout", web::get().to(users::logout))
    .service(
      web::resource("/login")
        .route(web::get().to(users::login_page))
        .route(web::post().to(users::login)),
    )
    .service(
      web::resource("/signup")
        .route(web::get().to(users::signup_page))
        .route(web::post().to(users::register)),
    );
}

pub async fn not_found() -> Result<HttpResponse, Error> {
  #[derive(Debug, ThisError)]
  #[error("No route matched the request")]
  struct NoRoute;
  Err(Error::from_context(crate::types::Error::NotFound, NoRoute))
}

/// Renders a full page, consuming the notice left by a redirect.
fn render_page(
  req: &HttpRequest,
  current_user: Option<&str>,
  template: &str,
  ctx: Value,
) -> Result<HttpResponse, Error> {
  let notice = Notice::pending(req);
  let page = templates::render(
    template,
    context! {
      current_user => current_user,
      notice => notice.map(Notice::message),
      ..ctx
    },
  )?;

  let mut response = HttpResponse::Ok();
  response.content_type(mime::TEXT_HTML_UTF_8);
  if req.cookie(Notice::COOKIE_NAME).is_some() {
    response.cookie(Notice::clear(Notice::secure_for(req)));
  }

  Ok(response.body(page))
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};

  use crate::test_utils;

  #[actix_web::test]
  async fn unknown_route() {
    let app = test::init_service(crate::server::build(test_utils::build_test_app().await)).await;
    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
