use actix_web::{HttpRequest, HttpResponse};
use minijinja::context;

use crate::http::{controllers::render_page, Actor, Error};

#[tracing::instrument(skip_all)]
pub async fn profile(req: HttpRequest, actor: Actor) -> Result<HttpResponse, Error> {
  let user = actor.get_user(&req)?;
  render_page(
    &req,
    Some(user.username.as_str()),
    "profile.html",
    context! { user => &user.username },
  )
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};

  use crate::{http::Notice, test_utils};

  #[actix_web::test]
  async fn should_show_profile() {
    let data = test_utils::build_test_app().await;
    let session = test_utils::login_as(&data, "alice", "a@x.com", "secret").await;
    let app = test::init_service(crate::server::build(data)).await;

    let req = test::TestRequest::get().uri("/profile").cookie(session).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test_utils::read_body(resp).await;
    assert!(body.contains("This is your profile, alice"));
  }

  #[actix_web::test]
  async fn should_require_login() {
    let app = test::init_service(crate::server::build(test_utils::build_test_app().await)).await;

    let req = test::TestRequest::get().uri("/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(test_utils::location(&resp), Some("/login"));

    let flash = test_utils::find_cookie(&resp, Notice::COOKIE_NAME).unwrap();
    assert_eq!(flash.value(), Notice::LoginRequired.code());
  }

  #[actix_web::test]
  async fn login_notice_follows_secure_sessions() {
    let mut config = crate::config::Server::default();
    config.session.secure = true;
    let app = test::init_service(crate::server::build(
      test_utils::build_test_app_with(config).await,
    ))
    .await;

    let req = test::TestRequest::get().uri("/profile").to_request();
    let resp = test::call_service(&app, req).await;

    let flash = test_utils::find_cookie(&resp, Notice::COOKIE_NAME).unwrap();
    assert_eq!(flash.secure(), Some(true));
  }
}
