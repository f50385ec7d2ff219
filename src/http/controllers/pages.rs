use actix_web::{HttpRequest, HttpResponse};
use minijinja::context;

use crate::http::{Actor, Error};

#[tracing::instrument(skip_all)]
pub async fn index(req: HttpRequest, actor: Actor) -> Result<HttpResponse, Error> {
  super::render_page(&req, actor.username(), "index.html", context! {})
}

#[cfg(test)]
mod tests {
  use actix_web::{http::StatusCode, test};

  use crate::test_utils;

  #[actix_web::test]
  async fn shows_index_to_everyone() {
    let data = test_utils::build_test_app().await;
    let app = test::init_service(crate::server::build(data.clone())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test_utils::read_body(resp).await;
    assert!(body.contains(r#"href="/login""#));

    let session = test_utils::login_as(&data, "alice", "a@x.com", "secret").await;
    let req = test::TestRequest::get().uri("/").cookie(session).to_request();
    let resp = test::call_service(&app, req).await;
    let body = test_utils::read_body(resp).await;
    assert!(body.contains("You are logged in as alice."));
  }
}
