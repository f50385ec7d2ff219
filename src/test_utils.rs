use actix_web::{
  body::MessageBody, cookie::Cookie, dev::ServiceResponse, http::header, test, web,
};

use crate::{
  auth::password,
  config,
  database::Pool,
  schema::{NewUser, User},
  store::UserStore,
  App,
};

/// App state backed by a fresh in-memory database.
pub(crate) async fn build_test_app() -> web::Data<App> {
  build_test_app_with(config::Server::default()).await
}

pub(crate) async fn build_test_app_with(config: config::Server) -> web::Data<App> {
  let pool = Pool::in_memory().await.unwrap();
  web::Data::new(App::with_pool(config, pool))
}

pub(crate) async fn register_user(
  store: &dyn UserStore,
  username: &str,
  email: &str,
  password: &str,
) -> User {
  let password_hash = password::hash(password).unwrap();
  store
    .insert(NewUser {
      username,
      email,
      password_hash: password_hash.as_deref(),
    })
    .await
    .unwrap()
}

/// Registers a user and returns a session cookie for it.
pub(crate) async fn login_as(app: &App, username: &str, email: &str, password: &str) -> Cookie<'static> {
  let user = register_user(app.store(), username, email, password).await;
  app.sessions.establish(user.id).unwrap()
}

pub(crate) async fn read_body<B: MessageBody>(resp: ServiceResponse<B>) -> String {
  let body = test::read_body(resp).await;
  String::from_utf8(body.to_vec()).unwrap()
}

pub(crate) fn find_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
  resp
    .response()
    .cookies()
    .find(|cookie| cookie.name() == name)
    .map(Cookie::into_owned)
}

pub(crate) fn location<B>(resp: &ServiceResponse<B>) -> Option<&str> {
  resp
    .headers()
    .get(header::LOCATION)
    .and_then(|value| value.to_str().ok())
}
