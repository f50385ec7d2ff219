use actix_web::{web, HttpRequest, HttpResponse};
use minijinja::context;
use tracing::debug;
use validator::Validate;

use crate::{
  http::{controllers::render_page, redirect_with_notice, see_other, Actor, Error, Notice},
  services::users::{AuthResult, Login},
  types::form::users::login,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn login_page(req: HttpRequest, actor: Actor) -> Result<HttpResponse, Error> {
  render_page(&req, actor.username(), "login.html", context! {})
}

#[tracing::instrument(skip(app))]
pub async fn login(
  app: web::Data<App>,
  form: web::Form<login::Request>,
) -> Result<HttpResponse, Error> {
  if let Err(error) = form.validate() {
    debug!(?error, "rejected login form");
    return Ok(redirect_with_notice(&app, "/login", Notice::InvalidForm));
  }

  let request = Login {
    username: form.username.as_str(),
    password: form.password.as_deref(),
  };

  match request.perform(app.store()).await? {
    AuthResult::Success(user_id) => {
      let session = app.sessions.establish(user_id)?;
      Ok(see_other("/profile").cookie(session).finish())
    }
    AuthResult::Failure(reason) => {
      debug!(?reason, "login failed");
      Ok(redirect_with_notice(&app, "/login", Notice::LoginFailed))
    }
  }
}
