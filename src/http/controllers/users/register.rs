use actix_web::{web, HttpRequest, HttpResponse};
use minijinja::context;
use tracing::{debug, error, info};
use validator::Validate;

use crate::{
  http::{controllers::render_page, redirect_with_notice, see_other, Actor, Error, Notice},
  services::users::{Register, RegisterError},
  types::form::users::register,
  App,
};

#[tracing::instrument(skip_all)]
pub async fn signup_page(req: HttpRequest, actor: Actor) -> Result<HttpResponse, Error> {
  render_page(&req, actor.username(), "signup.html", context! {})
}

#[tracing::instrument(skip(app))]
pub async fn register(
  app: web::Data<App>,
  form: web::Form<register::Request>,
) -> Result<HttpResponse, Error> {
  if let Err(error) = form.validate() {
    debug!(?error, "rejected signup form");
    return Ok(redirect_with_notice(&app, "/signup", Notice::InvalidForm));
  }

  let request = Register {
    email: form.email.as_str(),
    username: form.username.as_str(),
    password: form.password.as_deref(),
    confirmation: form.repeat_password.as_deref(),
  };

  match request.perform(app.store()).await {
    Ok(result) => {
      info!(user.id = %result.user.id, "registered new user");
      Ok(see_other("/login").finish())
    }
    Err(report) => {
      let notice = match report.current_context() {
        RegisterError::DuplicateEmail => Notice::EmailExists,
        RegisterError::DuplicateUsername => Notice::UsernameTaken,
        RegisterError::PasswordMismatch => Notice::PasswordMismatch,
        RegisterError::Persistence => {
          error!(?report, "could not register user");
          Notice::SignupFailed
        }
      };
      Ok(redirect_with_notice(&app, "/signup", notice))
    }
  }
}
