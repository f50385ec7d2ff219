use actix_web::{web, HttpRequest, HttpResponse};
use tracing::info;

use crate::{
  http::{see_other, Actor, Error},
  App,
};

#[tracing::instrument(skip_all)]
pub async fn logout(
  req: HttpRequest,
  app: web::Data<App>,
  actor: Actor,
) -> Result<HttpResponse, Error> {
  let user = actor.get_user(&req)?;
  info!(user.id = %user.id, "user logged out");
  Ok(see_other("/").cookie(app.sessions.terminate()).finish())
}
