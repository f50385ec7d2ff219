use actix_web::{
  body::MessageBody,
  dev::{ServiceFactory, ServiceRequest, ServiceResponse},
  web, HttpServer,
};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use crate::{config, http, App};

#[derive(Debug, Error)]
#[error("Failed to start the HTTP server")]
pub struct StartServerError;

/// Assembles the actix-web application around the shared state.
pub fn build(
  app: web::Data<App>,
) -> actix_web::App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  actix_web::App::new()
    .app_data(app)
    .app_data(http::form_config())
    .wrap(TracingLogger::default())
    .configure(http::controllers::configure)
    .default_service(web::to(http::controllers::not_found))
}

pub async fn run(config: config::Server) -> Result<(), StartServerError> {
  if config.session.secret.is_generated() {
    warn!("No session secret is configured, using a generated one. Every session is lost when the server restarts.");
  }

  let workers = config.workers;
  let addr = (config.ip, config.port);

  let app = App::new(config).await.change_context(StartServerError)?;
  let app = web::Data::new(app);

  let server = HttpServer::new(move || build(app.clone()))
    .workers(workers)
    .bind(addr)
    .change_context(StartServerError)
    .attach_printable_lazy(|| format!("could not bind to {}:{}", addr.0, addr.1))?;

  info!("Listening on http://{}:{}", addr.0, addr.1);
  server.run().await.change_context(StartServerError)
}
