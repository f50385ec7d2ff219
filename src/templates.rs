//! HTML pages, compiled into the binary.
use error_stack::{Result, ResultExt};
use minijinja::{default_auto_escape_callback, Environment, Value};
use once_cell::sync::Lazy;
use thiserror::Error;

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
  let mut env = Environment::new();
  env.set_auto_escape_callback(default_auto_escape_callback);
  env.set_loader(embedded_template_loader);
  env
});

#[derive(Debug, Error)]
#[error("Failed to render template")]
pub struct RenderError;

pub fn render(name: &str, context: Value) -> Result<String, RenderError> {
  ENV
    .get_template(name)
    .and_then(|template| template.render(context))
    .change_context(RenderError)
    .attach_printable_lazy(|| format!("template: {name}"))
}

fn embedded_template_loader(name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
  let content = match name {
    "base.html" => Some(include_str!("../templates/base.html")),
    "error.html" => Some(include_str!("../templates/error.html")),
    "index.html" => Some(include_str!("../templates/index.html")),
    "login.html" => Some(include_str!("../templates/login.html")),
    "profile.html" => Some(include_str!("../templates/profile.html")),
    "signup.html" => Some(include_str!("../templates/signup.html")),
    _ => None,
  };

  Ok(content.map(str::to_string))
}

#[cfg(test)]
mod tests {
  use super::*;
  use minijinja::context;

  #[test]
  fn renders_profile() {
    let page = render("profile.html", context! { user => "alice", current_user => "alice" }).unwrap();
    assert!(page.contains("This is your profile, alice"));
    assert!(page.contains(r#"href="/logout""#));
  }

  #[test]
  fn escapes_user_input() {
    let page = render("profile.html", context! { user => "<script>" }).unwrap();
    assert!(page.contains("&lt;script&gt;"));
    assert!(!page.contains("<script>"));
  }

  #[test]
  fn renders_notice() {
    let page = render("login.html", context! { notice => "Error: passwords do not match." }).unwrap();
    assert!(page.contains("Error: passwords do not match."));
  }

  #[test]
  fn unknown_template() {
    assert!(render("missing.html", context! {}).is_err());
  }
}
