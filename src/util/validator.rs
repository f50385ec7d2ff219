use error_stack::Report;
use thiserror::Error;
use validator::ValidateError;

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

pub trait IntoValidatorReport<T> {
  fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidateError> {
  fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
    self.map_err(|error| {
      error
        .flatten()
        .into_iter()
        .fold(Report::new(Wrapper), |report, (field, message)| {
          report.attach_printable(format!("{field}: {message}"))
        })
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn attaches_every_field_message() {
    let mut fields = ValidateError::field_builder();
    fields.insert("session.secret", ValidateError::message("too short"));
    fields.insert("db.url", ValidateError::message("Invalid database URL"));

    let report = Err::<(), _>(fields.build())
      .into_validator_report()
      .unwrap_err();

    let attachments = report
      .frames()
      .filter_map(|frame| frame.downcast_ref::<String>())
      .cloned()
      .collect::<Vec<_>>();

    assert!(attachments.contains(&"session.secret: too short".to_string()));
    assert!(attachments.contains(&"db.url: Invalid database URL".to_string()));
  }
}
