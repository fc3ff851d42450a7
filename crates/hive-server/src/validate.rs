//! Request validation, accumulated per field.

use crate::error::{ApiError, FieldError};
use uuid::Uuid;

/// Collects field failures so one response reports all of them.
#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "must not be empty");
        }
        self
    }

    /// Shape check only; deliverability is the mail system's problem.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        let looks_like_email = value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !looks_like_email {
            self.fail(field, "must be a valid email address");
        }
        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// Parse a path identifier, reporting a validation failure rather than a
/// framework rejection on garbage.
pub fn parse_id(value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| ApiError::invalid("id", "must be a valid identifier"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_every_failure() {
        let mut v = Validator::new();
        v.email("email", "nope").non_empty("name", "  ");
        let err = v.finish().unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[1].field, "name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plausible_email_passes() {
        let mut v = Validator::new();
        v.email("email", "a@x.com");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn rejects_missing_domain_dot() {
        let mut v = Validator::new();
        v.email("email", "a@localhost");
        assert!(v.finish().is_err());
    }

    #[test]
    fn garbage_id_is_a_validation_error() {
        assert!(matches!(parse_id("not-a-uuid"), Err(ApiError::Validation(_))));
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
