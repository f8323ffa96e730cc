//! `ValidatedForm` extractor: url-encoded body, deserialized then validated.

use axum::Form;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorSignal;

/// A form body that passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ErrorSignal;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(error = %rejection.body_text(), "Form rejected");
                ErrorSignal::new(rejection.status(), rejection.body_text())
            })?;

        value
            .validate()
            .map_err(|errors| ErrorSignal::bad_request(validation_message(&errors)))?;

        Ok(Self(value))
    }
}

/// Every failed rule's message, ordered by field name.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::request::ReviewForm;

    #[test]
    fn test_validation_message_joins_fields() {
        let form = ReviewForm {
            rating: 0,
            comment: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            validation_message(&errors),
            "Comment is required, Rating must be between 1 and 5"
        );
    }
}
