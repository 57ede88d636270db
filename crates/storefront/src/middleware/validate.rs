use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use shared::errors::ErrorResponse;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// JSON body extractor that runs `validator` rules and answers 400 with the
/// standard `{success: false, message}` body on any failure.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(format!(
                        "Invalid JSON: {}",
                        rejection.body_text()
                    ))),
                )
            })?;

        value.validate().map_err(|validation_errors| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format_validation_errors(
                    &validation_errors,
                ))),
            )
        })?;

        Ok(Self(value))
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut error_messages = Vec::new();
    collect_messages(errors, "", &mut error_messages);

    if error_messages.is_empty() {
        "Validation failed".to_string()
    } else {
        error_messages.join("; ")
    }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| match error.code.as_ref() {
                            "email" => "Invalid email format".to_string(),
                            "length" => "Invalid length".to_string(),
                            "range" => "Value out of range".to_string(),
                            _ => format!("Invalid {field}"),
                        });
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_messages(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{cart::UpdateCartRequest, order::CheckoutRequest};

    #[test]
    fn negative_quantity_reports_field_message() {
        let req: UpdateCartRequest =
            serde_json::from_value(serde_json::json!({"productId": "1", "quantity": -2})).unwrap();

        let message = format_validation_errors(&req.validate().unwrap_err());
        assert_eq!(message, "quantity: quantity must be zero or greater");
    }

    #[test]
    fn nested_item_errors_carry_their_index() {
        let req: CheckoutRequest = serde_json::from_value(serde_json::json!({
            "items": [{"productId": "1", "quantity": 1, "total": 10.0}, {"productId": "", "quantity": 1}]
        }))
        .unwrap();

        let message = format_validation_errors(&req.validate().unwrap_err());
        assert!(message.starts_with("items[1].productId"), "{message}");
    }
}
