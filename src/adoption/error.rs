use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by the adoption workflow.
///
/// Every variant is recoverable from the caller's point of view: failed
/// operations leave the store exactly as it was, so the operator can correct
/// the input and retry.
#[derive(Debug, thiserror::Error)]
pub enum AdoptionError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid {field}: {value:?} (expected a number)")]
    InvalidNumber { field: &'static str, value: String },
    #[error("pet {pet_id} not found")]
    PetNotFound { pet_id: i64 },
    #[error("application {app_id} not found")]
    ApplicationNotFound { app_id: i64 },
    #[error("pet {pet_id} is no longer available for adoption (currently {status})")]
    PetUnavailable { pet_id: i64, status: String },
    #[error("adoption store failure")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for AdoptionError {
    fn into_response(self) -> Response {
        let status = match self {
            AdoptionError::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AdoptionError::InvalidNumber { .. } => StatusCode::BAD_REQUEST,
            AdoptionError::PetNotFound { .. } | AdoptionError::ApplicationNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            AdoptionError::PetUnavailable { .. } => StatusCode::CONFLICT,
            AdoptionError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "adoption operation failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        let err = AdoptionError::MissingField { field: "adopter_email" };
        assert_eq!(err.to_string(), "missing required field: adopter_email");

        let err = AdoptionError::InvalidNumber {
            field: "age",
            value: "four".to_string(),
        };
        assert_eq!(err.to_string(), "invalid age: \"four\" (expected a number)");
    }

    #[test]
    fn conflict_reports_the_current_status() {
        let err = AdoptionError::PetUnavailable {
            pet_id: 7,
            status: "Pending".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "pet 7 is no longer available for adoption (currently Pending)"
        );
    }

    #[test]
    fn responses_use_the_documented_status_codes() {
        let cases = [
            (
                AdoptionError::MissingField { field: "name" },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AdoptionError::InvalidNumber {
                    field: "pet_id",
                    value: "x".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                AdoptionError::PetNotFound { pet_id: 1 },
                StatusCode::NOT_FOUND,
            ),
            (
                AdoptionError::ApplicationNotFound { app_id: 1 },
                StatusCode::NOT_FOUND,
            ),
            (
                AdoptionError::PetUnavailable {
                    pet_id: 1,
                    status: "Adopted".to_string(),
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
