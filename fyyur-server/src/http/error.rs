//! API error types with IntoResponse
//!
//! Handler failures render the JSON equivalent of the status error pages
//! (400, 401, 403, 404, 500). Form validation failures instead carry the
//! field errors and the submitted values so the client can redisplay the
//! form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use fyyur_core::ValidationError;

use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Form validation failed (400): field errors plus submitted values
    FormInvalid {
        errors: Vec<ValidationError>,
        values: Value,
    },

    /// Malformed request outside a form body (400)
    BadRequest { reason: String },

    /// Authentication required (401)
    Unauthorized,

    /// Access denied (403)
    Forbidden,

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Bundle validation errors with the submitted form for redisplay.
    pub fn form_invalid<F: Serialize>(errors: Vec<ValidationError>, form: &F) -> Self {
        Self::FormInvalid {
            errors,
            values: serde_json::to_value(form).unwrap_or(Value::Null),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::FormInvalid { errors, values } => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                let fields: Vec<Value> = errors
                    .iter()
                    .map(|e| {
                        json!({
                            "field": e.field(),
                            "message": e.to_string(),
                        })
                    })
                    .collect();
                let body = json!({
                    "message": format!(
                        "Please fix the following errors: {}",
                        messages.join(", ")
                    ),
                    "errors": fields,
                    "values": values,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::BadRequest { reason } => error_page(StatusCode::BAD_REQUEST, &reason),
            Self::Unauthorized => {
                error_page(StatusCode::UNAUTHORIZED, "Authentication is required.")
            }
            Self::Forbidden => error_page(
                StatusCode::FORBIDDEN,
                "You do not have access to this resource.",
            ),
            Self::NotFound { resource, id } => error_page(
                StatusCode::NOT_FOUND,
                &format!("{resource} '{id}' not found"),
            ),
            Self::Database(e) => {
                // Log the actual error, return a generic page
                tracing::error!("Database error: {}", e);
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our end.",
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong on our end.",
                )
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

/// Render the JSON equivalent of a status error page.
pub fn error_page(status: StatusCode, description: &str) -> Response {
    let body = json!({
        "error": status.as_u16(),
        "name": status.canonical_reason().unwrap_or("Error"),
        "description": description,
    });
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn form_invalid_is_400_with_fields_and_values() {
        let err = ApiError::form_invalid(
            vec![ValidationError::Empty { field: "name" }],
            &json!({"name": ""}),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"][0]["field"], "name");
        assert_eq!(body["values"]["name"], "");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Please fix the following errors:"));
    }

    #[tokio::test]
    async fn not_found_is_404_page() {
        let err = ApiError::NotFound {
            resource: "venue",
            id: "7".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], 404);
        assert_eq!(body["name"], "Not Found");
        assert_eq!(body["description"], "venue '7' not found");
    }

    #[tokio::test]
    async fn unauthorized_and_forbidden_pages() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn database_error_is_masked_500() {
        let err = ApiError::Database(DbError::Sqlx(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["description"], "Something went wrong on our end.");
    }

    #[test]
    fn db_not_found_maps_to_api_not_found() {
        let err: ApiError = DbError::not_found("artist", 9).into();
        assert!(matches!(err, ApiError::NotFound { resource: "artist", .. }));
    }
}
