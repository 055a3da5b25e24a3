//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Extract a numeric record id from the request path.
///
/// Non-numeric ids render the 400 page instead of axum's plain-text
/// rejection.
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::BadRequest {
                    reason: "missing record id".into(),
                })?;

        let id = raw.parse::<i64>().map_err(|_| ApiError::BadRequest {
            reason: format!("'{raw}' is not a record id"),
        })?;

        Ok(Self(id))
    }
}

/// Form-decoded request body.
///
/// Same decoding as axum-extra's `Form` (repeated keys collect into
/// `Vec` fields), but an undecodable body renders the 400 page instead
/// of the extractor's plain-text rejection.
pub struct FormBody<T>(pub T);

impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|err| ApiError::BadRequest {
                reason: err.to_string(),
            })?;

        Ok(Self(value))
    }
}
