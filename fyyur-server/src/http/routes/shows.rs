//! Show endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use fyyur_core::{form_datetime_string, ShowForm};

use crate::db::repos::{ShowListing, ShowRepo};
use crate::http::error::ApiError;
use crate::http::extractors::FormBody;
use crate::http::routes::common::Flash;
use crate::http::server::AppState;

/// A show row in the listing
#[derive(Serialize)]
pub struct ShowResponse {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<ShowListing> for ShowResponse {
    fn from(s: ShowListing) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: s.start_time.to_rfc3339(),
        }
    }
}

/// Field defaults for the blank show form
#[derive(Serialize)]
pub struct ShowFormDefaults {
    pub start_time: String,
}

/// GET /shows - all shows with venue/artist names
async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowResponse>>, ApiError> {
    let shows = ShowRepo::new(&state.pool).list().await?;
    Ok(Json(shows.into_iter().map(ShowResponse::from).collect()))
}

/// GET /shows/create - the blank form's field defaults
async fn new_show_form() -> Json<ShowFormDefaults> {
    Json(ShowFormDefaults {
        start_time: form_datetime_string(Utc::now()),
    })
}

/// POST /shows/create - create a show
///
/// Whether the submitted ids reference real records is left to the FK
/// constraints; a violation takes the store-failure path.
async fn create_show(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<ShowForm>,
) -> Result<Response, ApiError> {
    let new = match form.clone().validate() {
        Ok(new) => new,
        Err(errors) => return Err(ApiError::form_invalid(errors, &form)),
    };

    match ShowRepo::new(&state.pool).create(&new).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(Flash::new("Show was successfully listed!", "/")),
        )
            .into_response()),
        Err(err) => {
            tracing::error!("show create failed: {}", err);
            Ok(Json(Flash::new(
                "An error occurred. Show could not be listed.",
                "/",
            ))
            .into_response())
        }
    }
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(new_show_form).post(create_show))
}
