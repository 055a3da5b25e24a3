//! Artist endpoints
//!
//! Mirror of the venue endpoints with a flat listing instead of
//! city/state groups; search also matches the genre list.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use fyyur_core::{format_show_time, ArtistForm};

use crate::db::repos::{
    Artist, ArtistDetail, ArtistRef, ArtistRepo, ArtistShow, ArtistSummary, DbError,
};
use crate::http::error::ApiError;
use crate::http::extractors::{FormBody, RecordId};
use crate::http::routes::common::{Flash, FormChoices};
use crate::http::server::AppState;

/// Search request, as posted by the search box
#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

/// Artist line item for the flat listing
#[derive(Serialize)]
pub struct ArtistRefResponse {
    pub id: i64,
    pub name: String,
}

impl From<ArtistRef> for ArtistRefResponse {
    fn from(a: ArtistRef) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

/// Artist line item for search results
#[derive(Serialize)]
pub struct ArtistSummaryResponse {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<ArtistSummary> for ArtistSummaryResponse {
    fn from(a: ArtistSummary) -> Self {
        Self {
            id: a.id,
            name: a.name,
            num_upcoming_shows: a.num_upcoming_shows,
        }
    }
}

/// Search response
#[derive(Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<ArtistSummaryResponse>,
}

/// Artist record as rendered on the edit page
#[derive(Serialize)]
pub struct ArtistResponse {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl From<Artist> for ArtistResponse {
    fn from(a: Artist) -> Self {
        Self {
            id: a.id,
            name: a.name,
            genres: a.genres,
            city: a.city,
            state: a.state,
            phone: a.phone,
            website: a.website,
            facebook_link: a.facebook_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
            image_link: a.image_link,
        }
    }
}

/// A show row on the artist detail page
#[derive(Serialize)]
pub struct ArtistShowResponse {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<ArtistShow> for ArtistShowResponse {
    fn from(s: ArtistShow) -> Self {
        Self {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            venue_image_link: s.venue_image_link,
            start_time: format_show_time(s.start_time),
        }
    }
}

/// Artist detail page data
#[derive(Serialize)]
pub struct ArtistDetailResponse {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowResponse>,
    pub upcoming_shows: Vec<ArtistShowResponse>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl From<ArtistDetail> for ArtistDetailResponse {
    fn from(d: ArtistDetail) -> Self {
        let past_shows: Vec<ArtistShowResponse> =
            d.past_shows.into_iter().map(ArtistShowResponse::from).collect();
        let upcoming_shows: Vec<ArtistShowResponse> =
            d.upcoming_shows.into_iter().map(ArtistShowResponse::from).collect();
        let a = d.artist;

        Self {
            id: a.id,
            name: a.name,
            genres: a.genres,
            city: a.city,
            state: a.state,
            phone: a.phone,
            website: a.website,
            facebook_link: a.facebook_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
            image_link: a.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Edit page data: the choice catalogs plus the record being edited
#[derive(Serialize)]
pub struct EditArtistPage {
    pub form: FormChoices,
    pub artist: ArtistResponse,
}

/// GET /artists - flat id/name listing
async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistRefResponse>>, ApiError> {
    let artists = ArtistRepo::new(&state.pool).list().await?;
    Ok(Json(artists.into_iter().map(ArtistRefResponse::from).collect()))
}

/// POST /artists/search - substring search on artist name or genres
async fn search_artists(
    State(state): State<Arc<AppState>>,
    FormBody(req): FormBody<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let hits = ArtistRepo::new(&state.pool).search(&req.search_term).await?;

    Ok(Json(SearchResponse {
        count: hits.len(),
        data: hits.into_iter().map(ArtistSummaryResponse::from).collect(),
    }))
}

/// GET /artists/{id} - detail page with past/upcoming shows
async fn show_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistDetailResponse>, ApiError> {
    let detail = ArtistRepo::new(&state.pool).get_detail(id).await?;
    Ok(Json(detail.into()))
}

/// GET /artists/create - the blank form's choice catalogs
async fn new_artist_form() -> Json<FormChoices> {
    Json(FormChoices::catalog())
}

/// POST /artists/create - create an artist
async fn create_artist(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<ArtistForm>,
) -> Result<Response, ApiError> {
    let new = match form.clone().validate() {
        Ok(new) => new,
        Err(errors) => return Err(ApiError::form_invalid(errors, &form)),
    };

    match ArtistRepo::new(&state.pool).create(&new).await {
        Ok(artist) => Ok((
            StatusCode::CREATED,
            Json(Flash::new(
                format!("Artist {} was successfully listed!", artist.name),
                "/",
            )),
        )
            .into_response()),
        Err(err) => {
            tracing::error!("artist create failed: {}", err);
            Ok(Json(Flash::new(
                format!("An error occurred. Artist {} could not be listed.", new.name),
                "/",
            ))
            .into_response())
        }
    }
}

/// GET /artists/{id}/edit - edit form pre-populated with the record
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<EditArtistPage>, ApiError> {
    let artist = ArtistRepo::new(&state.pool).get(id).await?;

    Ok(Json(EditArtistPage {
        form: FormChoices::catalog(),
        artist: artist.into(),
    }))
}

/// POST /artists/{id}/edit - update an artist
async fn update_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    FormBody(form): FormBody<ArtistForm>,
) -> Result<Response, ApiError> {
    let new = match form.clone().validate() {
        Ok(new) => new,
        Err(errors) => return Err(ApiError::form_invalid(errors, &form)),
    };

    match ArtistRepo::new(&state.pool).update(id, &new).await {
        Ok(artist) => Ok(Json(Flash::new(
            format!("Artist {} was successfully updated!", artist.name),
            format!("/artists/{}", artist.id),
        ))
        .into_response()),
        Err(DbError::NotFound { resource, id }) => Err(ApiError::NotFound { resource, id }),
        Err(err) => {
            tracing::error!("artist update failed: {}", err);
            Ok(Json(Flash::new(
                format!("An error occurred. Artist {} could not be updated.", new.name),
                "/",
            ))
            .into_response())
        }
    }
}

/// DELETE /artists/{id}/delete - delete an artist and its shows
async fn delete_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    match ArtistRepo::new(&state.pool).delete(id).await {
        Ok(name) => Ok(Json(Flash::new(
            format!("Artist {name} was successfully deleted!"),
            "/",
        ))
        .into_response()),
        Err(DbError::NotFound { resource, id }) => Err(ApiError::NotFound { resource, id }),
        Err(err) => {
            tracing::error!("artist delete failed: {}", err);
            Ok(Json(Flash::new(
                "An error occurred. Artist could not be deleted.",
                "/",
            ))
            .into_response())
        }
    }
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(new_artist_form).post(create_artist))
        .route("/artists/{artist_id}", get(show_artist))
        .route(
            "/artists/{artist_id}/edit",
            get(edit_artist_form).post(update_artist),
        )
        .route("/artists/{artist_id}/delete", delete(delete_artist))
}
