//! Venue endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use fyyur_core::{format_show_time, VenueForm};

use crate::db::repos::{CityGroup, DbError, Venue, VenueDetail, VenueRepo, VenueShow, VenueSummary};
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

/// Venue line item for listings and search results
#[derive(Serialize)]
pub struct VenueSummaryResponse {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<VenueSummary> for VenueSummaryResponse {
    fn from(v: VenueSummary) -> Self {
        Self {
            id: v.id,
            name: v.name,
            num_upcoming_shows: v.num_upcoming_shows,
        }
    }
}

/// One city/state area of the venues listing
#[derive(Serialize)]
pub struct AreaResponse {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummaryResponse>,
}

impl From<CityGroup> for AreaResponse {
    fn from(g: CityGroup) -> Self {
        Self {
            city: g.city,
            state: g.state,
            venues: g.venues.into_iter().map(VenueSummaryResponse::from).collect(),
        }
    }
}

/// Search response
#[derive(Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<VenueSummaryResponse>,
}

/// Venue record as rendered on the edit page
#[derive(Serialize)]
pub struct VenueResponse {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl From<Venue> for VenueResponse {
    fn from(v: Venue) -> Self {
        Self {
            id: v.id,
            name: v.name,
            genres: v.genres,
            address: v.address,
            city: v.city,
            state: v.state,
            phone: v.phone,
            website: v.website,
            facebook_link: v.facebook_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
            image_link: v.image_link,
        }
    }
}

/// A show row on the venue detail page
#[derive(Serialize)]
pub struct VenueShowResponse {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<VenueShow> for VenueShowResponse {
    fn from(s: VenueShow) -> Self {
        Self {
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: format_show_time(s.start_time),
        }
    }
}

/// Venue detail page data
#[derive(Serialize)]
pub struct VenueDetailResponse {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowResponse>,
    pub upcoming_shows: Vec<VenueShowResponse>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl From<VenueDetail> for VenueDetailResponse {
    fn from(d: VenueDetail) -> Self {
        let past_shows: Vec<VenueShowResponse> =
            d.past_shows.into_iter().map(VenueShowResponse::from).collect();
        let upcoming_shows: Vec<VenueShowResponse> =
            d.upcoming_shows.into_iter().map(VenueShowResponse::from).collect();
        let v = d.venue;

        Self {
            id: v.id,
            name: v.name,
            genres: v.genres,
            address: v.address,
            city: v.city,
            state: v.state,
            phone: v.phone,
            website: v.website,
            facebook_link: v.facebook_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
            image_link: v.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Edit page data: the choice catalogs plus the record being edited
#[derive(Serialize)]
pub struct EditVenuePage {
    pub form: FormChoices,
    pub venue: VenueResponse,
}

/// GET /venues - venues grouped by city/state
async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AreaResponse>>, ApiError> {
    let groups = VenueRepo::new(&state.pool).list_grouped().await?;
    Ok(Json(groups.into_iter().map(AreaResponse::from).collect()))
}

/// POST /venues/search - substring search on venue name
async fn search_venues(
    State(state): State<Arc<AppState>>,
    FormBody(req): FormBody<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let hits = VenueRepo::new(&state.pool).search(&req.search_term).await?;

    Ok(Json(SearchResponse {
        count: hits.len(),
        data: hits.into_iter().map(VenueSummaryResponse::from).collect(),
    }))
}

/// GET /venues/{id} - detail page with past/upcoming shows
async fn show_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<VenueDetailResponse>, ApiError> {
    let detail = VenueRepo::new(&state.pool).get_detail(id).await?;
    Ok(Json(detail.into()))
}

/// GET /venues/create - the blank form's choice catalogs
async fn new_venue_form() -> Json<FormChoices> {
    Json(FormChoices::catalog())
}

/// POST /venues/create - create a venue
async fn create_venue(
    State(state): State<Arc<AppState>>,
    FormBody(form): FormBody<VenueForm>,
) -> Result<Response, ApiError> {
    let new = match form.clone().validate() {
        Ok(new) => new,
        Err(errors) => return Err(ApiError::form_invalid(errors, &form)),
    };

    match VenueRepo::new(&state.pool).create(&new).await {
        Ok(venue) => Ok((
            StatusCode::CREATED,
            Json(Flash::new(
                format!("Venue {} was successfully listed!", venue.name),
                "/",
            )),
        )
            .into_response()),
        Err(err) => {
            tracing::error!("venue create failed: {}", err);
            Ok(Json(Flash::new(
                format!("An error occurred. Venue {} could not be listed.", new.name),
                "/",
            ))
            .into_response())
        }
    }
}

/// GET /venues/{id}/edit - edit form pre-populated with the record
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<EditVenuePage>, ApiError> {
    let venue = VenueRepo::new(&state.pool).get(id).await?;

    Ok(Json(EditVenuePage {
        form: FormChoices::catalog(),
        venue: venue.into(),
    }))
}

/// POST /venues/{id}/edit - update a venue
async fn update_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    FormBody(form): FormBody<VenueForm>,
) -> Result<Response, ApiError> {
    let new = match form.clone().validate() {
        Ok(new) => new,
        Err(errors) => return Err(ApiError::form_invalid(errors, &form)),
    };

    match VenueRepo::new(&state.pool).update(id, &new).await {
        Ok(venue) => Ok(Json(Flash::new(
            format!("Venue {} was successfully updated!", venue.name),
            format!("/venues/{}", venue.id),
        ))
        .into_response()),
        Err(DbError::NotFound { resource, id }) => Err(ApiError::NotFound { resource, id }),
        Err(err) => {
            tracing::error!("venue update failed: {}", err);
            Ok(Json(Flash::new(
                format!("An error occurred. Venue {} could not be updated.", new.name),
                "/",
            ))
            .into_response())
        }
    }
}

/// DELETE /venues/{id}/delete - delete a venue and its shows
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    match VenueRepo::new(&state.pool).delete(id).await {
        Ok(name) => Ok(Json(Flash::new(
            format!("Venue {name} was successfully deleted!"),
            "/",
        ))
        .into_response()),
        Err(DbError::NotFound { resource, id }) => Err(ApiError::NotFound { resource, id }),
        Err(err) => {
            tracing::error!("venue delete failed: {}", err);
            Ok(Json(Flash::new(
                "An error occurred. Venue could not be deleted.",
                "/",
            ))
            .into_response())
        }
    }
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(new_venue_form).post(create_venue))
        .route("/venues/{venue_id}", get(show_venue))
        .route(
            "/venues/{venue_id}/edit",
            get(edit_venue_form).post(update_venue),
        )
        .route("/venues/{venue_id}/delete", delete(delete_venue))
}
