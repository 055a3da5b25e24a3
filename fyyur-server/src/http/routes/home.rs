//! Landing page

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::db::repos::{ArtistRepo, VenueRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// How many recently listed records the landing page shows per kind.
const RECENT_LIMIT: i64 = 10;

/// Landing page data
#[derive(Serialize)]
pub struct HomePage {
    pub venues: Vec<RecentItem>,
    pub artists: Vec<RecentItem>,
}

/// A recently listed venue or artist
#[derive(Serialize)]
pub struct RecentItem {
    pub id: i64,
    pub name: String,
}

/// GET / - the ten most recently listed venues and artists
async fn home(State(state): State<Arc<AppState>>) -> Result<Json<HomePage>, ApiError> {
    let venues = VenueRepo::new(&state.pool).recent(RECENT_LIMIT).await?;
    let artists = ArtistRepo::new(&state.pool).recent(RECENT_LIMIT).await?;

    Ok(Json(HomePage {
        venues: venues
            .into_iter()
            .map(|v| RecentItem {
                id: v.id,
                name: v.name,
            })
            .collect(),
        artists: artists
            .into_iter()
            .map(|a| RecentItem {
                id: a.id,
                name: a.name,
            })
            .collect(),
    }))
}

/// Landing page route
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}
