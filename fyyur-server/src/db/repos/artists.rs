//! Artist repository
//!
//! Mirrors the venue repository without the address column; search also
//! matches against the genre list.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use fyyur_core::forms::{genre_labels, NewArtist};

use super::{escape_like, DbError};

/// Artist record from database
#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Artist line item for the flat listing
#[derive(Debug, Clone, FromRow)]
pub struct ArtistRef {
    pub id: i64,
    pub name: String,
}

/// Artist line item for search results
#[derive(Debug, Clone)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A show row on an artist's detail page, venue joined in
#[derive(Debug, Clone)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Artist detail page data: the record plus its shows split around now
#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All artists as a flat id/name listing.
    pub async fn list(&self) -> Result<Vec<ArtistRef>, DbError> {
        let artists = sqlx::query_as::<_, ArtistRef>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(artists)
    }

    /// Case-insensitive substring search on artist name OR any genre
    /// entry. LIKE metacharacters in the term match literally.
    pub async fn search(&self, term: &str) -> Result<Vec<ArtistSummary>, DbError> {
        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > NOW()) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(a.genres) AS g WHERE g ILIKE $1)
            GROUP BY a.id
            ORDER BY a.name
            "#,
        )
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ArtistSummary {
                id: row.get("id"),
                name: row.get("name"),
                num_upcoming_shows: row.get("num_upcoming_shows"),
            })
            .collect())
    }

    /// Fetch a single artist record.
    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    /// Artist detail with shows partitioned into past and upcoming
    /// against a single clock reading.
    pub async fn get_detail(&self, id: i64) -> Result<ArtistDetail, DbError> {
        let artist = self.get(id).await?;

        let rows = sqlx::query(
            r#"
            SELECT
                s.start_time,
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let shows: Vec<ArtistShow> = rows
            .into_iter()
            .map(|row| ArtistShow {
                venue_id: row.get("venue_id"),
                venue_name: row.get("venue_name"),
                venue_image_link: row.get("venue_image_link"),
                start_time: row.get("start_time"),
            })
            .collect();
        let (past_shows, upcoming_shows) = partition_shows(shows, Utc::now());

        Ok(ArtistDetail {
            artist,
            past_shows,
            upcoming_shows,
        })
    }

    /// Insert a new artist, returning the stored record.
    pub async fn create(&self, new: &NewArtist) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist = sqlx::query_as::<_, Artist>(
            r#"
            INSERT INTO artists
                (name, city, state, phone, image_link, facebook_link,
                 website, genres, seeking_venue, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(&new.phone)
        .bind(&new.image_link)
        .bind(&new.facebook_link)
        .bind(&new.website)
        .bind(genre_labels(&new.genres))
        .bind(new.seeking_venue)
        .bind(&new.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Overwrite every form-backed column of an existing artist.
    pub async fn update(&self, id: i64, new: &NewArtist) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist = sqlx::query_as::<_, Artist>(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                image_link = $6,
                facebook_link = $7,
                website = $8,
                genres = $9,
                seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(&new.phone)
        .bind(&new.image_link)
        .bind(&new.facebook_link)
        .bind(&new.website)
        .bind(genre_labels(&new.genres))
        .bind(new.seeking_venue)
        .bind(&new.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Delete an artist and its shows in one transaction, returning the
    /// artist's name for the flash notice.
    pub async fn delete(&self, id: i64) -> Result<String, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shows WHERE artist_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let name = sqlx::query_scalar::<_, String>(
            "DELETE FROM artists WHERE id = $1 RETURNING name",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(name)
    }

    /// Most recently listed artists, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Artist>, DbError> {
        let artists = sqlx::query_as::<_, Artist>(
            "SELECT * FROM artists ORDER BY created_date DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(artists)
    }
}

/// Split shows around one clock reading. A show starting exactly at
/// `now` counts as past.
fn partition_shows(
    shows: Vec<ArtistShow>,
    now: DateTime<Utc>,
) -> (Vec<ArtistShow>, Vec<ArtistShow>) {
    shows.into_iter().partition(|show| show.start_time <= now)
}
