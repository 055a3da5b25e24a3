//! Show repository
//!
//! Shows are created through the listing form and never edited; the only
//! read is the full listing with both parents joined in.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use fyyur_core::forms::NewShow;

use super::DbError;

/// Show record from database
#[derive(Debug, Clone, FromRow)]
pub struct Show {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub artist_id: i64,
    pub venue_id: i64,
}

/// A show row with venue and artist names joined in
#[derive(Debug, Clone)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All shows with their venue and artist, oldest first.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                s.start_time,
                v.id AS venue_id,
                v.name AS venue_name,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ShowListing {
                venue_id: row.get("venue_id"),
                venue_name: row.get("venue_name"),
                artist_id: row.get("artist_id"),
                artist_name: row.get("artist_name"),
                artist_image_link: row.get("artist_image_link"),
                start_time: row.get("start_time"),
            })
            .collect())
    }

    /// Insert a new show.
    ///
    /// The form only checks id shape; whether the ids reference existing
    /// records is enforced here by the FK constraints, and a violation
    /// rolls the transaction back.
    pub async fn create(&self, new: &NewShow) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        let show = sqlx::query_as::<_, Show>(
            r#"
            INSERT INTO shows (artist_id, venue_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(new.artist_id)
        .bind(new.venue_id)
        .bind(new.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(show)
    }
}
