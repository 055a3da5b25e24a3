//! Venue repository
//!
//! Listings and search join the shows table once with a filtered count;
//! detail pages partition a venue's shows against a single clock reading.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use fyyur_core::forms::{genre_labels, NewVenue};

use super::{escape_like, DbError};

/// Venue record from database
#[derive(Debug, Clone, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// Venue line item for listings and search results
#[derive(Debug, Clone)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues of one city/state area
#[derive(Debug, Clone)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show row on a venue's detail page, artist joined in
#[derive(Debug, Clone)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Venue detail page data: the record plus its shows split around now
#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All venues grouped by (city, state), each with its upcoming-show
    /// count.
    ///
    /// Single query with a filtered aggregate; rows arrive ordered by
    /// city/state so the fold below can group adjacent rows.
    pub async fn list_grouped(&self) -> Result<Vec<CityGroup>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > NOW()) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.city, v.state, v.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut groups: Vec<CityGroup> = Vec::new();
        for row in rows {
            let city: String = row.get("city");
            let state: String = row.get("state");
            let summary = VenueSummary {
                id: row.get("id"),
                name: row.get("name"),
                num_upcoming_shows: row.get("num_upcoming_shows"),
            };
            match groups.last_mut() {
                Some(group) if group.city == city && group.state == state => {
                    group.venues.push(summary);
                }
                _ => groups.push(CityGroup {
                    city,
                    state,
                    venues: vec![summary],
                }),
            }
        }

        Ok(groups)
    }

    /// Case-insensitive substring search on venue name. LIKE
    /// metacharacters in the term match literally.
    pub async fn search(&self, term: &str) -> Result<Vec<VenueSummary>, DbError> {
        let pattern = format!("%{}%", escape_like(term));
        let rows = sqlx::query(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > NOW()) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE $1
            GROUP BY v.id
            ORDER BY v.name
            "#,
        )
        .bind(&pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| VenueSummary {
                id: row.get("id"),
                name: row.get("name"),
                num_upcoming_shows: row.get("num_upcoming_shows"),
            })
            .collect())
    }

    /// Fetch a single venue record.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    /// Venue detail with shows partitioned into past and upcoming.
    ///
    /// The partition compares every show against one clock reading, so a
    /// show is never in both halves (or neither).
    pub async fn get_detail(&self, id: i64) -> Result<VenueDetail, DbError> {
        let venue = self.get(id).await?;

        let rows = sqlx::query(
            r#"
            SELECT
                s.start_time,
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let shows: Vec<VenueShow> = rows
            .into_iter()
            .map(|row| VenueShow {
                artist_id: row.get("artist_id"),
                artist_name: row.get("artist_name"),
                artist_image_link: row.get("artist_image_link"),
                start_time: row.get("start_time"),
            })
            .collect();
        let (past_shows, upcoming_shows) = partition_shows(shows, Utc::now());

        Ok(VenueDetail {
            venue,
            past_shows,
            upcoming_shows,
        })
    }

    /// Insert a new venue, returning the stored record.
    pub async fn create(&self, new: &NewVenue) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues
                (name, city, state, address, phone, image_link, facebook_link,
                 website, genres, seeking_talent, seeking_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(&new.address)
        .bind(&new.phone)
        .bind(&new.image_link)
        .bind(&new.facebook_link)
        .bind(&new.website)
        .bind(genre_labels(&new.genres))
        .bind(new.seeking_talent)
        .bind(&new.seeking_description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Overwrite every form-backed column of an existing venue.
    pub async fn update(&self, id: i64, new: &NewVenue) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                image_link = $7,
                facebook_link = $8,
                website = $9,
                genres = $10,
                seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.city)
        .bind(new.state.as_str())
        .bind(&new.address)
        .bind(&new.phone)
        .bind(&new.image_link)
        .bind(&new.facebook_link)
        .bind(&new.website)
        .bind(genre_labels(&new.genres))
        .bind(new.seeking_talent)
        .bind(&new.seeking_description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Delete a venue and its shows in one transaction, returning the
    /// venue's name for the flash notice.
    pub async fn delete(&self, id: i64) -> Result<String, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM shows WHERE venue_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let name = sqlx::query_scalar::<_, String>(
            "DELETE FROM venues WHERE id = $1 RETURNING name",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(name)
    }

    /// Most recently listed venues, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<Venue>, DbError> {
        let venues = sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues ORDER BY created_date DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(venues)
    }
}

/// Split shows around one clock reading. A show starting exactly at
/// `now` counts as past.
fn partition_shows(
    shows: Vec<VenueShow>,
    now: DateTime<Utc>,
) -> (Vec<VenueShow>, Vec<VenueShow>) {
    shows.into_iter().partition(|show| show.start_time <= now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::artists::ArtistRepo;
    use crate::db::repos::shows::ShowRepo;
    use fyyur_core::forms::{NewArtist, NewShow};
    use fyyur_core::{Genre, UsState};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p fyyur-server -- --ignored

    fn sample_venue(name: &str) -> NewVenue {
        NewVenue {
            name: name.to_owned(),
            city: "San Francisco".into(),
            state: UsState::CA,
            address: "1015 Folsom Street".into(),
            phone: Some("123-123-1234".into()),
            image_link: None,
            facebook_link: None,
            website: None,
            genres: vec![Genre::Jazz, Genre::Reggae],
            seeking_talent: false,
            seeking_description: None,
        }
    }

    fn sample_artist(name: &str) -> NewArtist {
        NewArtist {
            name: name.to_owned(),
            city: "San Francisco".into(),
            state: UsState::CA,
            phone: None,
            image_link: None,
            facebook_link: None,
            website: None,
            genres: vec![Genre::Jazz],
            seeking_venue: false,
            seeking_description: None,
        }
    }

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[test]
    fn partition_counts_boundary_show_as_past() {
        let now = Utc::now();
        let show = |offset_secs: i64| VenueShow {
            artist_id: 1,
            artist_name: "Boundary Band".into(),
            artist_image_link: None,
            start_time: now + chrono::Duration::seconds(offset_secs),
        };

        let (past, upcoming) = partition_shows(vec![show(-60), show(0), show(60)], now);
        assert_eq!(past.len(), 2);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].start_time, now + chrono::Duration::seconds(60));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_round_trips() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);

        let created = repo
            .create(&sample_venue("Round Trip Hall"))
            .await
            .expect("create failed");
        let fetched = repo.get(created.id).await.expect("get failed");

        assert_eq!(fetched.name, "Round Trip Hall");
        assert_eq!(fetched.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(fetched.phone.as_deref(), Some("123-123-1234"));
        assert!(!fetched.seeking_talent);

        repo.delete(created.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn get_missing_venue_is_not_found() {
        let pool = test_pool().await;
        let err = VenueRepo::new(&pool).get(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "venue", .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_cascades_to_shows() {
        let pool = test_pool().await;
        let venues = VenueRepo::new(&pool);
        let artists = ArtistRepo::new(&pool);
        let shows = ShowRepo::new(&pool);

        let venue = venues
            .create(&sample_venue("Cascade Test Hall"))
            .await
            .expect("venue create failed");
        let artist = artists
            .create(&sample_artist("Cascade Test Band"))
            .await
            .expect("artist create failed");
        let show = shows
            .create(&NewShow {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: Utc::now() + chrono::Duration::days(30),
            })
            .await
            .expect("show create failed");

        venues.delete(venue.id).await.expect("delete failed");

        let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shows WHERE id = $1")
            .bind(show.id)
            .fetch_one(&pool)
            .await
            .expect("count failed");
        assert_eq!(remaining, 0);

        artists.delete(artist.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn detail_splits_past_and_upcoming_shows() {
        let pool = test_pool().await;
        let venues = VenueRepo::new(&pool);
        let artists = ArtistRepo::new(&pool);
        let shows = ShowRepo::new(&pool);

        let venue = venues
            .create(&sample_venue("Partition Test Hall"))
            .await
            .expect("venue create failed");
        let artist = artists
            .create(&sample_artist("Partition Test Band"))
            .await
            .expect("artist create failed");

        for days in [-30, 30] {
            shows
                .create(&NewShow {
                    artist_id: artist.id,
                    venue_id: venue.id,
                    start_time: Utc::now() + chrono::Duration::days(days),
                })
                .await
                .expect("show create failed");
        }

        let detail = venues.get_detail(venue.id).await.expect("detail failed");
        assert_eq!(detail.past_shows.len(), 1);
        assert_eq!(detail.upcoming_shows.len(), 1);
        assert_eq!(detail.past_shows[0].artist_id, artist.id);
        assert!(detail.past_shows[0].start_time < detail.upcoming_shows[0].start_time);

        venues.delete(venue.id).await.expect("cleanup failed");
        artists.delete(artist.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upcoming_counts_follow_show_times() {
        let pool = test_pool().await;
        let venues = VenueRepo::new(&pool);
        let artists = ArtistRepo::new(&pool);
        let shows = ShowRepo::new(&pool);

        let hop = venues
            .create(&sample_venue("Count Scenario Hop"))
            .await
            .expect("venue create failed");
        let mut second = sample_venue("Count Scenario Live Music & Coffee");
        second.city = "Count Scenario City".into();
        let coffee = venues.create(&second).await.expect("venue create failed");
        let artist = artists
            .create(&sample_artist("Count Scenario Band"))
            .await
            .expect("artist create failed");

        // One past and one upcoming show at the Hop; only the upcoming
        // one may count
        for days in [-30, 30] {
            shows
                .create(&NewShow {
                    artist_id: artist.id,
                    venue_id: hop.id,
                    start_time: Utc::now() + chrono::Duration::days(days),
                })
                .await
                .expect("show create failed");
        }

        let groups = venues.list_grouped().await.expect("list failed");
        let listed = groups
            .iter()
            .flat_map(|g| g.venues.iter())
            .find(|v| v.id == hop.id)
            .expect("venue missing from listing");
        assert_eq!(listed.num_upcoming_shows, 1);

        // The narrow term finds only the Hop, the shared term finds both
        let hop_hits = venues
            .search("Count Scenario Hop")
            .await
            .expect("search failed");
        assert!(hop_hits.iter().all(|v| v.id != coffee.id));
        let hop_hit = hop_hits
            .iter()
            .find(|v| v.id == hop.id)
            .expect("venue missing from search");
        assert_eq!(hop_hit.num_upcoming_shows, 1);

        let both = venues.search("count scenario").await.expect("search failed");
        assert!(both.iter().any(|v| v.id == hop.id));
        let coffee_hit = both
            .iter()
            .find(|v| v.id == coffee.id)
            .expect("venue missing from search");
        assert_eq!(coffee_hit.num_upcoming_shows, 0);

        venues.delete(hop.id).await.expect("cleanup failed");
        venues.delete(coffee.id).await.expect("cleanup failed");
        artists.delete(artist.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn listing_groups_by_city_and_state() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);

        let mut downtown = sample_venue("Grouping Test Downtown");
        downtown.city = "Grouping Test City".into();
        let mut uptown = sample_venue("Grouping Test Uptown");
        uptown.city = "Grouping Test City".into();
        let mut elsewhere = sample_venue("Grouping Test Elsewhere");
        elsewhere.city = "Grouping Test Other City".into();
        elsewhere.state = UsState::NY;

        let a = repo.create(&downtown).await.expect("create failed");
        let b = repo.create(&uptown).await.expect("create failed");
        let c = repo.create(&elsewhere).await.expect("create failed");

        let groups = repo.list_grouped().await.expect("list failed");
        let same_city = groups
            .iter()
            .find(|g| g.city == "Grouping Test City" && g.state == "CA")
            .expect("group missing");
        let ids: Vec<i64> = same_city.venues.iter().map(|v| v.id).collect();
        assert!(ids.contains(&a.id) && ids.contains(&b.id));
        assert!(!ids.contains(&c.id));

        // No shows were created, so every count is zero
        assert!(same_city.venues.iter().all(|v| v.num_upcoming_shows == 0));

        for id in [a.id, b.id, c.id] {
            repo.delete(id).await.expect("cleanup failed");
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_matches_substring_case_insensitively() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);

        let created = repo
            .create(&sample_venue("The Musical Hop"))
            .await
            .expect("create failed");

        let hits = repo.search("hop").await.expect("search failed");
        assert!(hits.iter().any(|v| v.id == created.id));

        let misses = repo.search("100%").await.expect("search failed");
        assert!(misses.iter().all(|v| v.id != created.id));

        repo.delete(created.id).await.expect("cleanup failed");
    }
}
