//! Demo dataset command
//!
//! Loads a small set of sample venues, artists, and shows for local
//! development. Skips when the database already has venues so reruns
//! never duplicate data.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

use fyyur_core::forms::{NewArtist, NewShow, NewVenue};
use fyyur_core::{parse_form_datetime, Genre, UsState};
use fyyur_server::db::repos::{ArtistRepo, ShowRepo, VenueRepo};
use fyyur_server::db::{self, create_pool};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Load the demo dataset
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    db::migrations::run(&pool)
        .await
        .context("Failed to run schema migrations")?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM venues")
        .fetch_one(&pool)
        .await
        .context("Failed to check for existing data")?;
    if existing > 0 {
        tracing::info!("Venues already present, skipping seed");
        return Ok(());
    }

    let venues = VenueRepo::new(&pool);
    let artists = ArtistRepo::new(&pool);
    let shows = ShowRepo::new(&pool);

    let musical_hop = venues
        .create(&NewVenue {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: UsState::CA,
            address: "1015 Folsom Street".into(),
            phone: Some("123-123-1234".into()),
            image_link: Some(
                "https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=60"
                    .into(),
            ),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website: Some("https://www.themusicalhop.com".into()),
            genres: vec![Genre::Jazz, Genre::Reggae],
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .into(),
            ),
        })
        .await
        .context("Failed to seed venue")?;

    venues
        .create(&NewVenue {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: UsState::NY,
            address: "335 Delancey Street".into(),
            phone: Some("914-003-1132".into()),
            image_link: Some(
                "https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&auto=format&fit=crop&w=750&q=80"
                    .into(),
            ),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".into()),
            website: Some("https://www.theduelingpianos.com".into()),
            genres: vec![Genre::Classical, Genre::RnB, Genre::HipHop],
            seeking_talent: false,
            seeking_description: None,
        })
        .await
        .context("Failed to seed venue")?;

    let park_square = venues
        .create(&NewVenue {
            name: "Park Square Live Music & Coffee".into(),
            city: "San Francisco".into(),
            state: UsState::CA,
            address: "34 Whiskey Moore Ave".into(),
            phone: Some("415-000-1234".into()),
            image_link: Some(
                "https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&auto=format&fit=crop&w=747&q=80"
                    .into(),
            ),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
            website: Some("https://www.parksquarelivemusicandcoffee.com".into()),
            genres: vec![Genre::RockNRoll, Genre::Jazz, Genre::Classical, Genre::Folk],
            seeking_talent: false,
            seeking_description: None,
        })
        .await
        .context("Failed to seed venue")?;

    let guns_n_petals = artists
        .create(&NewArtist {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: UsState::CA,
            phone: Some("326-123-5000".into()),
            image_link: Some(
                "https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&auto=format&fit=crop&w=300&q=80"
                    .into(),
            ),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website: Some("https://www.gunsnpetalsband.com".into()),
            genres: vec![Genre::RockNRoll],
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".into(),
            ),
        })
        .await
        .context("Failed to seed artist")?;

    let matt_quevedo = artists
        .create(&NewArtist {
            name: "Matt Quevedo".into(),
            city: "New York".into(),
            state: UsState::NY,
            phone: Some("300-400-5000".into()),
            image_link: Some(
                "https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&auto=format&fit=crop&w=334&q=80"
                    .into(),
            ),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
            website: None,
            genres: vec![Genre::Jazz],
            seeking_venue: false,
            seeking_description: None,
        })
        .await
        .context("Failed to seed artist")?;

    let wild_sax_band = artists
        .create(&NewArtist {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: UsState::CA,
            phone: Some("432-325-5432".into()),
            image_link: Some(
                "https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&auto=format&fit=crop&w=794&q=80"
                    .into(),
            ),
            facebook_link: None,
            website: None,
            genres: vec![Genre::Jazz, Genre::Classical],
            seeking_venue: false,
            seeking_description: None,
        })
        .await
        .context("Failed to seed artist")?;

    let schedule = [
        (guns_n_petals.id, musical_hop.id, "2019-05-21 21:30:00"),
        (matt_quevedo.id, park_square.id, "2019-06-15 23:00:00"),
        (wild_sax_band.id, park_square.id, "2035-04-01 20:00:00"),
        (wild_sax_band.id, park_square.id, "2035-04-08 20:00:00"),
        (wild_sax_band.id, park_square.id, "2035-04-15 20:00:00"),
    ];
    for (artist_id, venue_id, start_time) in schedule {
        shows
            .create(&NewShow {
                artist_id,
                venue_id,
                start_time: demo_time(start_time)?,
            })
            .await
            .context("Failed to seed show")?;
    }

    tracing::info!("Seeded 3 venues, 3 artists, {} shows", schedule.len());
    Ok(())
}

fn demo_time(s: &str) -> Result<DateTime<Utc>> {
    parse_form_datetime(s).with_context(|| format!("invalid demo timestamp: {s}"))
}
