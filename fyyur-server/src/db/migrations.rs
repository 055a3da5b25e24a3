//! Startup schema migrations
//!
//! DDL is idempotent (CREATE ... IF NOT EXISTS) and runs on every boot.

use sqlx::PgPool;

/// Run all schema migrations.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running schema migrations...");

    // Venues table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT,
            image_link TEXT,
            facebook_link TEXT,
            website TEXT,
            genres TEXT[] NOT NULL DEFAULT '{}',
            seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT,
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Artists table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT,
            image_link TEXT,
            facebook_link TEXT,
            website TEXT,
            genres TEXT[] NOT NULL DEFAULT '{}',
            seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT,
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Shows table. Plain REFERENCES: cascade deletes are the repository's
    // job, inside the same transaction as the parent delete.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id BIGSERIAL PRIMARY KEY,
            start_time TIMESTAMPTZ NOT NULL,
            artist_id BIGINT NOT NULL REFERENCES artists(id),
            venue_id BIGINT NOT NULL REFERENCES venues(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time)")
        .execute(pool)
        .await?;

    Ok(())
}
