//! Repository implementations for database access
//!
//! One repository per aggregate. Shared patterns:
//! - List/search/detail use JOINs with filtered counts (no N+1)
//! - Every write runs in an explicit transaction
//! - Missing rows surface as `DbError::NotFound`, never a panic

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::{Artist, ArtistDetail, ArtistRef, ArtistRepo, ArtistShow, ArtistSummary};
pub use shows::{Show, ShowListing, ShowRepo};
pub use venues::{CityGroup, Venue, VenueDetail, VenueRepo, VenueShow, VenueSummary};

/// Database error type shared by all repositories.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    /// Shorthand for a missing row keyed by numeric id.
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Escape LIKE metacharacters so a search term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_terms() {
        assert_eq!(escape_like("Musical Hop"), "Musical Hop");
    }

    #[test]
    fn escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn not_found_formats_resource_and_id() {
        let err = DbError::not_found("venue", 42);
        assert_eq!(err.to_string(), "not found: venue '42'");
    }
}
