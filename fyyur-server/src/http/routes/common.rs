//! Shared route plumbing: flash bodies, form choice catalogs, the 404
//! fallback.

use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use fyyur_core::{Genre, UsState};

use crate::http::error::error_page;

/// Flash notice body: the message plus where the page navigates next.
///
/// Stands in for a server-side session flash; the client is expected
/// to show `message` and follow `redirect`.
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub message: String,
    pub redirect: String,
}

impl Flash {
    pub fn new(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect: redirect.into(),
        }
    }
}

/// Choice catalogs for the venue and artist forms.
#[derive(Debug, Clone, Serialize)]
pub struct FormChoices {
    pub states: Vec<&'static str>,
    pub genres: Vec<&'static str>,
}

impl FormChoices {
    pub fn catalog() -> Self {
        Self {
            states: UsState::ALL.iter().map(|s| s.as_str()).collect(),
            genres: Genre::ALL.iter().map(|g| g.as_str()).collect(),
        }
    }
}

/// Fallback handler: unknown paths render the 404 page.
pub async fn not_found() -> Response {
    error_page(
        StatusCode::NOT_FOUND,
        "The page you're looking for doesn't exist.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_choices() {
        let choices = FormChoices::catalog();
        assert_eq!(choices.states.len(), 51);
        assert_eq!(choices.genres.len(), 19);
        assert!(choices.states.contains(&"CA"));
        assert!(choices.genres.contains(&"Rock n Roll"));
    }

    #[tokio::test]
    async fn fallback_is_404() {
        assert_eq!(not_found().await.status(), StatusCode::NOT_FOUND);
    }
}
