//! Typed form payloads with validation.
//!
//! Each form deserializes the urlencoded body exactly as submitted (every
//! field a string, checkboxes optional, `genres` repeated), then `validate()`
//! checks the required-field/type table and yields the typed record the
//! repositories consume. All failing fields are reported together, not just
//! the first.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::datetime::parse_form_datetime;
use crate::error::ValidationError;
use crate::genre::Genre;
use crate::state::UsState;

/// Length caps carried over from the storage schema.
const MAX_TEXT: usize = 120;
const MAX_WEBSITE: usize = 500;
const MAX_LONG_TEXT: usize = 900;

/// Digits with optional separators, 7-20 characters.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9()+\- ]{7,20}$").expect("invalid phone regex"));

/// Raw venue form, as posted by the new/edit venue pages.
///
/// Serializable so handlers can echo the submitted values back alongside
/// validation errors.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

/// Raw artist form. Same shape as [`VenueForm`] minus the address, with
/// `seeking_venue` in place of `seeking_talent`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
}

/// Raw show form: two record ids and a start time, all as strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

/// Validated venue payload, used for both create and edit.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Validated artist payload, used for both create and edit.
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<Genre>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Validated show payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl VenueForm {
    /// Validate the form, collecting every field error.
    pub fn validate(self) -> Result<NewVenue, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = required_text("name", self.name, &mut errors);
        let city = bounded_text("city", self.city, MAX_TEXT, &mut errors);
        let state = parse_state(&self.state, &mut errors);
        let address = bounded_text("address", self.address, MAX_TEXT, &mut errors);
        let phone = optional_phone(self.phone, &mut errors);
        let image_link = optional_text("image_link", self.image_link, MAX_LONG_TEXT, &mut errors);
        let facebook_link =
            optional_text("facebook_link", self.facebook_link, MAX_TEXT, &mut errors);
        let website = optional_text("website_link", self.website_link, MAX_WEBSITE, &mut errors);
        let genres = parse_genres(self.genres, &mut errors);
        let seeking_talent = checkbox(&self.seeking_talent);
        let seeking_description = optional_text(
            "seeking_description",
            self.seeking_description,
            MAX_LONG_TEXT,
            &mut errors,
        );

        match (errors.is_empty(), state) {
            (true, Some(state)) => Ok(NewVenue {
                name,
                city,
                state,
                address,
                phone,
                image_link,
                facebook_link,
                website,
                genres,
                seeking_talent,
                seeking_description,
            }),
            _ => Err(errors),
        }
    }
}

impl ArtistForm {
    /// Validate the form, collecting every field error.
    pub fn validate(self) -> Result<NewArtist, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let name = required_text("name", self.name, &mut errors);
        let city = bounded_text("city", self.city, MAX_TEXT, &mut errors);
        let state = parse_state(&self.state, &mut errors);
        let phone = optional_phone(self.phone, &mut errors);
        let image_link = optional_text("image_link", self.image_link, MAX_LONG_TEXT, &mut errors);
        let facebook_link =
            optional_text("facebook_link", self.facebook_link, MAX_TEXT, &mut errors);
        let website = optional_text("website_link", self.website_link, MAX_WEBSITE, &mut errors);
        let genres = parse_genres(self.genres, &mut errors);
        let seeking_venue = checkbox(&self.seeking_venue);
        let seeking_description = optional_text(
            "seeking_description",
            self.seeking_description,
            MAX_LONG_TEXT,
            &mut errors,
        );

        match (errors.is_empty(), state) {
            (true, Some(state)) => Ok(NewArtist {
                name,
                city,
                state,
                phone,
                image_link,
                facebook_link,
                website,
                genres,
                seeking_venue,
                seeking_description,
            }),
            _ => Err(errors),
        }
    }
}

impl ShowForm {
    /// Validate the form, collecting every field error.
    ///
    /// The ids are only checked for shape here; whether they reference
    /// existing records is the store's business.
    pub fn validate(self) -> Result<NewShow, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let artist_id = parse_record_id("artist_id", &self.artist_id, &mut errors);
        let venue_id = parse_record_id("venue_id", &self.venue_id, &mut errors);
        let start_time = parse_start_time(&self.start_time, &mut errors);

        match (errors.is_empty(), artist_id, venue_id, start_time) {
            (true, Some(artist_id), Some(venue_id), Some(start_time)) => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

/// Stored labels for a validated genre list, in submission order.
pub fn genre_labels(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.as_str().to_owned()).collect()
}

fn required_text(
    field: &'static str,
    value: String,
    errors: &mut Vec<ValidationError>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::Empty { field });
    }
    trimmed.to_owned()
}

fn bounded_text(
    field: &'static str,
    value: String,
    max: usize,
    errors: &mut Vec<ValidationError>,
) -> String {
    let trimmed = required_text(field, value, errors);
    if trimmed.len() > max {
        errors.push(ValidationError::TooLong { field, max });
    }
    trimmed
}

fn optional_text(
    field: &'static str,
    value: String,
    max: usize,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() > max {
        errors.push(ValidationError::TooLong { field, max });
    }
    Some(trimmed.to_owned())
}

fn optional_phone(value: String, errors: &mut Vec<ValidationError>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !PHONE_RE.is_match(trimmed) {
        errors.push(ValidationError::InvalidFormat {
            field: "phone",
            reason: "expected 7-20 digits with optional separators",
        });
    }
    Some(trimmed.to_owned())
}

fn parse_state(value: &str, errors: &mut Vec<ValidationError>) -> Option<UsState> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::Empty { field: "state" });
        return None;
    }
    match UsState::parse(trimmed) {
        Some(state) => Some(state),
        None => {
            errors.push(ValidationError::InvalidVariant {
                field: "state",
                value: trimmed.to_owned(),
            });
            None
        }
    }
}

fn parse_genres(values: Vec<String>, errors: &mut Vec<ValidationError>) -> Vec<Genre> {
    if values.is_empty() {
        errors.push(ValidationError::Empty { field: "genres" });
        return Vec::new();
    }
    let mut genres = Vec::with_capacity(values.len());
    for value in values {
        match Genre::parse(&value) {
            Some(genre) => genres.push(genre),
            None => errors.push(ValidationError::InvalidVariant {
                field: "genres",
                value: value.trim().to_owned(),
            }),
        }
    }
    genres
}

fn parse_record_id(
    field: &'static str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::Empty { field });
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.push(ValidationError::InvalidFormat {
                field,
                reason: "expected a positive integer id",
            });
            None
        }
    }
}

fn parse_start_time(value: &str, errors: &mut Vec<ValidationError>) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(ValidationError::Empty { field: "start_time" });
        return None;
    }
    match parse_form_datetime(trimmed) {
        Some(dt) => Some(dt),
        None => {
            errors.push(ValidationError::InvalidFormat {
                field: "start_time",
                reason: "expected YYYY-MM-DD HH:MM:SS",
            });
            None
        }
    }
}

/// HTML checkbox semantics: absent means unchecked; the handful of truthy
/// markers browsers and clients send mean checked.
fn checkbox(value: &Option<String>) -> bool {
    match value {
        None => false,
        Some(v) => {
            let v = v.trim();
            v.eq_ignore_ascii_case("y")
                || v.eq_ignore_ascii_case("on")
                || v.eq_ignore_ascii_case("true")
                || v == "1"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn full_venue_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            image_link: "https://example.com/hop.jpg".into(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
            website_link: "https://www.themusicalhop.com".into(),
            genres: vec!["Jazz".into(), "Reggae".into()],
            seeking_talent: Some("y".into()),
            seeking_description: "Looking for a local artist.".into(),
        }
    }

    #[test]
    fn venue_form_valid() {
        let venue = full_venue_form().validate().unwrap();
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.state, UsState::CA);
        assert_eq!(venue.genres, vec![Genre::Jazz, Genre::Reggae]);
        assert!(venue.seeking_talent);
        assert_eq!(venue.phone.as_deref(), Some("123-123-1234"));
        assert_eq!(venue.website.as_deref(), Some("https://www.themusicalhop.com"));
    }

    #[test]
    fn venue_form_reports_every_missing_field() {
        let errors = VenueForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"city"));
        assert!(fields.contains(&"state"));
        assert!(fields.contains(&"address"));
        assert!(fields.contains(&"genres"));
        // optional fields stay quiet
        assert!(!fields.contains(&"phone"));
        assert!(!fields.contains(&"image_link"));
    }

    #[test]
    fn venue_form_rejects_unknown_state_and_genre() {
        let mut form = full_venue_form();
        form.state = "Narnia".into();
        form.genres = vec!["Jazz".into(), "Swing".into()];
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidVariant {
            field: "state",
            value: "Narnia".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidVariant {
            field: "genres",
            value: "Swing".into(),
        }));
    }

    #[test]
    fn venue_form_rejects_bad_phone() {
        let mut form = full_venue_form();
        form.phone = "call me maybe".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "phone");
    }

    #[test]
    fn venue_form_trims_and_blanks_optionals() {
        let mut form = full_venue_form();
        form.name = "  The Musical Hop  ".into();
        form.phone = "   ".into();
        form.seeking_description = "".into();
        let venue = form.validate().unwrap();
        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.phone, None);
        assert_eq!(venue.seeking_description, None);
    }

    #[test]
    fn venue_form_enforces_length_caps() {
        let mut form = full_venue_form();
        form.city = "x".repeat(121);
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(&ValidationError::TooLong {
            field: "city",
            max: 120,
        }));
    }

    #[test]
    fn checkbox_semantics() {
        assert!(!checkbox(&None));
        assert!(!checkbox(&Some("".into())));
        assert!(!checkbox(&Some("false".into())));
        assert!(checkbox(&Some("y".into())));
        assert!(checkbox(&Some("on".into())));
        assert!(checkbox(&Some("true".into())));
        assert!(checkbox(&Some("1".into())));
    }

    #[test]
    fn artist_form_valid() {
        let form = ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: Some("y".into()),
            ..ArtistForm::default()
        };
        let artist = form.validate().unwrap();
        assert_eq!(artist.genres, vec![Genre::RockNRoll]);
        assert!(artist.seeking_venue);
        assert_eq!(artist.image_link, None);
    }

    #[test]
    fn show_form_valid() {
        let form = ShowForm {
            artist_id: "1".into(),
            venue_id: "3".into(),
            start_time: "2035-04-01 20:00:00".into(),
        };
        let show = form.validate().unwrap();
        assert_eq!(show.artist_id, 1);
        assert_eq!(show.venue_id, 3);
        assert_eq!(
            show.start_time,
            Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn show_form_rejects_bad_input() {
        let form = ShowForm {
            artist_id: "one".into(),
            venue_id: "-2".into(),
            start_time: "whenever".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["artist_id", "venue_id", "start_time"]);
    }

    #[test]
    fn show_form_requires_all_fields() {
        let errors = ShowForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::Empty { .. })));
    }

    #[test]
    fn genre_labels_keep_submission_order() {
        assert_eq!(
            genre_labels(&[Genre::RockNRoll, Genre::Jazz]),
            vec!["Rock n Roll".to_owned(), "Jazz".to_owned()]
        );
    }
}
