//! Core domain types for Fyyur: form payloads with validation, the state and
//! genre catalogs the forms choose from, and datetime parsing/formatting
//! helpers shared by the server.

pub mod datetime;
pub mod error;
pub mod forms;
pub mod genre;
pub mod state;

pub use datetime::{
    form_datetime_string, format_datetime, format_show_time, parse_form_datetime, DateFormat,
};
pub use error::ValidationError;
pub use forms::{ArtistForm, NewArtist, NewShow, NewVenue, ShowForm, VenueForm};
pub use genre::Genre;
pub use state::UsState;
