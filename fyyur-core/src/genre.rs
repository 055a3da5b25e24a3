//! Genre catalog backing the multi-select `genres` form field.

use std::fmt;

/// Musical genre, matching the labels the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    HipHop,
    HeavyMetal,
    Instrumental,
    Jazz,
    MusicalTheatre,
    Pop,
    Punk,
    RnB,
    Reggae,
    RockNRoll,
    Soul,
    Other,
}

impl Genre {
    /// Every choice, in form order.
    pub const ALL: &'static [Genre] = &[
        Self::Alternative,
        Self::Blues,
        Self::Classical,
        Self::Country,
        Self::Electronic,
        Self::Folk,
        Self::Funk,
        Self::HipHop,
        Self::HeavyMetal,
        Self::Instrumental,
        Self::Jazz,
        Self::MusicalTheatre,
        Self::Pop,
        Self::Punk,
        Self::RnB,
        Self::Reggae,
        Self::RockNRoll,
        Self::Soul,
        Self::Other,
    ];

    /// Parse a submitted label. Case-insensitive; unknown labels are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let label = s.trim();
        Self::ALL
            .iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(label))
            .copied()
    }

    /// The label as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alternative => "Alternative",
            Self::Blues => "Blues",
            Self::Classical => "Classical",
            Self::Country => "Country",
            Self::Electronic => "Electronic",
            Self::Folk => "Folk",
            Self::Funk => "Funk",
            Self::HipHop => "Hip-Hop",
            Self::HeavyMetal => "Heavy Metal",
            Self::Instrumental => "Instrumental",
            Self::Jazz => "Jazz",
            Self::MusicalTheatre => "Musical Theatre",
            Self::Pop => "Pop",
            Self::Punk => "Punk",
            Self::RnB => "R&B",
            Self::Reggae => "Reggae",
            Self::RockNRoll => "Rock n Roll",
            Self::Soul => "Soul",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!(Genre::parse("Jazz"), Some(Genre::Jazz));
        assert_eq!(Genre::parse("Hip-Hop"), Some(Genre::HipHop));
        assert_eq!(Genre::parse("R&B"), Some(Genre::RnB));
        assert_eq!(Genre::parse("Rock n Roll"), Some(Genre::RockNRoll));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Genre::parse("jazz"), Some(Genre::Jazz));
        assert_eq!(Genre::parse("HEAVY METAL"), Some(Genre::HeavyMetal));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Genre::parse("Swing"), None);
        assert_eq!(Genre::parse(""), None);
    }

    #[test]
    fn round_trips_every_choice() {
        for genre in Genre::ALL {
            assert_eq!(Genre::parse(genre.as_str()), Some(*genre));
        }
    }
}
