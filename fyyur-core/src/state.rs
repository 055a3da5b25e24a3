//! US state catalog backing the venue/artist form `state` select.

use std::fmt;

/// Two-letter US state code (plus DC), in the order the form offers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum UsState {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL,
    GA, HI, ID, IL, IN, IA, KS, KY, LA, ME,
    MT, NE, NV, NH, NJ, NM, NY, NC, ND, OH,
    OK, OR, MD, MA, MI, MN, MS, MO, PA, RI,
    SC, SD, TN, TX, UT, VT, VA, WA, WV, WI,
    WY,
}

impl UsState {
    /// Every choice, in form order.
    pub const ALL: &'static [UsState] = &[
        Self::AL, Self::AK, Self::AZ, Self::AR, Self::CA, Self::CO, Self::CT,
        Self::DE, Self::DC, Self::FL, Self::GA, Self::HI, Self::ID, Self::IL,
        Self::IN, Self::IA, Self::KS, Self::KY, Self::LA, Self::ME, Self::MT,
        Self::NE, Self::NV, Self::NH, Self::NJ, Self::NM, Self::NY, Self::NC,
        Self::ND, Self::OH, Self::OK, Self::OR, Self::MD, Self::MA, Self::MI,
        Self::MN, Self::MS, Self::MO, Self::PA, Self::RI, Self::SC, Self::SD,
        Self::TN, Self::TX, Self::UT, Self::VT, Self::VA, Self::WA, Self::WV,
        Self::WI, Self::WY,
    ];

    /// Parse a submitted code. Case-insensitive; unknown codes are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().to_ascii_uppercase();
        let state = match code.as_str() {
            "AL" => Self::AL,
            "AK" => Self::AK,
            "AZ" => Self::AZ,
            "AR" => Self::AR,
            "CA" => Self::CA,
            "CO" => Self::CO,
            "CT" => Self::CT,
            "DE" => Self::DE,
            "DC" => Self::DC,
            "FL" => Self::FL,
            "GA" => Self::GA,
            "HI" => Self::HI,
            "ID" => Self::ID,
            "IL" => Self::IL,
            "IN" => Self::IN,
            "IA" => Self::IA,
            "KS" => Self::KS,
            "KY" => Self::KY,
            "LA" => Self::LA,
            "ME" => Self::ME,
            "MT" => Self::MT,
            "NE" => Self::NE,
            "NV" => Self::NV,
            "NH" => Self::NH,
            "NJ" => Self::NJ,
            "NM" => Self::NM,
            "NY" => Self::NY,
            "NC" => Self::NC,
            "ND" => Self::ND,
            "OH" => Self::OH,
            "OK" => Self::OK,
            "OR" => Self::OR,
            "MD" => Self::MD,
            "MA" => Self::MA,
            "MI" => Self::MI,
            "MN" => Self::MN,
            "MS" => Self::MS,
            "MO" => Self::MO,
            "PA" => Self::PA,
            "RI" => Self::RI,
            "SC" => Self::SC,
            "SD" => Self::SD,
            "TN" => Self::TN,
            "TX" => Self::TX,
            "UT" => Self::UT,
            "VT" => Self::VT,
            "VA" => Self::VA,
            "WA" => Self::WA,
            "WV" => Self::WV,
            "WI" => Self::WI,
            "WY" => Self::WY,
            _ => return None,
        };
        Some(state)
    }

    /// The code as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AL => "AL",
            Self::AK => "AK",
            Self::AZ => "AZ",
            Self::AR => "AR",
            Self::CA => "CA",
            Self::CO => "CO",
            Self::CT => "CT",
            Self::DE => "DE",
            Self::DC => "DC",
            Self::FL => "FL",
            Self::GA => "GA",
            Self::HI => "HI",
            Self::ID => "ID",
            Self::IL => "IL",
            Self::IN => "IN",
            Self::IA => "IA",
            Self::KS => "KS",
            Self::KY => "KY",
            Self::LA => "LA",
            Self::ME => "ME",
            Self::MT => "MT",
            Self::NE => "NE",
            Self::NV => "NV",
            Self::NH => "NH",
            Self::NJ => "NJ",
            Self::NM => "NM",
            Self::NY => "NY",
            Self::NC => "NC",
            Self::ND => "ND",
            Self::OH => "OH",
            Self::OK => "OK",
            Self::OR => "OR",
            Self::MD => "MD",
            Self::MA => "MA",
            Self::MI => "MI",
            Self::MN => "MN",
            Self::MS => "MS",
            Self::MO => "MO",
            Self::PA => "PA",
            Self::RI => "RI",
            Self::SC => "SC",
            Self::SD => "SD",
            Self::TN => "TN",
            Self::TX => "TX",
            Self::UT => "UT",
            Self::VT => "VT",
            Self::VA => "VA",
            Self::WA => "WA",
            Self::WV => "WV",
            Self::WI => "WI",
            Self::WY => "WY",
        }
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
