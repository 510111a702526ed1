//! Shared types that mirror the layout of the first-name census table.
//!
//! Every data line of the table carries one hex digit per country, always in
//! the same column order. [`Country`] is a validated index into that order,
//! [`FrequencyVector`] holds one digit per country, and [`GenderLabel`] is the
//! closed set of answers a lookup can produce.
//!
//! ```rust
//! use namegender_types::{Country, FrequencyVector, GenderLabel};
//!
//! let gb = Country::lookup("great_britain").unwrap();
//! assert_eq!(gb, Country::lookup("Great Britain").unwrap());
//! assert_eq!(GenderLabel::from_source_code("?M"), Some(GenderLabel::MostlyMale));
//!
//! let digits = format!("A{}", "0".repeat(53));
//! let freq = FrequencyVector::from_hex_digits(&digits).unwrap();
//! assert_eq!(freq.get(gb), 10);
//! ```

use std::fmt;
use std::str::FromStr;

/// Number of country columns in every frequency vector.
pub const COUNTRY_COUNT: usize = 54;

/// Country display names in column order.
pub const COUNTRIES: [&str; COUNTRY_COUNT] = [
    "Great Britain",
    "Ireland",
    "USA",
    "Italy",
    "Malta",
    "Portugal",
    "Spain",
    "France",
    "Belgium",
    "Luxembourg",
    "The Netherlands",
    "East Frisia",
    "Germany",
    "Austria",
    "Switzerland",
    "Iceland",
    "Denmark",
    "Norway",
    "Sweden",
    "Finland",
    "Estonia",
    "Latvia",
    "Lithuania",
    "Poland",
    "Czech Republic",
    "Slovakia",
    "Hungary",
    "Romania",
    "Bulgaria",
    "Bosnia and Croatia",
    "Kosovo",
    "Macedonia",
    "Montenegro",
    "Serbia",
    "Slovenia",
    "Albania",
    "Greece",
    "Russia",
    "Belarus",
    "Moldova",
    "Ukraine",
    "Armenia",
    "Azerbaijan",
    "Georgia",
    "The Stans",
    "Turkey",
    "Arabia",
    "Israel",
    "China",
    "India",
    "Japan",
    "Korea",
    "Vietnam",
    "Other",
];

/// Column index of a country in the census table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Country(usize);

impl Country {
    /// Resolve a display name (`Great Britain`) or slug (`great_britain`).
    pub fn lookup(text: &str) -> Option<Self> {
        COUNTRIES
            .iter()
            .position(|name| *name == text || slug_matches(name, text))
            .map(Country)
    }

    /// Country at a column index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < COUNTRY_COUNT).then_some(Country(index))
    }

    /// All countries in column order.
    pub fn all() -> impl Iterator<Item = Country> {
        (0..COUNTRY_COUNT).map(Country)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn name(self) -> &'static str {
        COUNTRIES[self.0]
    }

    /// Lowercase name with spaces replaced by underscores.
    pub fn slug(self) -> String {
        self.name().to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn slug_matches(name: &str, candidate: &str) -> bool {
    name.len() == candidate.len()
        && name.chars().zip(candidate.chars()).all(|(n, c)| {
            if n == ' ' {
                c == '_'
            } else {
                n.to_ascii_lowercase() == c
            }
        })
}

/// Error returned when a frequency field cannot be read as one hex digit per country.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FrequencyError {
    Length { expected: usize, found: usize },
    InvalidDigit { column: usize, found: char },
}

impl fmt::Display for FrequencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyError::Length { expected, found } => write!(
                f,
                "frequency field has {found} columns, expected {expected}"
            ),
            FrequencyError::InvalidDigit { column, found } => {
                write!(f, "invalid hex digit {found:?} at frequency column {column}")
            }
        }
    }
}

impl std::error::Error for FrequencyError {}

/// Per-country occurrence magnitudes (0..=15) for one name and gender label.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FrequencyVector([u8; COUNTRY_COUNT]);

impl FrequencyVector {
    pub const fn zeroed() -> Self {
        Self([0; COUNTRY_COUNT])
    }

    /// Parse exactly [`COUNTRY_COUNT`] hex digits, one per country.
    pub fn from_hex_digits(digits: &str) -> Result<Self, FrequencyError> {
        let found = digits.chars().count();
        if found != COUNTRY_COUNT {
            return Err(FrequencyError::Length {
                expected: COUNTRY_COUNT,
                found,
            });
        }
        let mut cells = [0u8; COUNTRY_COUNT];
        for (column, ch) in digits.chars().enumerate() {
            let value = ch
                .to_digit(16)
                .ok_or(FrequencyError::InvalidDigit { column, found: ch })?;
            cells[column] = value as u8;
        }
        Ok(Self(cells))
    }

    pub fn get(&self, country: Country) -> u8 {
        self.0[country.0]
    }

    /// Sum of all country cells.
    pub fn total(&self) -> u32 {
        self.0.iter().map(|v| u32::from(*v)).sum()
    }

    /// Countries with a non-zero count, in column order.
    pub fn non_zero(&self) -> impl Iterator<Item = (Country, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, v)| (Country(i), *v))
    }

    /// Cell-wise sum clamped to the single-digit maximum of 15.
    pub fn saturating_add(&self, other: &FrequencyVector) -> FrequencyVector {
        let mut cells = self.0;
        for (cell, add) in cells.iter_mut().zip(other.0.iter()) {
            *cell = cell.saturating_add(*add).min(15);
        }
        FrequencyVector(cells)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Default for FrequencyVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Resolved gender for a name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GenderLabel {
    Male,
    Female,
    MostlyMale,
    MostlyFemale,
    Androgynous,
    Unknown,
}

impl GenderLabel {
    /// Map a raw source code from the census table (`M`, `1F`, `?`, ...).
    ///
    /// This is the only mapping from source codes; unrecognized codes yield `None`.
    pub fn from_source_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(GenderLabel::Male),
            "F" => Some(GenderLabel::Female),
            "1M" | "?M" => Some(GenderLabel::MostlyMale),
            "1F" | "?F" => Some(GenderLabel::MostlyFemale),
            "?" => Some(GenderLabel::Androgynous),
            _ => None,
        }
    }

    /// Short legacy code (`M`, `F`, `MM`, `MF`, `A`, `U`).
    pub fn code(self) -> &'static str {
        match self {
            GenderLabel::Male => "M",
            GenderLabel::Female => "F",
            GenderLabel::MostlyMale => "MM",
            GenderLabel::MostlyFemale => "MF",
            GenderLabel::Androgynous => "A",
            GenderLabel::Unknown => "U",
        }
    }

    /// Descriptive spelling used in [`Display`](fmt::Display).
    pub fn as_str(self) -> &'static str {
        match self {
            GenderLabel::Male => "male",
            GenderLabel::Female => "female",
            GenderLabel::MostlyMale => "mostly_male",
            GenderLabel::MostlyFemale => "mostly_female",
            GenderLabel::Androgynous => "androgynous",
            GenderLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenderLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = match s {
            "male" | "M" => GenderLabel::Male,
            "female" | "F" => GenderLabel::Female,
            "mostly_male" | "MM" => GenderLabel::MostlyMale,
            "mostly_female" | "MF" => GenderLabel::MostlyFemale,
            "androgynous" | "A" => GenderLabel::Androgynous,
            "unknown" | "U" => GenderLabel::Unknown,
            other => return Err(format!("unknown gender label: {other}")),
        };
        Ok(label)
    }
}
