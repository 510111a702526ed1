//! Pick the most probable gender label for a first name.
//!
//! Resolution is a pure function of a [`FrequencyIndex`] and a query:
//! 1. Names missing from the index resolve to [`GenderLabel::Unknown`].
//! 2. Without a country, each label scores the sum of its per-country digits.
//! 3. With a country, each label scores its digit in that country's column. A
//!    column with no evidence for any label falls back to the global sums
//!    unless `strict` is set.
//! 4. The highest score wins; ties go to the label first seen in the table. A
//!    winning score of zero means [`GenderLabel::Unknown`].
//!
//! [`Detector`] wraps an index that is built on first use and can be rebuilt.
//!
//! # Example
//! ```no_run
//! use namegender_db::{DatasetSource, LoadOptions};
//! use namegender_resolver::Detector;
//!
//! # fn main() -> Result<(), namegender_resolver::ResolveError> {
//! let detector = Detector::new(DatasetSource::file("data/nam_dict.txt.gz"), LoadOptions::default());
//! println!("{}", detector.get_gender("Jamie", None, false)?);
//! println!("{}", detector.get_gender("Jamie", Some("great_britain"), false)?);
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p namegender-resolver --example lookup -- <table> <name> [country]`.

mod detector;

use namegender_db::{DatasetError, FrequencyIndex, NameEntry};
use namegender_types::{Country, GenderLabel};
use thiserror::Error;
use tracing::debug;

pub use detector::Detector;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no such country: {0}")]
    UnrecognizedCountry(String),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Resolve `name`, optionally within `country` (display name or slug).
///
/// An empty country counts as no country. Any other text that names no country,
/// whitespace included, is an error, but only for names present in the index.
pub fn resolve(
    index: &FrequencyIndex,
    name: &str,
    country: Option<&str>,
    strict: bool,
) -> Result<GenderLabel, ResolveError> {
    let Some(entry) = index.get(name) else {
        return Ok(GenderLabel::Unknown);
    };
    let Some(country_text) = country.filter(|c| !c.is_empty()) else {
        return Ok(global_label(entry));
    };
    let country = Country::lookup(country_text)
        .ok_or_else(|| ResolveError::UnrecognizedCountry(country_text.to_string()))?;
    Ok(country_label(entry, name, country, strict))
}

fn global_label(entry: &NameEntry) -> GenderLabel {
    max_label(
        entry
            .labels()
            .iter()
            .map(|(label, freq)| (*label, freq.total())),
    )
}

fn country_label(entry: &NameEntry, name: &str, country: Country, strict: bool) -> GenderLabel {
    let evidence = country_scores(entry, country)
        .map(|(_, count)| count)
        .max()
        .unwrap_or(0);
    if evidence == 0 && !strict {
        debug!("no evidence for {name} in {country}, using global counts");
        return global_label(entry);
    }
    max_label(country_scores(entry, country))
}

fn country_scores(
    entry: &NameEntry,
    country: Country,
) -> impl Iterator<Item = (GenderLabel, u32)> + '_ {
    entry
        .labels()
        .iter()
        .map(move |(label, freq)| (*label, u32::from(freq.get(country))))
}

/// Highest-scoring label, first one on ties; zero evidence is `Unknown`.
fn max_label(scores: impl Iterator<Item = (GenderLabel, u32)>) -> GenderLabel {
    let mut best: Option<(GenderLabel, u32)> = None;
    for (label, score) in scores {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((label, score));
        }
    }
    match best {
        Some((label, score)) if score > 0 => label,
        _ => GenderLabel::Unknown,
    }
}
