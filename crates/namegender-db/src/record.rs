//! Fixed-column parsing of one census table line.
//!
//! Column boundaries are byte offsets into the ISO-8859-1 encoded line:
//!
//! ```text
//! [0,2)   gender tag (`M`, `F`, `1M`, `?M`, `1F`, `?F`, `?`)
//! [3,29)  name, padded with spaces, may contain legacy diacritic tokens
//! [30,84) one hex digit per country, space meaning zero
//! [84]    optional `$` record terminator
//! ```

use std::ops::Range;

use encoding_rs::mem::decode_latin1;
use namegender_types::{COUNTRY_COUNT, FrequencyVector, GenderLabel};

use crate::error::RecordError;
use crate::normalize::normalize;

pub const GENDER_COLUMNS: Range<usize> = 0..2;
pub const NAME_COLUMNS: Range<usize> = 3..29;
pub const FREQUENCY_START: usize = 30;
/// Shortest data line that still covers every country column.
pub const MIN_LINE_LEN: usize = FREQUENCY_START + COUNTRY_COUNT;
pub const RECORD_TERMINATOR: u8 = b'$';

/// One parsed data line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// Canonical (normalized) name; may still contain `+` compounding markers.
    pub name: String,
    pub gender: GenderLabel,
    pub frequencies: FrequencyVector,
}

/// Parse one raw line. Comment (`#`), separator (`=`) and empty lines yield `None`.
pub fn parse_line(raw: &[u8]) -> Result<Option<Record>, RecordError> {
    let line = strip_line_ending(raw);
    match line.first() {
        None | Some(b'#' | b'=') => return Ok(None),
        Some(_) => {}
    }
    if line.len() < MIN_LINE_LEN {
        return Err(RecordError::LineTooShort {
            expected: MIN_LINE_LEN,
            found: line.len(),
        });
    }

    let tag = decode_latin1(&line[GENDER_COLUMNS]);
    let tag = tag.trim();
    let gender = GenderLabel::from_source_code(tag)
        .ok_or_else(|| RecordError::UnknownGenderTag(tag.to_string()))?;

    let raw_name = decode_latin1(&line[NAME_COLUMNS]);
    let name = normalize(raw_name.trim()).into_owned();
    if name.is_empty() {
        return Err(RecordError::EmptyName);
    }

    let mut field = &line[FREQUENCY_START..];
    if let Some((&RECORD_TERMINATOR, rest)) = field.split_last() {
        field = rest;
    }
    let digits: String = field
        .iter()
        .map(|b| if *b == b' ' { '0' } else { char::from(*b) })
        .collect();
    let frequencies = FrequencyVector::from_hex_digits(&digits)?;

    Ok(Some(Record {
        name,
        gender,
        frequencies,
    }))
}

// Trailing blanks are zero counts unless a terminator precedes them.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let trimmed = line.trim_ascii_end();
    if trimmed.last() == Some(&RECORD_TERMINATOR) {
        return trimmed;
    }
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
