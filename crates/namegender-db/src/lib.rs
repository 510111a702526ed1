//! Load the first-name census table into an in-memory frequency index.
//!
//! The table is a (usually gzip-compressed) ISO-8859-1 text file with one
//! fixed-column record per line: a gender tag, a name and one hex digit per
//! country. Loading folds every record into a [`FrequencyIndex`] keyed by the
//! canonical name, where each name maps the gender labels seen for it to their
//! per-country [`FrequencyVector`].
//!
//! # Features
//! - Legacy diacritic tokens (`<s,>`, `<SCH>`, ...) are rewritten to Unicode by
//!   [`normalize`] before names are used as keys, both at load and at lookup.
//! - Compound names written with `+` (`Anna+Maria`) expand into the joined,
//!   spaced and hyphenated spellings.
//! - Runtime backing choice: memory-map the file or read it into an owned
//!   buffer via [`LoadMode`]; in-memory tables are accepted through
//!   [`DatasetSource::Bytes`].
//! - Malformed lines abort the load by default ([`MalformedPolicy::Abort`]) or
//!   are skipped with a warning.
//!
//! # Example
//! ```no_run
//! use namegender_db::{DatasetSource, FrequencyIndex, LoadOptions};
//!
//! # fn main() -> Result<(), namegender_db::DatasetError> {
//! let source = DatasetSource::file("data/nam_dict.txt.gz");
//! let index = FrequencyIndex::load(&source, LoadOptions::default())?;
//! if let Some(report) = index.dump("Jamie") {
//!     print!("{report}");
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p namegender-db --example stats -- <table>`.

mod error;
mod normalize;
mod record;

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use flate2::read::MultiGzDecoder;
use memmap2::Mmap;
use namegender_types::{Country, FrequencyVector, GenderLabel};
use tracing::{debug, info, warn};

pub use error::{DatasetError, RecordError};
pub use normalize::normalize;
pub use record::{
    FREQUENCY_START, GENDER_COLUMNS, MIN_LINE_LEN, NAME_COLUMNS, RECORD_TERMINATOR, Record,
    parse_line,
};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// Spellings a `+` compounding marker expands into: joined, spaced, hyphenated.
const COMPOUND_JOINERS: [&str; 3] = ["", " ", "-"];

/// Strategy for reading a table file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    #[default]
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

/// What to do with a line that violates the record layout.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MalformedPolicy {
    /// Fail the whole load.
    #[default]
    Abort,
    /// Log a warning and continue with the next line.
    Skip,
}

/// How a second record for an existing (name, gender) pair is folded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    /// The later vector replaces the earlier one.
    #[default]
    Overwrite,
    /// Vectors are summed cell-wise, clamped to 15.
    Accumulate,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadOptions {
    pub mode: LoadMode,
    pub malformed: MalformedPolicy,
    pub duplicates: DuplicatePolicy,
}

/// Where the census table is read from.
#[derive(Clone, Debug)]
pub enum DatasetSource {
    File(PathBuf),
    Bytes(Arc<[u8]>),
}

impl DatasetSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DatasetSource::File(path.into())
    }

    pub fn bytes(data: impl Into<Arc<[u8]>>) -> Self {
        DatasetSource::Bytes(data.into())
    }

    /// Human-readable origin used in logs and errors.
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::File(path) => path.display().to_string(),
            DatasetSource::Bytes(data) => format!("<memory, {} bytes>", data.len()),
        }
    }

    fn open(&self, mode: LoadMode) -> Result<Buffer, DatasetError> {
        match self {
            DatasetSource::File(path) => load_file(path, mode),
            DatasetSource::Bytes(data) => Ok(Buffer::Shared(Arc::clone(data))),
        }
    }
}

impl From<PathBuf> for DatasetSource {
    fn from(path: PathBuf) -> Self {
        DatasetSource::File(path)
    }
}

impl From<&Path> for DatasetSource {
    fn from(path: &Path) -> Self {
        DatasetSource::File(path.to_path_buf())
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
    Shared(Arc<[u8]>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
            Buffer::Shared(s) => s.as_ref(),
        }
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, DatasetError> {
    let origin = || path.display().to_string();
    let mut file = File::open(path).map_err(|e| DatasetError::unavailable(origin(), e))?;
    match mode {
        LoadMode::Mmap => {
            let len = file
                .metadata()
                .map_err(|e| DatasetError::unavailable(origin(), e))?
                .len();
            if len == 0 {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .map_err(|e| DatasetError::unavailable(origin(), e))
        }
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .map_err(|e| DatasetError::unavailable(origin(), e))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Gender labels seen for one canonical name, in first-seen order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NameEntry {
    labels: Vec<(GenderLabel, FrequencyVector)>,
}

impl NameEntry {
    /// Labels with their vectors; the order is the tie-break order for resolution.
    pub fn labels(&self) -> &[(GenderLabel, FrequencyVector)] {
        &self.labels
    }

    pub fn get(&self, gender: GenderLabel) -> Option<&FrequencyVector> {
        self.labels
            .iter()
            .find(|(label, _)| *label == gender)
            .map(|(_, freq)| freq)
    }

    fn set(&mut self, gender: GenderLabel, freq: FrequencyVector, policy: DuplicatePolicy) {
        match self.labels.iter_mut().find(|(label, _)| *label == gender) {
            Some((_, existing)) => match policy {
                DuplicatePolicy::Overwrite => *existing = freq,
                DuplicatePolicy::Accumulate => *existing = existing.saturating_add(&freq),
            },
            None => self.labels.push((gender, freq)),
        }
    }
}

/// Canonical name → gender label → per-country frequencies.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrequencyIndex {
    names: HashMap<String, NameEntry>,
    records: usize,
    duplicates: DuplicatePolicy,
}

impl FrequencyIndex {
    /// Empty index folding duplicates with the given policy.
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// Read, decompress and fold a whole table.
    pub fn load(source: &DatasetSource, options: LoadOptions) -> Result<Self, DatasetError> {
        let start = Instant::now();
        let origin = source.describe();
        let buffer = source.open(options.mode)?;
        let index = Self::fold_bytes(buffer.as_slice(), options, &origin)?;
        info!(
            "loaded {} records ({} names) from {} in {} ms",
            index.records,
            index.names.len(),
            origin,
            start.elapsed().as_millis()
        );
        Ok(index)
    }

    /// Fold a table held in memory; gzip payloads are detected by their magic bytes.
    pub fn from_bytes(bytes: &[u8], options: LoadOptions) -> Result<Self, DatasetError> {
        Self::fold_bytes(bytes, options, "<memory>")
    }

    /// Fold an already decompressed table stream.
    pub fn from_reader<R: BufRead>(reader: R, options: LoadOptions) -> Result<Self, DatasetError> {
        Self::fold(reader, options, "<reader>")
    }

    fn fold_bytes(bytes: &[u8], options: LoadOptions, origin: &str) -> Result<Self, DatasetError> {
        if bytes.starts_with(&GZIP_MAGIC) {
            debug!("{origin}: gzip payload");
            Self::fold(BufReader::new(MultiGzDecoder::new(bytes)), options, origin)
        } else {
            Self::fold(bytes, options, origin)
        }
    }

    fn fold<R: BufRead>(reader: R, options: LoadOptions, origin: &str) -> Result<Self, DatasetError> {
        let mut index = Self::new(options.duplicates);
        let mut skipped = 0usize;
        for (lineno, line) in reader.split(b'\n').enumerate() {
            let line = line.map_err(|e| DatasetError::unavailable(origin, e))?;
            match parse_line(&line) {
                Ok(Some(record)) => index.ingest(record),
                Ok(None) => {}
                Err(source) => match options.malformed {
                    MalformedPolicy::Abort => {
                        return Err(DatasetError::Malformed {
                            line: lineno + 1,
                            source,
                        });
                    }
                    MalformedPolicy::Skip => {
                        warn!("{}:{} skipping malformed record: {}", origin, lineno + 1, source);
                        skipped += 1;
                    }
                },
            }
        }
        if skipped > 0 {
            warn!("{origin}: skipped {skipped} malformed records");
        }
        Ok(index)
    }

    /// Fold one record, expanding `+` compounds into their spelling variants.
    pub fn ingest(&mut self, record: Record) {
        self.records += 1;
        self.insert(&record.name, record.gender, record.frequencies);
    }

    fn insert(&mut self, name: &str, gender: GenderLabel, freq: FrequencyVector) {
        if name.contains('+') {
            for joiner in COMPOUND_JOINERS {
                self.insert(&name.replace('+', joiner), gender, freq);
            }
            return;
        }
        self.names
            .entry(name.to_string())
            .or_default()
            .set(gender, freq, self.duplicates);
    }

    /// Entry for a name; the query is normalized first.
    pub fn get(&self, name: &str) -> Option<&NameEntry> {
        self.names.get(normalize(name).as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct canonical names.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of records folded, before compound expansion.
    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.keys().map(String::as_str)
    }

    /// Every label for a name with its non-zero per-country counts.
    pub fn dump(&self, name: &str) -> Option<NameReport> {
        let entry = self.get(name)?;
        Some(NameReport {
            name: normalize(name).into_owned(),
            labels: entry
                .labels()
                .iter()
                .map(|(gender, freq)| LabelReport {
                    gender: *gender,
                    countries: freq.non_zero().collect(),
                })
                .collect(),
        })
    }
}

/// Inspection view of one name, produced by [`FrequencyIndex::dump`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NameReport {
    pub name: String,
    pub labels: Vec<LabelReport>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LabelReport {
    pub gender: GenderLabel,
    /// Countries with a non-zero count, in column order.
    pub countries: Vec<(Country, u8)>,
}

impl fmt::Display for NameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            writeln!(f, "{}", label.gender)?;
            for (country, count) in &label.countries {
                writeln!(f, "\t{country} -> {count}")?;
            }
        }
        Ok(())
    }
}
