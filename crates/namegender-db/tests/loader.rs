use std::path::PathBuf;

use namegender_db::{DatasetSource, FrequencyIndex, LoadMode, LoadOptions};
use namegender_types::{Country, GenderLabel};

fn fixture_table() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("nam_dict_sample.txt.gz")
}

fn load() -> FrequencyIndex {
    FrequencyIndex::load(&DatasetSource::file(fixture_table()), LoadOptions::default())
        .expect("load fixture table")
}

#[test]
fn folds_every_data_line() {
    let index = load();
    assert_eq!(index.record_count(), 14);
    // Anna+Maria expands into three names; Jamie and Andrea share entries.
    assert_eq!(index.name_count(), 14);
}

#[test]
fn keeps_every_label_for_ambiguous_names() {
    let index = load();
    let jamie = index.get("Jamie").expect("Jamie present");
    let labels: Vec<_> = jamie.labels().iter().map(|(g, _)| *g).collect();
    assert_eq!(
        labels,
        vec![GenderLabel::MostlyFemale, GenderLabel::MostlyMale]
    );
    let gb = Country::lookup("Great Britain").unwrap();
    assert_eq!(jamie.get(GenderLabel::MostlyMale).unwrap().get(gb), 6);
    assert_eq!(jamie.get(GenderLabel::MostlyFemale).unwrap().total(), 16);
}

#[test]
fn compound_names_resolve_in_every_spelling() {
    let index = load();
    for name in ["AnnaMaria", "Anna Maria", "Anna-Maria"] {
        let entry = index.get(name).unwrap_or_else(|| panic!("{name} missing"));
        assert_eq!(entry.get(GenderLabel::Female).unwrap().total(), 12);
    }
}

#[test]
fn decodes_latin1_and_legacy_tokens() {
    let index = load();
    for name in ["Álfrún", "Ayşe", "Gavriliţă", "İsmet", "Snæbjörn"] {
        assert!(index.contains(name), "{name} missing");
    }
}

#[test]
fn loading_twice_is_stable() {
    let source = DatasetSource::file(fixture_table());
    let first = FrequencyIndex::load(&source, LoadOptions::default()).unwrap();
    let second = FrequencyIndex::load(
        &source,
        LoadOptions {
            mode: LoadMode::Owned,
            ..LoadOptions::default()
        },
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn dumps_non_zero_counts() {
    let index = load();
    let report = index.dump("Bob").expect("Bob present");
    assert_eq!(report.labels.len(), 1);
    let countries: Vec<_> = report.labels[0]
        .countries
        .iter()
        .map(|(c, n)| (c.name(), *n))
        .collect();
    assert_eq!(
        countries,
        vec![("Great Britain", 7), ("Ireland", 5), ("USA", 9), ("Denmark", 2)]
    );
}
