use std::path::PathBuf;

use namegender_db::{DatasetSource, LoadOptions};
use namegender_resolver::{Detector, ResolveError};
use namegender_types::GenderLabel;

fn fixture_table() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("namegender-db")
        .join("tests")
        .join("fixtures")
        .join("nam_dict_sample.txt.gz")
}

fn detector() -> Detector {
    Detector::new(DatasetSource::file(fixture_table()), LoadOptions::default())
}

#[test]
fn resolves_common_names() {
    let d = detector();
    assert_eq!(d.get_gender("Bob", None, false).unwrap(), GenderLabel::Male);
    assert_eq!(d.get_gender("Sally", None, false).unwrap(), GenderLabel::Female);
    assert_eq!(
        d.get_gender("Pauley", None, false).unwrap(),
        GenderLabel::Androgynous
    );
}

#[test]
fn resolves_unicode_names() {
    let d = detector();
    for (name, expected) in [
        ("Álfrún", GenderLabel::Female),
        ("Ayşe", GenderLabel::Female),
        ("Gavriliţă", GenderLabel::Female),
        ("İsmet", GenderLabel::Male),
        ("Snæbjörn", GenderLabel::Male),
    ] {
        assert_eq!(d.get_gender(name, None, false).unwrap(), expected, "{name}");
    }
}

#[test]
fn country_reverses_global_trend() {
    let d = detector();
    assert_eq!(
        d.get_gender("Jamie", None, false).unwrap(),
        GenderLabel::MostlyFemale
    );
    assert_eq!(
        d.get_gender("Jamie", Some("great_britain"), false).unwrap(),
        GenderLabel::MostlyMale
    );
    assert_eq!(
        d.get_gender("Jamie", Some("Great Britain"), false).unwrap(),
        GenderLabel::MostlyMale
    );
}

#[test]
fn strict_mode_refuses_to_fall_back() {
    let d = detector();
    assert_eq!(
        d.get_gender("Andrea", Some("Italy"), false).unwrap(),
        GenderLabel::Male
    );
    assert_eq!(
        d.get_gender("Andrea", Some("vietnam"), false).unwrap(),
        GenderLabel::Female
    );
    assert_eq!(
        d.get_gender("Andrea", Some("vietnam"), true).unwrap(),
        GenderLabel::Unknown
    );
}

#[test]
fn unknown_country_fails() {
    let d = detector();
    let err = d.get_gender("Jamie", Some("Unknownland"), false).unwrap_err();
    assert!(matches!(err, ResolveError::UnrecognizedCountry(_)));
}

#[test]
fn unknown_names_and_zero_counts_are_unknown() {
    let d = detector();
    assert_eq!(
        d.get_gender("Zaphod", Some("Unknownland"), true).unwrap(),
        GenderLabel::Unknown
    );
    assert_eq!(
        d.get_gender("Zerocount", None, false).unwrap(),
        GenderLabel::Unknown
    );
}

#[test]
fn compound_variants_resolve_independently() {
    let d = detector();
    for name in ["AnnaMaria", "Anna Maria", "Anna-Maria"] {
        assert_eq!(
            d.get_gender(name, Some("Germany"), true).unwrap(),
            GenderLabel::Female,
            "{name}"
        );
    }
    assert_eq!(
        d.get_gender("Anna+Maria", None, false).unwrap(),
        GenderLabel::Unknown
    );
}

#[test]
fn missing_table_surfaces_on_first_query() {
    let dir = tempfile::tempdir().unwrap();
    let d = Detector::new(
        DatasetSource::file(dir.path().join("nam_dict.txt.gz")),
        LoadOptions::default(),
    );
    let err = d.get_gender("Bob", None, false).unwrap_err();
    assert!(matches!(err, ResolveError::Dataset(_)));
}

#[test]
fn reload_picks_up_a_replaced_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nam_dict.txt.gz");
    std::fs::copy(fixture_table(), &path).unwrap();

    let d = Detector::new(DatasetSource::file(&path), LoadOptions::default());
    assert_eq!(d.get_gender("Bob", None, false).unwrap(), GenderLabel::Male);

    let freq = format!("{:<54}$", "7");
    std::fs::write(&path, format!("F  {:<26} {freq}\n", "Bob")).unwrap();
    // Still served from the loaded index until reload.
    assert_eq!(d.get_gender("Bob", None, false).unwrap(), GenderLabel::Male);

    d.reload().unwrap();
    assert_eq!(d.get_gender("Bob", None, false).unwrap(), GenderLabel::Female);
    assert_eq!(d.get_gender("Sally", None, false).unwrap(), GenderLabel::Unknown);
}
