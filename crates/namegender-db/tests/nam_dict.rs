use std::env;
use std::path::PathBuf;

use namegender_db::{DatasetSource, FrequencyIndex, LoadMode, LoadOptions};

fn table_path() -> Option<PathBuf> {
    env::var("NAM_DICT_PATH").ok().map(PathBuf::from)
}

#[test]
fn loads_full_census_table() {
    let Some(path) = table_path() else {
        eprintln!("skipping: NAM_DICT_PATH not set");
        return;
    };
    let options = LoadOptions {
        mode: LoadMode::Mmap,
        ..LoadOptions::default()
    };
    let index =
        FrequencyIndex::load(&DatasetSource::file(&path), options).expect("load census table");

    assert!(index.name_count() > 40_000, "index too small");
    for name in ["Bob", "Sally", "Jamie", "Álfrún", "Ayşe", "İsmet", "Snæbjörn"] {
        assert!(index.contains(name), "{name} missing");
    }
}
