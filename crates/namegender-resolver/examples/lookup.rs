use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use namegender_db::{DatasetSource, LoadOptions};
use namegender_resolver::Detector;

const USAGE: &str =
    "usage: cargo run -p namegender-resolver --example lookup -- <table> [--strict] <name> [country]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let table = args.next().map(PathBuf::from).context(USAGE)?;

    let mut strict = false;
    let mut rest = Vec::new();
    for arg in args {
        if arg == "--strict" {
            strict = true;
        } else {
            rest.push(arg);
        }
    }
    let (name, country) = match rest.as_slice() {
        [name] => (name.as_str(), None),
        [name, country] => (name.as_str(), Some(country.as_str())),
        _ => bail!(USAGE),
    };

    let detector = Detector::new(DatasetSource::file(&table), LoadOptions::default());
    let label = detector
        .get_gender(name, country, strict)
        .with_context(|| format!("resolving {name}"))?;

    println!("{name}: {label} ({})", label.code());
    if let Some(report) = detector.dump_name(name)? {
        print!("{report}");
    }
    Ok(())
}
