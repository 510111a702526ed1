use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use namegender_db::{DatasetSource, FrequencyIndex, LoadOptions};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let table = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p namegender-db --example stats -- <nam_dict.txt.gz> [name...]")?;

    let index = FrequencyIndex::load(&DatasetSource::file(&table), LoadOptions::default())
        .with_context(|| format!("loading census table from {}", table.display()))?;

    println!("Table  : {}", table.display());
    println!("Records: {}", index.record_count());
    println!("Names  : {}", index.name_count());

    let mut multi_label = 0usize;
    let mut zero_evidence = 0usize;
    for name in index.names() {
        if let Some(entry) = index.get(name) {
            if entry.labels().len() > 1 {
                multi_label += 1;
            }
            if entry.labels().iter().all(|(_, freq)| freq.total() == 0) {
                zero_evidence += 1;
            }
        }
    }
    println!("Names with several labels: {}", multi_label);
    println!("Names without any counts : {}", zero_evidence);

    // Dump a few names to eyeball the per-country columns.
    let requested: Vec<String> = args.collect();
    let names = if requested.is_empty() {
        vec!["Jamie".to_string(), "Maria".to_string()]
    } else {
        requested
    };
    for name in names {
        match index.dump(&name) {
            Some(report) => print!("\n{name}\n{report}"),
            None => println!("\n{name}: not in table"),
        }
    }

    Ok(())
}
