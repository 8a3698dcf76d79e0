//! Popcount table command implementation

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use succinct_bits::{
    PopcountTable, PopcountTableConfig,
    dump::{self, DumpMode},
};

use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableMode {
    /// One line per pattern with its decimal index
    Counts,
    /// Raw packed storage, bit by bit
    Bits,
    /// One line per pattern written in binary
    Patterns,
}

impl From<TableMode> for DumpMode {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Counts => DumpMode::Counts,
            TableMode::Bits => DumpMode::Bits,
            TableMode::Patterns => DumpMode::Patterns,
        }
    }
}

#[derive(Serialize)]
struct PopcountTableSummary {
    pattern_width: usize,
    entries: usize,
    words: usize,
    heap_size_bytes: usize,
    counts: Vec<u64>,
}

pub fn run(
    width: Option<usize>,
    config_path: Option<String>,
    mode: TableMode,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => load_config(&path)?,
        None => PopcountTableConfig::default(),
    };
    if let Some(width) = width {
        config.pattern_width = width;
    }

    let table = PopcountTable::with_config(&config)
        .with_context(|| format!("Failed to build popcount table for {config:?}"))?;

    if json {
        let summary = summarize(&table);
        let text = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize table summary to JSON")?;
        println!("{text}");
    } else {
        print!("{}", dump::render_popcount_table(&table, mode.into()));
        println!(
            "{} entries of {} bits, {}",
            table.len(),
            table.pattern_width(),
            utils::describe_storage(table.as_packed_array())
        );
    }
    Ok(())
}

fn load_config(path: &str) -> Result<PopcountTableConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse config file: {path}"))
}

fn summarize(table: &PopcountTable<'_>) -> PopcountTableSummary {
    let array = table.as_packed_array();
    PopcountTableSummary {
        pattern_width: table.pattern_width(),
        entries: table.len(),
        words: array.num_words(),
        heap_size_bytes: array.heap_size_bytes(),
        counts: array.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let table = PopcountTable::new(2).unwrap();
        let summary = summarize(&table);
        assert_eq!(summary.entries, 4);
        assert_eq!(summary.words, 1);
        assert_eq!(summary.heap_size_bytes, 8);
        assert_eq!(summary.counts, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ptable.json");
        std::fs::write(&path, r#"{"pattern_width": 4, "max_pattern_width": 6}"#).unwrap();
        let config = load_config(path.to_str().unwrap()).unwrap();
        assert_eq!(
            config,
            PopcountTableConfig {
                pattern_width: 4,
                max_pattern_width: 6
            }
        );

        std::fs::write(&path, "not json").unwrap();
        assert!(load_config(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_config_reports_unreadable_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_config(missing.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));

        let err = load_config(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
    }
}
