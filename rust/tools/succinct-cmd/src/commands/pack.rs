//! Pack command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use succinct_bits::{BitPackedArray, dump};

use crate::utils;

#[derive(Serialize)]
struct PackSummary {
    field_width: usize,
    capacity: usize,
    words: Vec<String>,
    values: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rejected: Vec<usize>,
}

pub fn run(
    width: usize,
    capacity: Option<usize>,
    values: Vec<u64>,
    verbose: bool,
    json: bool,
) -> Result<()> {
    let capacity = capacity.unwrap_or(values.len());
    let (array, rejected) = pack(width, capacity, &values)?;

    if json {
        let summary = PackSummary {
            field_width: array.field_width(),
            capacity: array.capacity(),
            words: array.words().iter().map(|w| format!("{w:#018x}")).collect(),
            values: array.iter().collect(),
            rejected,
        };
        let text = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize pack summary to JSON")?;
        println!("{text}");
        return Ok(());
    }

    for index in &rejected {
        eprintln!("Index {index} is outside capacity {capacity}, value ignored");
    }
    print!("{}", dump::render_packed_array(&array));
    if verbose {
        println!("{}", utils::describe_storage(&array));
        for (i, &word) in array.words().iter().enumerate() {
            println!("{}", dump::render_word(&format!("word[{i}]"), word));
        }
    }
    for (index, value) in array.iter().enumerate() {
        println!("get({index}) = {value}");
    }
    Ok(())
}

/// Writes `values` at consecutive indices of a new array, returning the array
/// and the indices whose writes were rejected.
fn pack(
    width: usize,
    capacity: usize,
    values: &[u64],
) -> Result<(BitPackedArray<'static>, Vec<usize>)> {
    let mut array = BitPackedArray::new(width, capacity)
        .with_context(|| format!("Failed to create array of {capacity} x {width} bits"))?;
    let rejected = values
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| (!array.write(index, value)).then_some(index))
        .collect();
    Ok((array, rejected))
}
