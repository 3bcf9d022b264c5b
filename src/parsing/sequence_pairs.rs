
use anyhow::{bail, Context};
use log::debug;
use rustc_hash::FxHashSet as HashSet;
use serde::Deserialize;
use std::path::Path;

/// A single parent/child allele comparison
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct SequencePair {
    /// User label for the pair, must be unique within a file
    pub pair_id: String,
    /// The allele being edited from
    pub parent: String,
    /// The allele being edited towards
    pub child: String
}

impl SequencePair {
    pub fn new(pair_id: &str, parent: &str, child: &str) -> Self {
        Self {
            pair_id: pair_id.to_string(),
            parent: parent.to_string(),
            child: child.to_string()
        }
    }
}

/// Loads parent/child pairs from a TSV with a `pair_id`, `parent`, and `child` header.
/// Sequences are kept as-is; symbol checks happen when the distance is computed.
/// # Arguments
/// * `filename` - the TSV file to parse
/// # Errors
/// * if the file cannot be opened or a row fails to deserialize
/// * if a pair ID appears more than once
pub fn load_sequence_pairs(filename: &Path) -> anyhow::Result<Vec<SequencePair>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut pairs: Vec<SequencePair> = vec![];
    let mut observed: HashSet<String> = Default::default();
    for result in csv_reader.deserialize() {
        let pair: SequencePair = result.with_context(|| format!("Error while reading {filename:?}:"))?;
        if !observed.insert(pair.pair_id.clone()) {
            bail!("Duplicate pair_id found: {}", pair.pair_id);
        }
        pairs.push(pair);
    }
    debug!("Loaded {} sequence pairs from {filename:?}", pairs.len());
    Ok(pairs)
}
