
use anyhow::{bail, Context};
use log::debug;
use rustc_hash::FxHashSet as HashSet;
use std::path::Path;

use crate::data_types::motif::{Motif, MotifRecord};

/// Loads the motifs for a locus from a TSV with a `motif`, `forward_cost`, and `backward_cost` header.
/// Order is preserved, which also determines the output order of any tables built from them.
/// # Arguments
/// * `filename` - the TSV file to parse
/// # Errors
/// * if the file cannot be opened or a row fails to deserialize
/// * if a motif is invalid or appears more than once
/// * if the file contains no motifs
pub fn load_motifs(filename: &Path) -> anyhow::Result<Vec<Motif>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut motifs: Vec<Motif> = vec![];
    let mut observed: HashSet<String> = Default::default();
    for result in csv_reader.deserialize() {
        let record: MotifRecord = result.with_context(|| format!("Error while reading {filename:?}:"))?;
        if !observed.insert(record.motif.clone()) {
            bail!("Duplicate motif found: {}", record.motif);
        }

        let label = record.motif.clone();
        let motif: Motif = record.try_into()
            .with_context(|| format!("Error while parsing motif {label:?}:"))?;
        motifs.push(motif);
    }

    if motifs.is_empty() {
        bail!("No motifs found in {filename:?}");
    }
    debug!("Loaded {} motifs from {filename:?}", motifs.len());
    Ok(motifs)
}
