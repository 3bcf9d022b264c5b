
use anyhow::Context;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::parsing::sequence_pairs::SequencePair;

/// Writes one distance row per parent/child pair.
/// Output is tab-delimited unless the file ends in ".csv", and gzipped when it ends in ".gz".
pub struct DistanceWriter {
    /// Handle on the writer
    csv_writer: csv::Writer<Box<dyn Write>>,
    /// Number of rows written with a distance
    solved: usize,
    /// Number of rows written without one
    failed: usize
}

/// Contains all the data written to each row of the distance file
#[derive(Serialize)]
struct DistanceRow<'a> {
    pair_id: &'a str,
    parent: &'a str,
    child: &'a str,
    /// Empty when the pair could not be scored
    distance: Option<f64>
}

impl DistanceWriter {
    /// Creates a new writer and the underlying file.
    /// # Arguments
    /// * `filename` - the output path; ".csv" switches to commas and ".gz" enables compression
    pub fn new(filename: &Path) -> anyhow::Result<Self> {
        let file = File::create(filename)
            .with_context(|| format!("Error while creating {filename:?}:"))?;
        let name = filename.to_string_lossy();
        let (stem, is_gzip) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (&*name, false)
        };
        let delimiter: u8 = if stem.ends_with(".csv") { b',' } else { b'\t' };

        let writer: Box<dyn Write> = if is_gzip {
            Box::new(GzEncoder::new(file, flate2::Compression::default()))
        } else {
            Box::new(file)
        };
        let csv_writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        Ok(Self {
            csv_writer,
            solved: 0,
            failed: 0
        })
    }

    /// Writes the result for a single pair
    /// # Arguments
    /// * `pair` - the pair that was compared
    /// * `distance` - the RFL distance, or None if it could not be computed
    pub fn write_distance(&mut self, pair: &SequencePair, distance: Option<f64>) -> csv::Result<()> {
        let row = DistanceRow {
            pair_id: &pair.pair_id,
            parent: &pair.parent,
            child: &pair.child,
            distance
        };
        self.csv_writer.serialize(&row)?;
        if distance.is_some() {
            self.solved += 1;
        } else {
            self.failed += 1;
        }
        Ok(())
    }

    /// Flushes everything to disk, consuming the writer
    pub fn finish(mut self) -> anyhow::Result<()> {
        self.csv_writer.flush()
            .context("Error while flushing distance output:")?;
        Ok(())
    }

    // getters
    pub fn solved(&self) -> usize {
        self.solved
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}
