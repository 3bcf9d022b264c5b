
use anyhow::Context;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::stutter::table::{StutterEntry, StutterTableSet};
use crate::util::json_io::{is_json_path, save_json};

/// JSON layout for a single motif's table
#[derive(Serialize)]
struct TableDump {
    motif: String,
    forward_base_cost: f64,
    backward_base_cost: f64,
    entries: Vec<StutterEntry>
}

/// Writes every table in a set to a single file.
/// Paths ending in ".json" or ".json.gz" get one JSON object per motif; anything else is written as a TSV with one row per window.
/// Either way, ".gz" enables compression.
/// # Arguments
/// * `table_set` - the tables to save, written in motif order
/// * `filename` - the output path
/// # Errors
/// * if the file cannot be created or written to
pub fn write_stutter_tables(table_set: &StutterTableSet, filename: &Path) -> anyhow::Result<()> {
    if is_json_path(filename) {
        let dumps: Vec<TableDump> = table_set.iter()
            .map(|table| {
                let motif = table.motif();
                TableDump {
                    motif: motif.label(),
                    forward_base_cost: motif.forward_cost(),
                    backward_base_cost: motif.backward_cost(),
                    entries: table.entries()
                }
            })
            .collect();
        return save_json(&dumps, filename);
    }

    let file = File::create(filename)
        .with_context(|| format!("Error while creating {filename:?}:"))?;
    let writer: Box<dyn Write> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(GzEncoder::new(file, flate2::Compression::default()))
    } else {
        Box::new(file)
    };
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    for table in table_set.iter() {
        for entry in table.entries() {
            csv_writer.serialize(&entry)
                .with_context(|| format!("Error while writing to {filename:?}:"))?;
        }
    }
    csv_writer.flush()
        .with_context(|| format!("Error while flushing output to {filename:?}:"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data_types::cost_model::CostModel;
    use crate::data_types::motif::Motif;
    use crate::stutter::builder::{build_table_set, expected_table_size, TableConfig};

    fn small_set() -> StutterTableSet {
        let costs = CostModel::uniform(1.0, 1.0, 1.0).unwrap();
        let motifs = vec![Motif::new(b"A", 0.5, 0.25).unwrap(), Motif::new(b"AC", 0.5, 0.5).unwrap()];
        build_table_set(&motifs, &costs, TableConfig::default()).unwrap()
    }

    #[test]
    fn test_write_tsv() {
        let filename = std::env::temp_dir().join(format!("rfl_{}_tables.tsv", std::process::id()));
        write_stutter_tables(&small_set(), &filename).unwrap();

        let contents = std::fs::read_to_string(&filename).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1 + expected_table_size(1) + expected_table_size(2));
        assert_eq!(lines[0], "motif\tsequence\tlength\tforward_cost\tbackward_cost");
        assert_eq!(lines[1], "A\tA\t1\t0.5\t0.25");
        assert_eq!(lines[2], "A\tC\t1\t1.5\t1.25");
        assert_eq!(lines[5], "AC\tA\t1\t1.5\t1.5");
        std::fs::remove_file(&filename).unwrap();
    }

    #[test]
    fn test_write_json() {
        let filename = std::env::temp_dir().join(format!("rfl_{}_tables.json", std::process::id()));
        write_stutter_tables(&small_set(), &filename).unwrap();

        let contents = std::fs::read_to_string(&filename).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        let dumps = parsed.as_array().unwrap();
        assert_eq!(dumps.len(), 2);
        assert_eq!(dumps[0]["motif"], "A");
        assert_eq!(dumps[0]["backward_base_cost"], 0.25);
        assert_eq!(dumps[1]["entries"].as_array().unwrap().len(), expected_table_size(2));
        assert_eq!(dumps[1]["entries"][0]["sequence"], "A");
        std::fs::remove_file(&filename).unwrap();
    }
}
