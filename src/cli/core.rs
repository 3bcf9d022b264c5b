
use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::distance::DistanceSettings;
use crate::cli::table::TableSettings;
use crate::stutter::builder::DEFAULT_MAX_MOTIF_LENGTH;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string containing the legalese.
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2023-{}     The RFL developers
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
Research Use Only and not for use in diagnostic procedures.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about,
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// RFL, a stutter-aware quasi-distance between STR alleles.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Computes the RFL distance for each parent/child pair in a TSV
    Distance(Box<DistanceSettings>),
    /// Builds the stutter tables for a set of motifs and saves them
    Table(Box<TableSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}

/// Checks that the requested motif bound keeps every table window encodable
/// # Arguments
/// * `max_motif_length` - the user provided bound
pub fn check_max_motif_length(max_motif_length: usize) -> anyhow::Result<()> {
    if !(1..=DEFAULT_MAX_MOTIF_LENGTH).contains(&max_motif_length) {
        bail!("--max-motif-length must be between 1 and {DEFAULT_MAX_MOTIF_LENGTH}, found {max_motif_length}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_check_required_filename() {
        assert!(check_required_filename(&PathBuf::from("test_data/costs/unit.tsv"), "Costs").is_ok());
        let err = check_required_filename(&PathBuf::from("test_data/costs/missing.tsv"), "Costs").unwrap_err();
        assert_eq!(format!("{err}"), "Costs does not exist: \"test_data/costs/missing.tsv\"");
    }

    #[test]
    fn test_check_max_motif_length() {
        assert!(check_max_motif_length(0).is_err());
        assert!(check_max_motif_length(1).is_ok());
        assert!(check_max_motif_length(5).is_ok());
        assert!(check_max_motif_length(6).is_err());
    }
}
