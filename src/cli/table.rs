
use clap::Args;
use log::info;
use std::path::PathBuf;

use crate::cli::core::{check_max_motif_length, check_required_filename, AFTER_HELP, FULL_VERSION};
use crate::data_types::cost_model::SymbolPolicy;
use crate::stutter::builder::DEFAULT_MAX_MOTIF_LENGTH;

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct TableSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    rfl_version: String,

    /// Cost matrix for insertions, deletions, and substitutions
    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "costs")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub cost_filename: PathBuf,

    /// Repeat motifs to build tables for, with their stutter base costs
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub motif_filename: PathBuf,

    /// Output table file (.tsv or .json, optionally .gz)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Fills missing costs with a cost of 1 instead of failing
    #[clap(long = "lenient")]
    #[clap(help_heading = Some("Table parameters"))]
    pub lenient: bool,

    /// Maximum allowed motif length
    #[clap(long = "max-motif-length")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Table parameters"))]
    #[clap(default_value_t = DEFAULT_MAX_MOTIF_LENGTH)]
    pub max_motif_length: usize,

    /// Number of threads to use for table building
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl TableSettings {
    pub fn symbol_policy(&self) -> SymbolPolicy {
        if self.lenient { SymbolPolicy::Lenient } else { SymbolPolicy::Strict }
    }
}

pub fn check_table_settings(mut settings: TableSettings) -> anyhow::Result<TableSettings> {
    // hard code the version in
    settings.rfl_version = FULL_VERSION.clone();
    info!("RFL version: {:?}", &settings.rfl_version);
    info!("Sub-command: table");
    info!("Inputs:");

    check_required_filename(&settings.cost_filename, "Cost matrix")?;
    check_required_filename(&settings.motif_filename, "Motif file")?;
    info!("\tCosts: {:?}", &settings.cost_filename);
    info!("\tMotifs: {:?}", &settings.motif_filename);

    info!("Outputs:");
    info!("\tTables: {:?}", &settings.output_filename);

    info!("Table parameters:");
    info!("\tSymbol policy: {:?}", settings.symbol_policy());
    check_max_motif_length(settings.max_motif_length)?;
    info!("\tMaximum motif length: {}", settings.max_motif_length);

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_table_settings() {
        let settings = TableSettings {
            cost_filename: PathBuf::from("test_data/costs/partial.tsv"),
            motif_filename: PathBuf::from("test_data/motifs/compound.tsv"),
            output_filename: PathBuf::from("tables.json"),
            lenient: true,
            max_motif_length: 4,
            threads: 3,
            ..Default::default()
        };
        let settings = check_table_settings(settings).unwrap();
        assert_eq!(settings.threads, 3);
        assert_eq!(settings.symbol_policy(), SymbolPolicy::Lenient);

        let settings = TableSettings { max_motif_length: 0, ..settings };
        assert!(check_table_settings(settings).is_err());
    }
}
