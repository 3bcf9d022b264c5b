
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
pub struct DistanceSettings {
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

    /// Repeat motifs for the locus with their stutter base costs
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "motifs")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub motif_filename: PathBuf,

    /// Parent/child allele pairs to compare
    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "pairs")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub pairs_filename: PathBuf,

    /// Output distance file (.tsv, .csv, optionally .gz)
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Fills missing costs and out-of-alphabet symbols with a cost of 1 instead of failing
    #[clap(long = "lenient")]
    #[clap(help_heading = Some("Distance parameters"))]
    pub lenient: bool,

    /// Maximum allowed motif length
    #[clap(long = "max-motif-length")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Distance parameters"))]
    #[clap(default_value_t = DEFAULT_MAX_MOTIF_LENGTH)]
    pub max_motif_length: usize,

    /// Disables the integer-keyed lookup used when there is a single motif
    #[clap(long = "disable-fast-path")]
    #[clap(help_heading = Some("Distance parameters"))]
    pub disable_fast_path: bool,

    /// Number of threads to use for table building and distance computation
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

impl DistanceSettings {
    pub fn symbol_policy(&self) -> SymbolPolicy {
        if self.lenient { SymbolPolicy::Lenient } else { SymbolPolicy::Strict }
    }
}

pub fn check_distance_settings(mut settings: DistanceSettings) -> anyhow::Result<DistanceSettings> {
    // hard code the version in
    settings.rfl_version = FULL_VERSION.clone();
    info!("RFL version: {:?}", &settings.rfl_version);
    info!("Sub-command: distance");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.cost_filename, "Cost matrix")?;
    check_required_filename(&settings.motif_filename, "Motif file")?;
    check_required_filename(&settings.pairs_filename, "Pairs file")?;

    // dump stuff to the logger
    info!("\tCosts: {:?}", &settings.cost_filename);
    info!("\tMotifs: {:?}", &settings.motif_filename);
    info!("\tPairs: {:?}", &settings.pairs_filename);

    // outputs
    info!("Outputs:");
    info!("\tDistances: {:?}", &settings.output_filename);

    info!("Distance parameters:");
    info!("\tSymbol policy: {:?}", settings.symbol_policy());
    check_max_motif_length(settings.max_motif_length)?;
    info!("\tMaximum motif length: {}", settings.max_motif_length);
    info!("\tSingle motif fast path: {}", if settings.disable_fast_path { "DISABLED" } else { "ENABLED" });

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> DistanceSettings {
        DistanceSettings {
            cost_filename: PathBuf::from("test_data/costs/unit.tsv"),
            motif_filename: PathBuf::from("test_data/motifs/cag.tsv"),
            pairs_filename: PathBuf::from("test_data/pairs/cag_pairs.tsv"),
            output_filename: PathBuf::from("distances.tsv"),
            max_motif_length: DEFAULT_MAX_MOTIF_LENGTH,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        let settings = check_distance_settings(valid_settings()).unwrap();
        assert_eq!(settings.rfl_version, *FULL_VERSION);
        // 0 threads gets bumped to 1
        assert_eq!(settings.threads, 1);
        assert_eq!(settings.symbol_policy(), SymbolPolicy::Strict);

        let settings = DistanceSettings { lenient: true, ..valid_settings() };
        assert_eq!(settings.symbol_policy(), SymbolPolicy::Lenient);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = DistanceSettings { pairs_filename: PathBuf::from("test_data/pairs/missing.tsv"), ..valid_settings() };
        assert!(check_distance_settings(settings).is_err());

        let settings = DistanceSettings { max_motif_length: 6, ..valid_settings() };
        assert!(check_distance_settings(settings).is_err());
    }
}
