
use indicatif::ParallelProgressIterator;
use log::{LevelFilter, debug, error, info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use rfl::cli::core::{Commands, get_cli};
use rfl::cli::distance::{DistanceSettings, check_distance_settings};
use rfl::cli::table::{TableSettings, check_table_settings};
use rfl::data_types::cost_model::{CostModel, SymbolPolicy};
use rfl::data_types::motif::Motif;
use rfl::distance_engine::rfl_distance;
use rfl::parsing::cost_config::load_cost_model;
use rfl::parsing::motif_config::load_motifs;
use rfl::parsing::sequence_pairs::{SequencePair, load_sequence_pairs};
use rfl::stutter::builder::{TableConfig, TableConfigBuilder, build_table_set};
use rfl::stutter::table::{LocusTables, StutterTableSet};
use rfl::util::progress_bar::get_progress_style;
use rfl::writers::distance_writer::DistanceWriter;
use rfl::writers::table_writer::write_stutter_tables;

/// Sets up logging, must be called before anything else logs
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Sets the number of threads for rayon, exiting on failure
fn init_thread_pool(threads: usize) {
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };
}

/// Loads the cost model and motif list shared by both subcommands, exiting on failure
fn load_model_inputs(cost_filename: &Path, motif_filename: &Path, policy: SymbolPolicy) -> (CostModel, Vec<Motif>) {
    info!("Loading cost matrix...");
    let costs = match load_cost_model(cost_filename, policy) {
        Ok(c) => c,
        Err(e) => {
            error!("Error while loading cost matrix: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };

    info!("Loading motifs...");
    let motifs = match load_motifs(motif_filename) {
        Ok(m) => m,
        Err(e) => {
            error!("Error while loading motifs: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    let labels: Vec<String> = motifs.iter().map(|m| m.label()).collect();
    info!("Motifs: {labels:?}");

    (costs, motifs)
}

/// Builds every stutter table for the motifs, exiting on failure
fn build_tables(motifs: &[Motif], costs: &CostModel, max_motif_length: usize, threads: usize) -> StutterTableSet {
    let table_config: TableConfig = match TableConfigBuilder::default()
        .max_motif_length(max_motif_length)
        .parallel(threads > 1)
        .build() {
        Ok(tc) => tc,
        Err(e) => {
            error!("Error while building table config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    info!("Building stutter tables...");
    let table_start = Instant::now();
    let table_set = match build_table_set(motifs, costs, table_config) {
        Ok(ts) => ts,
        Err(e) => {
            error!("Error while building stutter tables: {e}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    let total_entries: usize = table_set.iter().map(|t| t.len()).sum();
    info!("Built {} tables with {total_entries} total windows in {} seconds.", table_set.len(), table_start.elapsed().as_secs_f64());
    table_set
}

fn run_distance(settings: DistanceSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_distance_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    init_thread_pool(settings.threads);

    let (costs, motifs) = load_model_inputs(&settings.cost_filename, &settings.motif_filename, settings.symbol_policy());

    info!("Loading sequence pairs...");
    let pairs: Vec<SequencePair> = match load_sequence_pairs(&settings.pairs_filename) {
        Ok(p) => p,
        Err(e) => {
            error!("Error while loading sequence pairs: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Loaded {} sequence pairs.", pairs.len());
    if pairs.is_empty() {
        warn!("No sequence pairs found, output will only contain a header.");
    }

    let table_set = build_tables(&motifs, &costs, settings.max_motif_length, settings.threads);
    let tables = match LocusTables::new(table_set, !settings.disable_fast_path) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while preparing stutter tables: {e}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };
    info!("Distance path: {}", if tables.is_single() { "single motif (encoded)" } else { "multi motif" });

    // run the parallel iterator to solve them
    let style = get_progress_style();
    info!("Computing distances...");
    let mut all_results: Vec<(usize, Option<f64>)> = pairs.par_iter()
        .enumerate()
        .map(|(index, pair)| {
            let distance = match rfl_distance(pair.parent.as_bytes(), pair.child.as_bytes(), &costs, &tables) {
                Ok(d) => Some(d),
                Err(e) => {
                    error!("Error while computing distance for pair {:?}: {e}", pair.pair_id);
                    None
                }
            };
            debug!("{} => {distance:?}", pair.pair_id);
            (index, distance)
        })
        .progress_with_style(style)
        .collect();

    // restore the input order
    all_results.sort_by_key(|(index, _d)| *index);
    info!("Distance computation complete, saving all outputs...");

    info!("Saving distances to {:?}...", settings.output_filename);
    let mut distance_writer = match DistanceWriter::new(&settings.output_filename) {
        Ok(dw) => dw,
        Err(e) => {
            error!("Error while creating distance writer: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    for (index, distance) in all_results.into_iter() {
        if let Err(e) = distance_writer.write_distance(&pairs[index], distance) {
            error!("Error while writing distances: {e}");
            std::process::exit(exitcode::IOERR);
        }
    }
    let (solved, failed) = (distance_writer.solved(), distance_writer.failed());
    if let Err(e) = distance_writer.finish() {
        error!("Error while saving distances: {e:#}");
        std::process::exit(exitcode::IOERR);
    }
    info!("Solved:error pairs: {solved} : {failed}");

    if failed > 0 {
        error!("{failed} pairs could not be scored, see the errors above.");
        std::process::exit(exitcode::DATAERR);
    }
    info!("Distances completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_table(settings: TableSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    init_logging(settings.verbosity);

    let settings = match check_table_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };
    init_thread_pool(settings.threads);

    let (costs, motifs) = load_model_inputs(&settings.cost_filename, &settings.motif_filename, settings.symbol_policy());
    let table_set = build_tables(&motifs, &costs, settings.max_motif_length, settings.threads);

    info!("Saving stutter tables to {:?}...", settings.output_filename);
    if let Err(e) = write_stutter_tables(&table_set, &settings.output_filename) {
        error!("Error while saving stutter tables: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Tables completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Distance(settings) => {
            run_distance(*settings);
        },
        Commands::Table(settings) => {
            run_table(*settings);
        }
    }

    info!("Process finished successfully.");
}
