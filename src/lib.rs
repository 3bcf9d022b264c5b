
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types
pub mod data_types;
/// The RFL dynamic program itself
pub mod distance_engine;
/// Integer keys for short nucleotide sequences
pub mod encoding;
/// Error type for the core library
pub mod errors;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Precomputed stutter tables and the lookup capability over them
pub mod stutter;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
