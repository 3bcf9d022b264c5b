/*!
# Writers module
Contains the logic for writing the output files for the distance and table commands.
*/
/// Generates the per-pair distance file
pub mod distance_writer;
/// Saves precomputed stutter tables as TSV or JSON
pub mod table_writer;
