/*!
# Parsing module
Contains the logic for parsing input files into meaningful structs / data.
*/
/// Parser for the tab-separated cost matrix
pub mod cost_config;
/// Parser for the motif list at a locus
pub mod motif_config;
/// Parser for the parent/child allele pairs to compare
pub mod sequence_pairs;
