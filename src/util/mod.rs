
/// Helper functions for writing JSON via serde
pub mod json_io;
/// Helper functions for generating the progress bars
pub mod progress_bar;
/// Weighted edit distance between two sequences
pub mod sequence_alignment;
