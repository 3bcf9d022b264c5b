
/// Per-character insertion, deletion, and substitution costs
pub mod cost_model;
/// Repeat units with their stutter base costs
pub mod motif;
/// The {A,C,G,T} alphabet and sequence validation
pub mod nucleotide;
