
/// Errors raised by the core RFL library.
/// Configuration problems surface when a model or table is constructed, sequence problems surface per query.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RflError {
    #[error("invalid cost for {from:?} -> {to:?}: {reason}")]
    InvalidCostSpecification { from: String, to: String, reason: String },
    #[error("unsupported symbol {symbol:?} at position {position}")]
    UnsupportedSymbol { symbol: char, position: usize },
    #[error("cannot encode a sequence of length {length}, maximum is {max_length}")]
    EncodingOverflow { length: usize, max_length: usize },
    #[error("{key} is not a valid encoded sequence key")]
    InvalidEncodedKey { key: u64 },
    #[error("motif must be non-empty")]
    EmptyMotif,
    #[error("motif length {length} exceeds the configured maximum of {max_length}")]
    MotifTooLong { length: usize, max_length: usize },
    #[error("stutter cost for motif {motif} must be finite and >= 0, found {cost}")]
    InvalidStutterCost { motif: String, cost: f64 },
}
