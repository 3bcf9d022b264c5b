
use serde::Serialize;

use crate::data_types::nucleotide::{validate_sequence, Nucleotide};
use crate::errors::RflError;

/// Number of rows/columns in a cost matrix: the empty symbol plus A, C, G, T
pub const NUM_SYMBOLS: usize = 5;
/// Matrix index of the empty symbol
pub const EMPTY_SYMBOL: usize = 0;
/// Cost used for unspecified entries and out-of-alphabet bytes under `SymbolPolicy::Lenient`
pub const DEFAULT_COST: f64 = 1.0;

/// Raw cost entries indexed by `[source][target]`, where index 0 is the empty symbol and 1-4 are A, C, G, T.
/// `None` marks an entry that was not provided. Diagonal entries are never read.
pub type CostEntries = [[Option<f64>; NUM_SYMBOLS]; NUM_SYMBOLS];

/// Controls how unspecified costs and out-of-alphabet symbols are handled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum SymbolPolicy {
    /// Missing cost entries and non-ACGT sequence symbols are errors
    #[default]
    Strict,
    /// Missing cost entries and non-ACGT sequence symbols fall back to `DEFAULT_COST`
    Lenient
}

/// Per-character insertion, deletion, and substitution costs over {A,C,G,T}.
/// Immutable once constructed; share it by reference between table building and distance queries.
/// Costs are directed, so `cost(A, C)` may differ from `cost(C, A)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CostModel {
    /// Fully populated cost matrix, `[source][target]`
    costs: [[f64; NUM_SYMBOLS]; NUM_SYMBOLS],
    /// How this model was populated and how it treats unknown symbols
    policy: SymbolPolicy
}

impl CostModel {
    /// Creates a cost model from a partially or fully specified set of entries.
    /// # Arguments
    /// * `entries` - the raw entries, `[source][target]` with index 0 as the empty symbol
    /// * `policy` - determines whether missing entries are errors or default to `DEFAULT_COST`
    /// # Errors
    /// * if any off-diagonal entry is negative or not finite
    /// * if any off-diagonal entry is missing and `policy` is `SymbolPolicy::Strict`
    pub fn from_entries(entries: &CostEntries, policy: SymbolPolicy) -> Result<Self, RflError> {
        let mut costs = [[0.0; NUM_SYMBOLS]; NUM_SYMBOLS];
        for (source, row) in entries.iter().enumerate() {
            for (target, &entry) in row.iter().enumerate() {
                if source == target {
                    // identity (and empty-to-empty) is always free
                    continue;
                }

                costs[source][target] = match entry {
                    Some(value) if !value.is_finite() || value < 0.0 => {
                        return Err(invalid_cost(source, target, format!("cost must be finite and >= 0, found {value}")));
                    },
                    Some(value) => value,
                    None => match policy {
                        SymbolPolicy::Strict => {
                            return Err(invalid_cost(source, target, "missing cost entry".to_string()));
                        },
                        SymbolPolicy::Lenient => DEFAULT_COST
                    }
                };
            }
        }

        Ok(Self {
            costs,
            policy
        })
    }

    /// Convenience constructor where every insertion, deletion, and substitution shares a single value.
    /// # Errors
    /// * if any of the costs is negative or not finite
    pub fn uniform(insertion: f64, deletion: f64, substitution: f64) -> Result<Self, RflError> {
        let mut entries: CostEntries = [[None; NUM_SYMBOLS]; NUM_SYMBOLS];
        for (source, row) in entries.iter_mut().enumerate() {
            for (target, entry) in row.iter_mut().enumerate() {
                *entry = Some(if source == EMPTY_SYMBOL {
                    insertion
                } else if target == EMPTY_SYMBOL {
                    deletion
                } else {
                    substitution
                });
            }
        }
        Self::from_entries(&entries, SymbolPolicy::Strict)
    }

    /// Returns the cost of changing `source` into `target`, where `None` is the empty symbol.
    /// Returns None when both sides are empty since that is not an edit.
    pub fn cost(&self, source: Option<Nucleotide>, target: Option<Nucleotide>) -> Option<f64> {
        let s = source.map(|n| n.digit() as usize).unwrap_or(EMPTY_SYMBOL);
        let t = target.map(|n| n.digit() as usize).unwrap_or(EMPTY_SYMBOL);
        match (source, target) {
            (None, None) => None,
            _ => Some(self.costs[s][t])
        }
    }

    /// Cost of inserting the ASCII symbol `b`
    #[inline]
    pub fn insertion_cost(&self, b: u8) -> f64 {
        match byte_index(b) {
            Some(i) => self.costs[EMPTY_SYMBOL][i],
            None => DEFAULT_COST
        }
    }

    /// Cost of deleting the ASCII symbol `b`
    #[inline]
    pub fn deletion_cost(&self, b: u8) -> f64 {
        match byte_index(b) {
            Some(i) => self.costs[i][EMPTY_SYMBOL],
            None => DEFAULT_COST
        }
    }

    /// Cost of substituting `source` with `target`; identical bytes are always free
    #[inline]
    pub fn substitution_cost(&self, source: u8, target: u8) -> f64 {
        if source == target {
            return 0.0;
        }
        match (byte_index(source), byte_index(target)) {
            (Some(s), Some(t)) => self.costs[s][t],
            _ => DEFAULT_COST
        }
    }

    /// Checks that a sequence is usable with this model.
    /// Under `SymbolPolicy::Lenient` every sequence is accepted.
    /// # Errors
    /// * if the policy is strict and the sequence contains a non-ACGT byte
    pub fn check_sequence(&self, sequence: &[u8]) -> Result<(), RflError> {
        match self.policy {
            SymbolPolicy::Strict => validate_sequence(sequence),
            SymbolPolicy::Lenient => Ok(())
        }
    }

    pub fn policy(&self) -> SymbolPolicy {
        self.policy
    }
}

#[inline]
fn byte_index(b: u8) -> Option<usize> {
    Nucleotide::from_byte(b).map(|n| n.digit() as usize)
}

/// Label for a matrix index, using "-" for the empty symbol
pub fn symbol_label(index: usize) -> String {
    match Nucleotide::from_digit(index as u8) {
        Some(n) => n.to_string(),
        None => "-".to_string()
    }
}

fn invalid_cost(source: usize, target: usize, reason: String) -> RflError {
    RflError::InvalidCostSpecification {
        from: symbol_label(source),
        to: symbol_label(target),
        reason
    }
}
