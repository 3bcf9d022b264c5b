
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

use crate::data_types::motif::Motif;
use crate::encoding::{encode, MAX_ENCODED_LENGTH};
use crate::errors::RflError;
use crate::stutter::lookup::StutterDirection;

/// Forward and backward stutter costs for every window of length `1..=2k-1` over {A,C,G,T}, keyed by the window itself.
/// Built once per motif by `build_stutter_table(...)` and immutable afterwards.
#[derive(Clone, Debug)]
pub struct StutterTable {
    /// The motif this table was built for
    motif: Motif,
    /// Cost of the motif stutter-expanding into the key
    forward: HashMap<Vec<u8>, f64>,
    /// Cost of the key contracting back into a stutter of the motif
    backward: HashMap<Vec<u8>, f64>
}

impl StutterTable {
    pub(crate) fn new(motif: Motif, forward: HashMap<Vec<u8>, f64>, backward: HashMap<Vec<u8>, f64>) -> Self {
        Self {
            motif, forward, backward
        }
    }

    /// Returns the cost for a window in the given direction, None if the window is not covered.
    pub fn get(&self, direction: StutterDirection, window: &[u8]) -> Option<f64> {
        match direction {
            StutterDirection::Forward => self.forward.get(window).copied(),
            StutterDirection::Backward => self.backward.get(window).copied()
        }
    }

    pub fn forward_cost(&self, window: &[u8]) -> Option<f64> {
        self.get(StutterDirection::Forward, window)
    }

    pub fn backward_cost(&self, window: &[u8]) -> Option<f64> {
        self.get(StutterDirection::Backward, window)
    }

    /// Converts this table into the integer-keyed form used by the single-motif path.
    /// # Errors
    /// * if the table covers windows longer than `MAX_ENCODED_LENGTH`
    pub fn to_encoded(&self) -> Result<EncodedStutterTable, RflError> {
        let peek = self.motif.peek();
        if peek > MAX_ENCODED_LENGTH {
            return Err(RflError::EncodingOverflow {
                length: peek,
                max_length: MAX_ENCODED_LENGTH
            });
        }

        let forward = encode_keys(&self.forward)?;
        let backward = encode_keys(&self.backward)?;
        debug!("Encoded stutter table for {} with {} keys", self.motif.label(), forward.len());
        Ok(EncodedStutterTable {
            motif: self.motif.clone(),
            forward,
            backward
        })
    }

    /// Flattens the table into rows, ordered by window length and then alphabetically.
    pub fn entries(&self) -> Vec<StutterEntry> {
        let motif = self.motif.label();
        self.forward.iter()
            .sorted_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .map(|(window, &forward_cost)| {
                StutterEntry {
                    motif: motif.clone(),
                    sequence: String::from_utf8_lossy(window).into_owned(),
                    length: window.len(),
                    forward_cost,
                    // both maps share one key set
                    backward_cost: self.backward.get(window).copied().unwrap_or(f64::NAN)
                }
            })
            .collect()
    }

    // getters
    pub fn motif(&self) -> &Motif {
        &self.motif
    }

    /// Number of windows covered (identical for both directions)
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

fn encode_keys(costs: &HashMap<Vec<u8>, f64>) -> Result<HashMap<u64, f64>, RflError> {
    costs.iter()
        .map(|(window, &cost)| Ok((encode(window)?, cost)))
        .collect()
}

/// Same content as a `StutterTable`, but keyed by `encoding::encode(window)`.
/// This is the single-motif fast path, no window strings get built during lookup.
#[derive(Clone, Debug)]
pub struct EncodedStutterTable {
    /// The motif this table was built for
    motif: Motif,
    /// Encoded window -> forward stutter cost
    forward: HashMap<u64, f64>,
    /// Encoded window -> backward stutter cost
    backward: HashMap<u64, f64>
}

impl EncodedStutterTable {
    /// Returns the cost for an encoded window in the given direction
    #[inline]
    pub fn get(&self, direction: StutterDirection, key: u64) -> Option<f64> {
        match direction {
            StutterDirection::Forward => self.forward.get(&key).copied(),
            StutterDirection::Backward => self.backward.get(&key).copied()
        }
    }

    pub fn motif(&self) -> &Motif {
        &self.motif
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// One row of a flattened stutter table, used for outputs
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StutterEntry {
    /// The motif the table was built for
    pub motif: String,
    /// The window being priced
    pub sequence: String,
    /// Length of the window
    pub length: usize,
    /// Forward (expansion) stutter cost
    pub forward_cost: f64,
    /// Backward (contraction) stutter cost
    pub backward_cost: f64
}

/// A collection of stutter tables for a locus with more than one candidate motif.
/// Motifs keep their insertion order; the look-back bound is set by the longest motif.
#[derive(Clone, Debug, Default)]
pub struct StutterTableSet {
    /// Motif sequence -> table
    tables: IndexMap<Vec<u8>, StutterTable>,
    /// Longest window over all tables
    peek: usize
}

impl StutterTableSet {
    /// Constructor; a later table for the same motif replaces the earlier one
    pub fn new(tables: Vec<StutterTable>) -> Self {
        let peek = tables.iter()
            .map(|t| t.motif().peek())
            .max()
            .unwrap_or(0);
        let tables = tables.into_iter()
            .map(|t| (t.motif().sequence().to_vec(), t))
            .collect();
        Self {
            tables,
            peek
        }
    }

    /// Returns the table for a given motif sequence, if we have one
    pub fn get(&self, motif: &[u8]) -> Option<&StutterTable> {
        self.tables.get(motif)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StutterTable> {
        self.tables.values()
    }

    pub fn peek(&self) -> usize {
        self.peek
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// The tables for one locus, in whichever form the distance engine should use.
#[derive(Clone, Debug)]
pub enum LocusTables {
    /// Exactly one motif, integer keyed
    Single(EncodedStutterTable),
    /// Any number of motifs, window keyed
    Multi(StutterTableSet)
}

impl LocusTables {
    /// Picks the representation for a set of tables.
    /// The encoded single-motif path is used when there is exactly one table and `enable_fast_path` is set.
    /// # Errors
    /// * if the single table cannot be encoded
    pub fn new(table_set: StutterTableSet, enable_fast_path: bool) -> Result<Self, RflError> {
        if enable_fast_path && table_set.len() == 1 {
            if let Some(table) = table_set.iter().next() {
                debug!("Using the single-motif encoded path for {}", table.motif().label());
                return Ok(LocusTables::Single(table.to_encoded()?));
            }
        }
        debug!("Using the multi-motif path with {} tables", table_set.len());
        Ok(LocusTables::Multi(table_set))
    }

    pub fn is_single(&self) -> bool {
        matches!(self, LocusTables::Single(_))
    }
}
