
use derive_builder::Builder;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap as HashMap;
use strum::IntoEnumIterator;

use crate::data_types::cost_model::CostModel;
use crate::data_types::motif::Motif;
use crate::data_types::nucleotide::Nucleotide;
use crate::encoding::MAX_ENCODED_LENGTH;
use crate::errors::RflError;
use crate::stutter::table::{StutterTable, StutterTableSet};
use crate::util::sequence_alignment::weighted_edit_distance;

/// Default upper bound on motif length, the longest motif whose windows still fit in an encoded key
pub const DEFAULT_MAX_MOTIF_LENGTH: usize = MAX_ENCODED_LENGTH.div_ceil(2);

/// Controls how stutter tables get built
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct TableConfig {
    /// Motifs longer than this are rejected; table size grows as 4^(2k-1)
    max_motif_length: usize,
    /// If true, candidate windows are scored on the rayon thread pool
    parallel: bool
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_motif_length: DEFAULT_MAX_MOTIF_LENGTH,
            parallel: false
        }
    }
}

impl TableConfig {
    pub fn max_motif_length(&self) -> usize {
        self.max_motif_length
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

/// Number of windows a table for a motif of length `motif_length` contains, i.e. the sum of 4^i for i in 1..=2k-1
pub fn expected_table_size(motif_length: usize) -> usize {
    if motif_length == 0 {
        return 0;
    }
    (1..2 * motif_length as u32).map(|i| 4_usize.pow(i)).sum()
}

/// Enumerates every sequence over {A,C,G,T} from length 1 up to `max_length`, shorter ones first.
pub fn enumerate_candidates(max_length: usize) -> impl Iterator<Item = Vec<u8>> {
    let alphabet: Vec<u8> = Nucleotide::iter().map(|n| n.as_byte()).collect();
    (1..=max_length).flat_map(move |length| {
        let alphabet = alphabet.clone();
        (0..length)
            .map(move |_| alphabet.clone().into_iter())
            .multi_cartesian_product()
    })
}

/// Computes the (forward, backward) cost pair for one candidate window
fn score_candidate(motif: &Motif, costs: &CostModel, candidate: &[u8]) -> (f64, f64) {
    // expand the motif into the window, then edit it
    let forward = motif.forward_cost() + weighted_edit_distance(motif.sequence(), candidate, costs);
    // edit the window back towards the motif, then contract it
    let backward = motif.backward_cost() + weighted_edit_distance(candidate, motif.sequence(), costs);
    (forward, backward)
}

/// Builds the full stutter table for one motif.
/// Every window of length `1..=2k-1` gets a forward cost (motif -> window) and a backward cost (window -> motif), each offset by the motif's stutter base cost.
/// # Arguments
/// * `motif` - the repeat unit and its base stutter costs
/// * `costs` - the per-character cost model
/// * `config` - bounds and parallelism for the build
/// # Errors
/// * if the motif is longer than `config.max_motif_length()`
pub fn build_stutter_table(motif: &Motif, costs: &CostModel, config: TableConfig) -> Result<StutterTable, RflError> {
    if motif.len() > config.max_motif_length {
        return Err(RflError::MotifTooLong {
            length: motif.len(),
            max_length: config.max_motif_length
        });
    }

    let peek = motif.peek();
    let candidates = enumerate_candidates(peek);
    let scored: Vec<(Vec<u8>, (f64, f64))> = if config.parallel {
        candidates.par_bridge()
            .map(|candidate| {
                let scores = score_candidate(motif, costs, &candidate);
                (candidate, scores)
            })
            .collect()
    } else {
        candidates
            .map(|candidate| {
                let scores = score_candidate(motif, costs, &candidate);
                (candidate, scores)
            })
            .collect()
    };

    let capacity = scored.len();
    let mut forward: HashMap<Vec<u8>, f64> = HashMap::with_capacity_and_hasher(capacity, Default::default());
    let mut backward: HashMap<Vec<u8>, f64> = HashMap::with_capacity_and_hasher(capacity, Default::default());
    for (candidate, (fw_cost, bw_cost)) in scored.into_iter() {
        backward.insert(candidate.clone(), bw_cost);
        forward.insert(candidate, fw_cost);
    }
    debug!("Built stutter table for {}: peek={peek}, entries={}", motif.label(), forward.len());

    Ok(StutterTable::new(motif.clone(), forward, backward))
}

/// Builds the stutter tables for a collection of motifs at a single locus.
/// When `config.parallel()` is set the motifs are built concurrently.
/// # Errors
/// * if any motif fails `build_stutter_table(...)`
pub fn build_table_set(motifs: &[Motif], costs: &CostModel, config: TableConfig) -> Result<StutterTableSet, RflError> {
    let tables: Vec<StutterTable> = if config.parallel {
        motifs.par_iter()
            .map(|motif| build_stutter_table(motif, costs, config))
            .collect::<Result<_, _>>()?
    } else {
        motifs.iter()
            .map(|motif| build_stutter_table(motif, costs, config))
            .collect::<Result<_, _>>()?
    };
    Ok(StutterTableSet::new(tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use crate::data_types::cost_model::{CostEntries, SymbolPolicy, NUM_SYMBOLS};

    fn unit_costs() -> CostModel {
        CostModel::uniform(1.0, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_expected_table_size() {
        assert_eq!(expected_table_size(0), 0);
        assert_eq!(expected_table_size(1), 4);
        assert_eq!(expected_table_size(2), 4 + 16 + 64);
        assert_eq!(expected_table_size(3), 1364);
        assert_eq!(DEFAULT_MAX_MOTIF_LENGTH, 5);
    }

    #[test]
    fn test_enumerate_candidates() {
        let candidates: Vec<Vec<u8>> = enumerate_candidates(2).collect();
        assert_eq!(candidates.len(), 20);
        assert_eq!(candidates[0], b"A".to_vec());
        assert_eq!(candidates[3], b"T".to_vec());
        assert_eq!(candidates[4], b"AA".to_vec());
        assert_eq!(candidates[5], b"AC".to_vec());
        assert_eq!(candidates[19], b"TT".to_vec());
        assert_eq!(enumerate_candidates(0).count(), 0);
    }

    #[test]
    fn test_table_completeness() {
        for motif_seq in [&b"A"[..], b"CA", b"CAG", b"AGAT"] {
            let motif = Motif::new(motif_seq, 0.5, 0.5).unwrap();
            let table = build_stutter_table(&motif, &unit_costs(), TableConfig::default()).unwrap();
            let expected = expected_table_size(motif_seq.len());
            assert_eq!(table.len(), expected);
            assert_eq!(table.entries().len(), expected);

            // every window in range is present in both directions, nothing longer is
            for candidate in enumerate_candidates(motif.peek()) {
                assert!(table.forward_cost(&candidate).is_some());
                assert!(table.backward_cost(&candidate).is_some());
            }
            let too_long = vec![b'A'; motif.peek() + 1];
            assert!(table.forward_cost(&too_long).is_none());
            assert!(table.backward_cost(&too_long).is_none());
        }
    }

    #[test]
    fn test_cag_costs() {
        let motif = Motif::new(b"CAG", 0.5, 0.25).unwrap();
        let table = build_stutter_table(&motif, &unit_costs(), TableConfig::default()).unwrap();

        // exact copies cost just the base
        assert_approx_eq!(table.forward_cost(b"CAG").unwrap(), 0.5);
        assert_approx_eq!(table.backward_cost(b"CAG").unwrap(), 0.25);

        // partial copies pay for the edits
        assert_approx_eq!(table.forward_cost(b"CA").unwrap(), 1.5);
        assert_approx_eq!(table.backward_cost(b"CA").unwrap(), 1.25);
        assert_approx_eq!(table.forward_cost(b"CAGCA").unwrap(), 2.5);
        assert_approx_eq!(table.forward_cost(b"CAT").unwrap(), 1.5);
        assert_approx_eq!(table.forward_cost(b"TTTTT").unwrap(), 5.5);
    }

    #[test]
    fn test_directed_tables() {
        // insertions are cheap, deletions are expensive
        let mut entries: CostEntries = [[Some(1.0); NUM_SYMBOLS]; NUM_SYMBOLS];
        for target in 1..NUM_SYMBOLS {
            entries[0][target] = Some(0.1);
            entries[target][0] = Some(2.0);
        }
        let costs = CostModel::from_entries(&entries, SymbolPolicy::Strict).unwrap();
        let motif = Motif::new(b"AC", 0.0, 0.0).unwrap();
        let table = build_stutter_table(&motif, &costs, TableConfig::default()).unwrap();

        // forward: AC -> ACA is one insertion, backward: ACA -> AC is one deletion
        assert_approx_eq!(table.forward_cost(b"ACA").unwrap(), 0.1);
        assert_approx_eq!(table.backward_cost(b"ACA").unwrap(), 2.0);
        // and the reverse for shorter windows
        assert_approx_eq!(table.forward_cost(b"A").unwrap(), 2.0);
        assert_approx_eq!(table.backward_cost(b"A").unwrap(), 0.1);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let motif = Motif::new(b"TCTA", 0.75, 0.5).unwrap();
        let serial = build_stutter_table(&motif, &unit_costs(), TableConfig::default()).unwrap();
        let config = TableConfigBuilder::default()
            .parallel(true)
            .build().unwrap();
        let parallel = build_stutter_table(&motif, &unit_costs(), config).unwrap();
        assert_eq!(serial.entries(), parallel.entries());
    }

    #[test]
    fn test_motif_too_long() {
        let motif = Motif::new(b"AAGATG", 0.5, 0.5).unwrap();
        let err = build_stutter_table(&motif, &unit_costs(), TableConfig::default()).unwrap_err();
        assert_eq!(err, RflError::MotifTooLong { length: 6, max_length: 5 });

        let config = TableConfigBuilder::default()
            .max_motif_length(2)
            .build().unwrap();
        assert_eq!(config.max_motif_length(), 2);
        assert!(!config.parallel());
        let motifs = vec![Motif::new(b"AG", 0.5, 0.5).unwrap(), Motif::new(b"AGG", 0.5, 0.5).unwrap()];
        let err = build_table_set(&motifs, &unit_costs(), config).unwrap_err();
        assert_eq!(err, RflError::MotifTooLong { length: 3, max_length: 2 });
    }

    #[test]
    fn test_table_set_parallel() {
        let motifs = vec![Motif::new(b"AG", 0.5, 0.5).unwrap(), Motif::new(b"AGG", 0.25, 0.5).unwrap()];
        let config = TableConfigBuilder::default()
            .parallel(true)
            .build().unwrap();
        let table_set = build_table_set(&motifs, &unit_costs(), config).unwrap();
        assert_eq!(table_set.len(), 2);
        assert_eq!(table_set.peek(), 5);
        assert_approx_eq!(table_set.get(b"AGG").unwrap().forward_cost(b"AGG").unwrap(), 0.25);
    }
}
