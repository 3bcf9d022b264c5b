/*!
# Distance engine
Computes the Restricted Forensic Levenshtein (RFL) quasi-distance from a parent allele to a child allele.
On top of the usual single-character substitution, insertion, and deletion, each DP cell may also look back up to `peek` characters and apply a stutter transition:
* along the child, inserting `child[n-j..n]` at its forward stutter cost
* along the parent, deleting `parent[m-j..m]` at its backward stutter cost

The result is directed (parent -> child) and not symmetric in general.
Only the minimum cost is produced, there is no backtrace.

The kernel is generic over `StutterLookup`, so the multi-motif window-keyed tables and the single-motif integer-keyed table share one recurrence.

## Example usage
```rust
use rfl::data_types::cost_model::CostModel;
use rfl::data_types::motif::Motif;
use rfl::distance_engine::rfl_distance;
use rfl::stutter::builder::{build_table_set, TableConfig};
use rfl::stutter::lookup::NoStutter;

let costs = CostModel::uniform(1.0, 1.0, 1.0).unwrap();
let motifs = vec![Motif::new(b"CAG", 0.5, 0.5).unwrap()];
let tables = build_table_set(&motifs, &costs, TableConfig::default()).unwrap();

// one extra repeat unit is a single forward stutter
let distance = rfl_distance(b"CAGCAGCAG", b"CAGCAGCAGCAG", &costs, &tables).unwrap();
assert_eq!(distance, 0.5);

// without tables it is three single insertions
let distance = rfl_distance(b"CAGCAGCAG", b"CAGCAGCAGCAG", &costs, &NoStutter).unwrap();
assert_eq!(distance, 3.0);
```
*/
use log::trace;

use crate::data_types::cost_model::CostModel;
use crate::errors::RflError;
use crate::stutter::lookup::{StutterDirection, StutterLookup};

/// Computes the RFL quasi-distance from `parent` to `child`.
/// # Arguments
/// * `parent` - the originating allele
/// * `child` - the derived allele
/// * `costs` - single-character costs, also controls symbol validation
/// * `lookup` - stutter costs for the locus; use `NoStutter` for plain weighted edit distance
/// # Errors
/// * if `costs` is strict and either sequence contains a symbol outside {A,C,G,T}
pub fn rfl_distance<L: StutterLookup + ?Sized>(parent: &[u8], child: &[u8], costs: &CostModel, lookup: &L) -> Result<f64, RflError> {
    costs.check_sequence(parent)?;
    costs.check_sequence(child)?;
    Ok(rfl_distance_unchecked(parent, child, costs, lookup))
}

/// Same as `rfl_distance(...)`, but without validating the sequences first.
/// Out-of-alphabet bytes are priced at the cost model's default cost and never match a stutter window.
/// # Arguments
/// * `parent` - the originating allele
/// * `child` - the derived allele
/// * `costs` - single-character costs
/// * `lookup` - stutter costs for the locus
pub fn rfl_distance_unchecked<L: StutterLookup + ?Sized>(parent: &[u8], child: &[u8], costs: &CostModel, lookup: &L) -> f64 {
    let peek = lookup.peek();
    let lp = parent.len();
    let lc = child.len();

    // rows are indexed by parent prefix length (m) and hold one value per child prefix length (n)
    // backward stutters reach `peek` rows up and the diagonal always needs one, so that is all we keep; row m lives at m % depth
    let depth = peek.min(lp).max(1) + 1;
    let mut rows: Vec<Vec<f64>> = vec![vec![0.0; lc+1]; depth];

    for m in 0..=lp {
        let current = m % depth;
        for n in 0..=lc {
            if m == 0 && n == 0 {
                rows[current][0] = 0.0;
                continue;
            }

            let mut best = f64::INFINITY;
            if n > 0 {
                // single insertion of child[n-1]
                best = best.min(rows[current][n-1] + costs.insertion_cost(child[n-1]));

                // forward stutter inserting child[n-j..n]
                for j in 1..=peek.min(n) {
                    if let Some(stutter_cost) = lookup.stutter_cost(StutterDirection::Forward, &child[n-j..n]) {
                        best = best.min(rows[current][n-j] + stutter_cost);
                    }
                }
            }

            if m > 0 {
                let previous = (m - 1) % depth;

                // single deletion of parent[m-1]
                best = best.min(rows[previous][n] + costs.deletion_cost(parent[m-1]));

                // diagonal match/mismatch
                if n > 0 {
                    best = best.min(rows[previous][n-1] + costs.substitution_cost(parent[m-1], child[n-1]));
                }

                // backward stutter removing parent[m-j..m]
                for j in 1..=peek.min(m) {
                    if let Some(stutter_cost) = lookup.stutter_cost(StutterDirection::Backward, &parent[m-j..m]) {
                        best = best.min(rows[(m - j) % depth][n] + stutter_cost);
                    }
                }
            }

            rows[current][n] = best;
        }
    }

    let distance = rows[lp % depth][lc];
    trace!("RFL distance: {} -> {} = {distance}", String::from_utf8_lossy(parent), String::from_utf8_lossy(child));
    distance
}
