/*!
# Stutter module
Precomputed stutter costs for tandem-repeat motifs.
For a motif of length `k`, a stutter table prices every {A,C,G,T} window of length `1..=2k-1` in two directions:
* forward - the motif stutters into an extra copy that is then edited into the window (an expansion in the child)
* backward - the window is edited back towards the motif and then removed by stutter (a contraction of the parent)

The tables are exhaustive, so their size grows as `4^(2k-1)`; `TableConfig` bounds the motif length up front.

## Example usage
```rust
use rfl::data_types::cost_model::CostModel;
use rfl::data_types::motif::Motif;
use rfl::stutter::builder::{build_stutter_table, expected_table_size, TableConfig};

let costs = CostModel::uniform(1.0, 1.0, 1.0).unwrap();
let motif = Motif::new(b"CAG", 0.5, 0.5).unwrap();
let table = build_stutter_table(&motif, &costs, TableConfig::default()).unwrap();
assert_eq!(table.len(), expected_table_size(3));
assert_eq!(table.forward_cost(b"CAG"), Some(0.5));
assert_eq!(table.forward_cost(b"CAGC"), Some(1.5));
```
*/
/// Enumeration and scoring of the stutter tables
pub mod builder;
/// The `StutterLookup` capability the distance engine is generic over
pub mod lookup;
/// Window-keyed, integer-keyed, and multi-motif table containers
pub mod table;
