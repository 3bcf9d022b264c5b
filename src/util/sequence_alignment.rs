
use crate::data_types::cost_model::CostModel;

/// Returns the weighted edit distance to transform `source` into `target` by doing the full grid calculation.
/// Insertions, deletions, and substitutions are priced per character by `costs`, and the result is directed.
/// This version is row-based (rows are length of `target`) for the main loop.
/// # Arguments
/// * `source` - the sequence being edited
/// * `target` - the sequence we want to end up with
/// * `costs` - the per-character cost model
pub fn weighted_edit_distance(source: &[u8], target: &[u8], costs: &CostModel) -> f64 {
    // structured such that each "row" is the length of target (i.e. target is conceptually on the x-axis)
    let lt: usize = target.len();
    let mut row: Vec<f64> = vec![0.0; lt+1];
    let mut prev_row: Vec<f64> = vec![0.0; lt+1];
    for (j, &t) in target.iter().enumerate() {
        prev_row[j+1] = prev_row[j] + costs.insertion_cost(t);
    }

    // go through each row
    for &s in source.iter() {
        row[0] = prev_row[0] + costs.deletion_cost(s);
        for (j, &t) in target.iter().enumerate() {
            row[j+1] = [
                // delete the source character
                prev_row[j+1] + costs.deletion_cost(s),
                // insert the target character
                row[j] + costs.insertion_cost(t),
                // diagonal match/mismatch
                prev_row[j] + costs.substitution_cost(s, t)
            ].into_iter().fold(f64::INFINITY, f64::min);
        }

        // swap the rows at the end of each iteration
        std::mem::swap(&mut row, &mut prev_row);
    }

    prev_row[lt]
}
