
use anyhow::{anyhow, bail, Context};
use itertools::Itertools;
use log::debug;
use std::path::Path;
use std::str::FromStr;

use crate::data_types::cost_model::{symbol_label, CostEntries, CostModel, SymbolPolicy, EMPTY_SYMBOL, NUM_SYMBOLS};
use crate::data_types::nucleotide::Nucleotide;

/// Label used for the empty symbol in a cost matrix file
pub const GAP_LABEL: &str = "-";

/// Loads a cost model from a tab-separated 5x5 matrix.
/// The first row is a header whose first cell is ignored and whose remaining cells are target symbols.
/// Every other row starts with a source symbol followed by the costs for each target column.
/// The empty symbol is written as "-" or left blank, and blank cost cells are treated as missing.
/// # Arguments
/// * `filename` - the matrix file to parse
/// * `policy` - how missing entries get handled, see `CostModel::from_entries(...)`
/// # Errors
/// * if the file cannot be opened or parsed
/// * if a label is not a known symbol, or a row/column label is repeated
/// * if the resulting entries do not form a valid cost model under `policy`
pub fn load_cost_model(filename: &Path, policy: SymbolPolicy) -> anyhow::Result<CostModel> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false) // the header row is parsed for its symbol labels
        .trim(csv::Trim::All)
        .from_path(filename)
        .with_context(|| format!("Error while opening {filename:?}:"))?;

    let mut records = csv_reader.records();
    let header = match records.next() {
        Some(result) => result.with_context(|| format!("Error while reading {filename:?}:"))?,
        None => bail!("Cost matrix file is empty: {filename:?}")
    };

    // the header tells us which matrix column each cell belongs to
    let targets: Vec<usize> = header.iter()
        .skip(1)
        .map(parse_symbol)
        .collect::<anyhow::Result<_>>()?;
    check_unique(&targets, "column")?;

    let mut entries: CostEntries = [[None; NUM_SYMBOLS]; NUM_SYMBOLS];
    let mut sources: Vec<usize> = Vec::with_capacity(NUM_SYMBOLS);
    for result in records {
        let row = result.with_context(|| format!("Error while reading {filename:?}:"))?;
        let source_label = row.get(0).ok_or(anyhow!("Missing symbol on row: {row:?}"))?;
        let source = parse_symbol(source_label)?;
        if sources.contains(&source) {
            bail!("Duplicate row label found in cost matrix: {:?}", symbol_label(source));
        }
        sources.push(source);

        for (&target, cell) in targets.iter().zip(row.iter().skip(1)) {
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse()
                .with_context(|| format!("Error while parsing cost {cell:?} in row {source_label:?}"))?;
            entries[source][target] = Some(value);
        }
    }
    debug!("Loaded {} cost matrix rows from {filename:?}", sources.len());

    let cost_model = CostModel::from_entries(&entries, policy)
        .with_context(|| format!("Error while building cost model from {filename:?}:"))?;
    Ok(cost_model)
}

/// Converts a row/column label into a matrix index
fn parse_symbol(label: &str) -> anyhow::Result<usize> {
    if label.is_empty() || label == GAP_LABEL {
        return Ok(EMPTY_SYMBOL);
    }
    let nucleotide = Nucleotide::from_str(label)
        .map_err(|_e| anyhow!("Unrecognized symbol in cost matrix: {label:?}"))?;
    Ok(nucleotide.digit() as usize)
}

/// Makes sure no label appears twice
fn check_unique(indices: &[usize], label: &str) -> anyhow::Result<()> {
    if let Some(duplicate) = indices.iter().duplicates().next() {
        bail!("Duplicate {label} label found in cost matrix: {:?}", symbol_label(*duplicate));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use std::path::PathBuf;

    use crate::data_types::cost_model::DEFAULT_COST;

    #[test]
    fn test_unit_matrix() {
        let filename = PathBuf::from("test_data/costs/unit.tsv");
        let costs = load_cost_model(&filename, SymbolPolicy::Strict).unwrap();
        assert_eq!(costs, CostModel::uniform(1.0, 1.0, 1.0).unwrap());
    }

    #[test]
    fn test_directed_matrix() {
        // columns are shuffled and the gap is a blank label
        let filename = PathBuf::from("test_data/costs/directed.tsv");
        let costs = load_cost_model(&filename, SymbolPolicy::Strict).unwrap();
        assert_approx_eq!(costs.insertion_cost(b'G'), 0.5);
        assert_approx_eq!(costs.deletion_cost(b'G'), 2.0);
        assert_approx_eq!(costs.substitution_cost(b'A', b'C'), 0.25);
        assert_approx_eq!(costs.substitution_cost(b'C', b'A'), 0.75);
        assert_approx_eq!(costs.substitution_cost(b'T', b'G'), 1.0);
    }

    #[test]
    fn test_partial_matrix() {
        let filename = PathBuf::from("test_data/costs/partial.tsv");
        let err = load_cost_model(&filename, SymbolPolicy::Strict).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("\"G\" -> \"T\""), "{message}");

        let costs = load_cost_model(&filename, SymbolPolicy::Lenient).unwrap();
        assert_eq!(costs.policy(), SymbolPolicy::Lenient);
        assert_approx_eq!(costs.deletion_cost(b'G'), 2.0);
        assert_approx_eq!(costs.substitution_cost(b'G', b'T'), DEFAULT_COST);
        assert_approx_eq!(costs.deletion_cost(b'T'), DEFAULT_COST);
    }

    #[test]
    fn test_bad_matrices() {
        for name in ["bad_symbol.tsv", "duplicate_row.tsv", "negative.tsv", "not_a_number.tsv", "does_not_exist.tsv"] {
            let filename = PathBuf::from("test_data/costs").join(name);
            for policy in [SymbolPolicy::Strict, SymbolPolicy::Lenient] {
                assert!(load_cost_model(&filename, policy).is_err(), "{name} should fail");
            }
        }
    }

    #[test]
    fn test_parse_symbol() {
        assert_eq!(parse_symbol("-").unwrap(), EMPTY_SYMBOL);
        assert_eq!(parse_symbol("").unwrap(), EMPTY_SYMBOL);
        assert_eq!(parse_symbol("A").unwrap(), 1);
        assert_eq!(parse_symbol("T").unwrap(), 4);
        assert!(parse_symbol("N").is_err());
        assert!(parse_symbol("a").is_err());
    }
}
