use std::collections::HashMap;

use polars::prelude::*;

use crate::error::AssignError;
use crate::schema::{contract, Policy};

/// Consultant×consultant count matrix of contract moves between policies.
///
/// Rows are original consultants, columns are new consultants, both axes the
/// ascending known-consultant set; cell (i, j) counts contracts that moved
/// from i to j, the diagonal counting retained assignments. Only membership
/// of the *new* consultant is required for a contract to enter the count —
/// contracts arriving from an unknown original consultant are kept through
/// the count pass and only fall away when the dense matrix is laid out over
/// the known axes.
///
/// Returns `None` instead of a degenerate matrix when the known set is empty
/// or no contract lands on a known consultant.
pub fn transfer_matrix(
    contracts: &DataFrame,
    known: &[String],
    assignment: Policy,
) -> Result<Option<DataFrame>, AssignError> {
    if known.is_empty() {
        return Ok(None);
    }

    let new_col = assignment.assignment_column();
    for needed in [contract::ORIG_CONSULTANT, new_col] {
        if contracts.column(needed).is_err() {
            return Err(AssignError::MissingColumn(needed.to_string()));
        }
    }

    let known_series = Series::new("known".into(), known.to_vec());
    let landed = contracts
        .clone()
        .lazy()
        .filter(col(new_col).is_in(lit(known_series), false))
        .collect()?;

    if landed.height() == 0 {
        return Ok(None);
    }

    let mut axis: Vec<String> = known.to_vec();
    axis.sort();
    axis.dedup();

    // Sparse pass: count (original, new) pairs.
    let orig = landed.column(contract::ORIG_CONSULTANT)?.str()?;
    let new = landed.column(new_col)?.str()?;
    let mut counts: HashMap<(String, String), i64> = HashMap::new();
    for i in 0..landed.height() {
        let (Some(o), Some(n)) = (orig.get(i), new.get(i)) else {
            continue;
        };
        *counts.entry((o.to_string(), n.to_string())).or_insert(0) += 1;
    }

    // Dense pass: materialize over the full known×known product, zero-filled.
    let mut columns: Vec<Column> = Vec::with_capacity(axis.len() + 1);
    columns.push(Column::new(contract::ORIG_CONSULTANT.into(), &axis));
    for target in &axis {
        let cells: Vec<i64> = axis
            .iter()
            .map(|origin| {
                counts
                    .get(&(origin.clone(), target.clone()))
                    .copied()
                    .unwrap_or(0)
            })
            .collect();
        columns.push(Column::new(target.as_str().into(), &cells));
    }

    Ok(Some(DataFrame::new(columns)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contracts() -> DataFrame {
        df!(
            contract::ID => ["c1", "c2", "c3"],
            contract::ORIG_CONSULTANT => ["anna", "anna", "bert"],
            contract::NEW_CONSULTANT => ["bert", "anna", "anna"],
        )
        .unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn cell(matrix: &DataFrame, row: usize, column: &str) -> i64 {
        matrix.column(column).unwrap().i64().unwrap().get(row).unwrap()
    }

    #[test]
    fn counts_moves_and_retained_assignments() {
        let matrix = transfer_matrix(&contracts(), &strings(&["anna", "bert"]), Policy::Optimized)
            .unwrap()
            .unwrap();

        // axes sorted anna, bert: [[anna→anna, anna→bert], [bert→anna, bert→bert]]
        assert_eq!(matrix.height(), 2);
        assert_eq!(matrix.width(), 3);
        assert_eq!(cell(&matrix, 0, "anna"), 1);
        assert_eq!(cell(&matrix, 0, "bert"), 1);
        assert_eq!(cell(&matrix, 1, "anna"), 1);
        assert_eq!(cell(&matrix, 1, "bert"), 0);
    }

    #[test]
    fn cell_total_matches_landed_contracts() {
        let known = strings(&["anna", "bert"]);
        let matrix = transfer_matrix(&contracts(), &known, Policy::Optimized)
            .unwrap()
            .unwrap();
        let total: i64 = known.iter().map(|k| {
            matrix
                .column(k.as_str())
                .unwrap()
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .sum::<i64>()
        })
        .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn pairs_without_transfers_are_zero_filled() {
        let matrix = transfer_matrix(
            &contracts(),
            &strings(&["anna", "bert", "chris"]),
            Policy::Optimized,
        )
        .unwrap()
        .unwrap();
        assert_eq!(matrix.height(), 3);
        assert_eq!(matrix.width(), 4);
        // chris neither sends nor receives anything
        assert_eq!(cell(&matrix, 2, "anna"), 0);
        assert_eq!(cell(&matrix, 0, "chris"), 0);
        assert_eq!(cell(&matrix, 2, "chris"), 0);
    }

    #[test]
    fn unknown_new_consultant_excludes_the_contract() {
        // c1 lands on bert, who is not known: only c2 and c3 count.
        let matrix = transfer_matrix(&contracts(), &strings(&["anna"]), Policy::Optimized)
            .unwrap()
            .unwrap();
        assert_eq!(matrix.height(), 1);
        // anna→anna retained, bert→anna dropped by the dense layout
        assert_eq!(cell(&matrix, 0, "anna"), 1);
    }

    #[test]
    fn unknown_original_consultant_still_lands() {
        let df = df!(
            contract::ID => ["c1"],
            contract::ORIG_CONSULTANT => ["external"],
            contract::NEW_CONSULTANT => ["anna"],
        )
        .unwrap();
        // the contract passes the landing filter; its row falls away in the
        // dense layout because "external" is not on the known axis
        let matrix = transfer_matrix(&df, &strings(&["anna"]), Policy::Optimized)
            .unwrap()
            .unwrap();
        assert_eq!(matrix.height(), 1);
        assert_eq!(cell(&matrix, 0, "anna"), 0);
    }

    #[test]
    fn empty_known_set_builds_no_matrix() {
        assert!(transfer_matrix(&contracts(), &[], Policy::Optimized)
            .unwrap()
            .is_none());
    }

    #[test]
    fn no_landed_contracts_builds_no_matrix() {
        assert!(
            transfer_matrix(&contracts(), &strings(&["nobody"]), Policy::Optimized)
                .unwrap()
                .is_none()
        );
    }
}
