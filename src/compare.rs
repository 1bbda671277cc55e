use polars::prelude::*;

use crate::error::AssignError;
use crate::schema::{compare, contract};

/// Metric labels, in the fixed row order of the comparison table.
pub const METRICS: [&str; 4] = [
    "Total Distance Traveled",
    "Average Distance per Contract",
    "Maximum Distance Traveled by Any Consultant",
    "Standard Deviation of Distances",
];

#[derive(Debug, Clone, Copy)]
struct PolicyStats {
    total: Option<f64>,
    mean: Option<f64>,
    max: Option<f64>,
    std: Option<f64>,
}

impl PolicyStats {
    fn rows(self) -> [Option<f64>; 4] {
        [self.total, self.mean, self.max, self.std]
    }
}

fn policy_stats(contracts: &DataFrame, column: &str) -> Result<PolicyStats, AssignError> {
    let distances = contracts
        .column(column)
        .map_err(|_| AssignError::MissingColumn(column.to_string()))?
        .f64()?;

    Ok(PolicyStats {
        total: finite(distances.sum()),
        mean: finite(distances.mean()),
        max: finite(distances.max()),
        std: finite(distances.std(1)),
    })
}

/// Degenerate statistics become null; NaN and infinity never reach the output.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// (optimized − original) / original, undefined when original is zero or
/// either side is undefined.
pub fn pct_difference(original: Option<f64>, optimized: Option<f64>) -> Option<f64> {
    match (original, optimized) {
        (Some(orig), Some(opt)) if orig != 0.0 => finite(Some((opt - orig) / orig)),
        _ => None,
    }
}

/// Aggregate distance statistics of the original vs. the optimized
/// assignment, one row per metric in [`METRICS`] order with the original
/// value, the optimized value, and the percentage difference.
pub fn distance_comparison(contracts: &DataFrame) -> Result<DataFrame, AssignError> {
    let original = policy_stats(contracts, contract::ORIG_DISTANCE)?;
    let optimized = policy_stats(contracts, contract::OPT_DISTANCE)?;

    let orig_rows = original.rows();
    let opt_rows = optimized.rows();
    let pct_rows: Vec<Option<f64>> = orig_rows
        .iter()
        .zip(opt_rows.iter())
        .map(|(o, n)| pct_difference(*o, *n))
        .collect();

    let df = DataFrame::new(vec![
        Column::new(compare::METRIC.into(), METRICS.to_vec()),
        Column::new(compare::ORIGINAL.into(), orig_rows.to_vec()),
        Column::new(compare::OPTIMIZED.into(), opt_rows.to_vec()),
        Column::new(compare::PCT_DIFFERENCE.into(), pct_rows),
    ])?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contracts(orig: &[f64], opt: &[f64]) -> DataFrame {
        df!(
            contract::ORIG_DISTANCE => orig,
            contract::OPT_DISTANCE => opt,
        )
        .unwrap()
    }

    fn f64_at(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
        df.column(column).unwrap().f64().unwrap().get(row)
    }

    #[test]
    fn identical_policies_give_zero_differences() {
        let df = contracts(&[10.0, 5.0, 20.0], &[10.0, 5.0, 20.0]);
        let table = distance_comparison(&df).unwrap();
        for row in 0..METRICS.len() {
            assert_eq!(f64_at(&table, compare::PCT_DIFFERENCE, row), Some(0.0));
        }
    }

    #[test]
    fn totals_and_difference_match_hand_computation() {
        let df = contracts(&[10.0, 5.0, 20.0], &[8.0, 5.0, 15.0]);
        let table = distance_comparison(&df).unwrap();
        assert_eq!(f64_at(&table, compare::ORIGINAL, 0), Some(35.0));
        assert_eq!(f64_at(&table, compare::OPTIMIZED, 0), Some(28.0));
        let pct = f64_at(&table, compare::PCT_DIFFERENCE, 0).unwrap();
        assert!((pct - (28.0 - 35.0) / 35.0).abs() < 1e-12);
    }

    #[test]
    fn zero_original_total_gives_null_difference() {
        let df = contracts(&[0.0, 0.0], &[3.0, 4.0]);
        let table = distance_comparison(&df).unwrap();
        assert_eq!(f64_at(&table, compare::PCT_DIFFERENCE, 0), None);
        assert_eq!(f64_at(&table, compare::ORIGINAL, 0), Some(0.0));
        assert_eq!(f64_at(&table, compare::OPTIMIZED, 0), Some(7.0));
    }

    #[test]
    fn single_contract_has_null_std_rows() {
        let df = contracts(&[10.0], &[8.0]);
        let table = distance_comparison(&df).unwrap();
        // std row is last
        assert_eq!(f64_at(&table, compare::ORIGINAL, 3), None);
        assert_eq!(f64_at(&table, compare::OPTIMIZED, 3), None);
        assert_eq!(f64_at(&table, compare::PCT_DIFFERENCE, 3), None);
    }

    #[test]
    fn metric_rows_keep_their_fixed_order() {
        let df = contracts(&[10.0, 20.0], &[8.0, 16.0]);
        let table = distance_comparison(&df).unwrap();
        let labels: Vec<&str> = table
            .column(compare::METRIC)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(labels, METRICS.to_vec());
    }

    #[test]
    fn pct_difference_guards_degenerate_inputs() {
        assert_eq!(pct_difference(Some(0.0), Some(5.0)), None);
        assert_eq!(pct_difference(None, Some(5.0)), None);
        assert_eq!(pct_difference(Some(5.0), None), None);
        assert_eq!(pct_difference(Some(10.0), Some(5.0)), Some(-0.5));
    }
}
