use polars::prelude::*;

use crate::error::AssignError;
use crate::schema::{contract, summary, Policy};

/// Per-consultant workload and distance summary.
///
/// Groups the contract table by the assignment column selected by
/// `assignment` and aggregates, per consultant: contract count, the three
/// hour sums, and sum/mean/max/sample-std of the distance column selected by
/// `distance`. Rows come back sorted ascending by consultant.
///
/// A singleton group has a null `std_distance` (Bessel-corrected sample
/// deviation is undefined for n = 1). An empty contract table yields an
/// empty summary, never an error; callers needing a derived scalar fall
/// back to the unfiltered table (see [`map_center`]).
pub fn consultant_summary(
    contracts: &DataFrame,
    assignment: Policy,
    distance: Policy,
) -> Result<DataFrame, AssignError> {
    let group = assignment.assignment_column();
    let dist = distance.distance_column();

    for needed in [
        group,
        dist,
        contract::ID,
        contract::REFRESH_HOURS,
        contract::OPEN_HOURS,
        contract::TOTAL_HOURS,
    ] {
        if contracts.column(needed).is_err() {
            return Err(AssignError::MissingColumn(needed.to_string()));
        }
    }

    let df = contracts
        .clone()
        .lazy()
        .group_by([col(group)])
        .agg([
            col(contract::ID).count().alias(summary::NUM_CONTRACTS),
            col(contract::REFRESH_HOURS).sum().alias(summary::SUM_REFRESH),
            col(contract::OPEN_HOURS).sum().alias(summary::SUM_OPEN_HOURS),
            col(contract::TOTAL_HOURS).sum().alias(summary::SUM_TOTAL_HOURS),
            col(dist).sum().alias(summary::TOTAL_DISTANCE),
            col(dist).mean().alias(summary::AVG_DISTANCE),
            col(dist).max().alias(summary::MAX_DISTANCE),
            col(dist).std(1).alias(summary::STD_DISTANCE),
        ])
        .sort([group], Default::default())
        .collect()?;

    Ok(df)
}

/// Mean (lat, lon) of the filtered contracts, falling back to the unfiltered
/// table when the filter selected nothing.
pub fn map_center(filtered: &DataFrame, full: &DataFrame) -> Result<(f64, f64), AssignError> {
    let source = if filtered.height() > 0 { filtered } else { full };
    if source.height() == 0 {
        return Err(AssignError::InvalidData(
            "cannot compute a map center over an empty contract table".to_string(),
        ));
    }

    for needed in [contract::LAT, contract::LON] {
        if source.column(needed).is_err() {
            return Err(AssignError::MissingColumn(needed.to_string()));
        }
    }

    let lat = source.column(contract::LAT)?.f64()?.mean();
    let lon = source.column(contract::LON)?.f64()?.mean();
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err(AssignError::InvalidData(
            "contract table has no usable lat/lon values".to_string(),
        )),
    }
}
