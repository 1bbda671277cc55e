use polars::prelude::*;

use crate::error::AssignError;
use crate::schema::Policy;

/// Restrict a contract table to contracts assigned to one of `include`.
///
/// Membership is tested against the assignment column selected by `policy`.
/// Row order is preserved; an empty include-set yields an empty frame, which
/// callers must handle with their own fallback rather than expecting the
/// filter to substitute data.
pub fn filter_by_consultants(
    contracts: &DataFrame,
    policy: Policy,
    include: &[String],
) -> Result<DataFrame, AssignError> {
    let column = policy.assignment_column();
    if contracts.column(column).is_err() {
        return Err(AssignError::MissingColumn(column.to_string()));
    }

    let include_series = Series::new("include".into(), include.to_vec());
    let df = contracts
        .clone()
        .lazy()
        .filter(col(column).is_in(lit(include_series), false))
        .collect()?;

    Ok(df)
}
