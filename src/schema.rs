/// Column-name constants for contract-assignkit schema.
/// Single source of truth - exported to Python via PyO3.
use crate::error::AssignError;

// ── Contract table columns ──────────────────────────────────────────────────
pub mod contract {
    pub const ID: &str = "id";
    pub const CONTRACT_NUMBER: &str = "QGuardContractNummer";
    pub const ORIG_CONSULTANT: &str = "orig_consultant";
    pub const NEW_CONSULTANT: &str = "suggested_consultant_opt_2";
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";
    pub const ORIG_DISTANCE: &str = "orig_distance";
    pub const OPT_DISTANCE: &str = "distance_opt_2";
    pub const ESTABLISHMENT_NAME: &str = "establishment_name";
    pub const COUNTRY_CODE: &str = "Landcode";
    pub const LANGUAGE: &str = "lang_short";
    pub const REFRESH_HOURS: &str = "refresh_hours";
    pub const OPEN_HOURS: &str = "open_hours_not_linked_to_refresh";
    pub const TOTAL_HOURS: &str = "total_hours_to_perform";
    pub const ADDRESS: &str = "company_address";

    /// Columns that must be present in a loaded contract table.
    pub const REQUIRED: [&str; 15] = [
        ID,
        CONTRACT_NUMBER,
        ORIG_CONSULTANT,
        NEW_CONSULTANT,
        LAT,
        LON,
        ORIG_DISTANCE,
        OPT_DISTANCE,
        ESTABLISHMENT_NAME,
        COUNTRY_CODE,
        LANGUAGE,
        REFRESH_HOURS,
        OPEN_HOURS,
        TOTAL_HOURS,
        ADDRESS,
    ];

    /// Columns cast to Float64 on load.
    pub const NUMERIC: [&str; 7] = [
        LAT,
        LON,
        ORIG_DISTANCE,
        OPT_DISTANCE,
        REFRESH_HOURS,
        OPEN_HOURS,
        TOTAL_HOURS,
    ];
}

// ── Consultant summary columns ──────────────────────────────────────────────
pub mod summary {
    pub const NUM_CONTRACTS: &str = "num_contracts";
    pub const SUM_REFRESH: &str = "sum_refresh";
    pub const SUM_OPEN_HOURS: &str = "sum_open_hours";
    pub const SUM_TOTAL_HOURS: &str = "sum_total_hours";
    pub const TOTAL_DISTANCE: &str = "total_distance";
    pub const AVG_DISTANCE: &str = "avg_distance";
    pub const MAX_DISTANCE: &str = "max_distance";
    pub const STD_DISTANCE: &str = "std_distance";
}

// ── Distance comparison columns ─────────────────────────────────────────────
pub mod compare {
    pub const METRIC: &str = "metric";
    pub const ORIGINAL: &str = "original";
    pub const OPTIMIZED: &str = "optimized";
    pub const PCT_DIFFERENCE: &str = "pct_difference";
}

// ── Policy selector values ──────────────────────────────────────────────────
pub mod policy {
    pub const ORIGINAL: &str = "original";
    pub const OPTIMIZED: &str = "optimized";
}

/// Which assignment run a computation reads from.
///
/// A comparison run carries two independent choices: the assignment column
/// used to group or filter, and the distance column used as the metric.
/// Both are selected with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Original,
    Optimized,
}

impl Policy {
    pub fn assignment_column(self) -> &'static str {
        match self {
            Policy::Original => contract::ORIG_CONSULTANT,
            Policy::Optimized => contract::NEW_CONSULTANT,
        }
    }

    pub fn distance_column(self) -> &'static str {
        match self {
            Policy::Original => contract::ORIG_DISTANCE,
            Policy::Optimized => contract::OPT_DISTANCE,
        }
    }

    pub fn parse(value: &str) -> Result<Self, AssignError> {
        match value {
            policy::ORIGINAL => Ok(Policy::Original),
            policy::OPTIMIZED => Ok(Policy::Optimized),
            other => Err(AssignError::InvalidData(format!(
                "Invalid policy: '{}'. Must be 'original' or 'optimized'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_selects_independent_columns() {
        assert_eq!(Policy::Original.assignment_column(), contract::ORIG_CONSULTANT);
        assert_eq!(Policy::Optimized.assignment_column(), contract::NEW_CONSULTANT);
        assert_eq!(Policy::Original.distance_column(), contract::ORIG_DISTANCE);
        assert_eq!(Policy::Optimized.distance_column(), contract::OPT_DISTANCE);
    }

    #[test]
    fn policy_parse_rejects_unknown_values() {
        assert_eq!(Policy::parse("original").unwrap(), Policy::Original);
        assert_eq!(Policy::parse("optimized").unwrap(), Policy::Optimized);
        assert!(Policy::parse("opt_2").is_err());
    }
}
