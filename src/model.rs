use std::collections::HashMap;
use std::path::PathBuf;

use polars::prelude::*;

use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::aggregation;
use crate::compare;
use crate::error::AssignError;
use crate::filter;
use crate::palette::{self, ColorMapping};
use crate::registry::ConsultantRegistry;
use crate::schema::{contract, Policy};
use crate::transfer;

const DEFAULT_CONTRACTS_FILE: &str = "newregion.csv";
const DEFAULT_REGISTRY_FILE: &str = "AVG_consultants_locations.json";

/// Session-scoped comparison model.
///
/// Holds the contract table and the consultant-location registry, loaded
/// once and read-only afterwards. Every derived structure (color mapping,
/// filtered rows, summary, transfer matrix, distance comparison) is
/// recomputed from the snapshots on each call and never written back.
#[pyclass]
pub struct AssignmentModel {
    base_path: PathBuf,
    contracts: Option<DataFrame>,
    registry: Option<ConsultantRegistry>,
}

#[pymethods]
impl AssignmentModel {
    #[new]
    fn new(base_path: String) -> Self {
        Self {
            base_path: PathBuf::from(base_path),
            contracts: None,
            registry: None,
        }
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load the contract CSV.
    ///
    /// All columns of §schema::contract::REQUIRED must be present; numeric
    /// columns (lat, lon, both distances, the three hour fields) are cast to
    /// Float64, everything else stays String.
    #[pyo3(signature = (filename=None))]
    fn load_contracts(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let fname = filename.unwrap_or(DEFAULT_CONTRACTS_FILE);
        let raw = self.read_csv_as_strings(fname)?;

        Self::require_columns(&raw, &contract::REQUIRED)?;

        let casts: Vec<Expr> = contract::NUMERIC
            .iter()
            .map(|c| {
                col(*c)
                    .str()
                    .strip_chars(lit(" \t\r\n"))
                    .cast(DataType::Float64)
            })
            .collect();
        let df = raw.lazy().with_columns(casts).collect().map_err(AssignError::from)?;

        self.contracts = Some(df.clone());
        Ok(PyDataFrame(df))
    }

    /// Load the consultant-location registry JSON.
    ///
    /// Expected shape: `{"name": {"lat": .., "lon": ..}, ...}`.
    /// Returns the consultant → (lat, lon) mapping.
    #[pyo3(signature = (filename=None))]
    fn load_registry(&mut self, filename: Option<&str>) -> PyResult<HashMap<String, (f64, f64)>> {
        let fname = filename.unwrap_or(DEFAULT_REGISTRY_FILE);
        let path = self.base_path.join(fname);
        let registry = ConsultantRegistry::from_json_file(&path).map_err(PyErr::from)?;
        let positions = Self::positions_map(&registry);
        self.registry = Some(registry);
        Ok(positions)
    }

    // ── Color assignment ────────────────────────────────────────────────────

    /// Deterministic consultant → marker-color mapping over the distinct
    /// consultants of the selected assignment column, in first-seen order.
    #[pyo3(signature = (assignment="optimized"))]
    fn color_mapping(&self, assignment: &str) -> PyResult<HashMap<String, String>> {
        let contracts = self.contracts()?;
        let policy = Policy::parse(assignment)?;
        let distinct = palette::distinct_consultants(contracts, policy.assignment_column())?;
        Ok(ColorMapping::assign(distinct).to_map())
    }

    /// Color for consultants absent from the mapping (registry-only markers).
    #[staticmethod]
    fn default_color() -> &'static str {
        palette::DEFAULT
    }

    // ── Filtering ───────────────────────────────────────────────────────────

    /// Contracts assigned (under the selected column) to one of `consultants`.
    /// Row order is preserved; an empty selection yields an empty frame.
    #[pyo3(signature = (consultants, assignment="optimized"))]
    fn filter_contracts(
        &self,
        consultants: Vec<String>,
        assignment: &str,
    ) -> PyResult<PyDataFrame> {
        let contracts = self.contracts()?;
        let policy = Policy::parse(assignment)?;
        let df = filter::filter_by_consultants(contracts, policy, &consultants)?;
        Ok(PyDataFrame(df))
    }

    // ── Aggregation ─────────────────────────────────────────────────────────

    /// Per-consultant summary (counts, hour sums, distance statistics),
    /// optionally restricted to a consultant selection first.
    #[pyo3(signature = (assignment="optimized", distance="optimized", consultants=None))]
    fn consultant_summary(
        &self,
        assignment: &str,
        distance: &str,
        consultants: Option<Vec<String>>,
    ) -> PyResult<PyDataFrame> {
        let contracts = self.contracts()?;
        let assignment = Policy::parse(assignment)?;
        let distance = Policy::parse(distance)?;

        let df = match consultants {
            Some(include) => {
                let filtered = filter::filter_by_consultants(contracts, assignment, &include)?;
                aggregation::consultant_summary(&filtered, assignment, distance)?
            }
            None => aggregation::consultant_summary(contracts, assignment, distance)?,
        };
        Ok(PyDataFrame(df))
    }

    /// Mean (lat, lon) of the selected contracts, falling back to the full
    /// table when the selection is empty.
    #[pyo3(signature = (consultants=None, assignment="optimized"))]
    fn map_center(
        &self,
        consultants: Option<Vec<String>>,
        assignment: &str,
    ) -> PyResult<(f64, f64)> {
        let contracts = self.contracts()?;
        let center = match consultants {
            Some(include) => {
                let policy = Policy::parse(assignment)?;
                let filtered = filter::filter_by_consultants(contracts, policy, &include)?;
                aggregation::map_center(&filtered, contracts)?
            }
            None => aggregation::map_center(contracts, contracts)?,
        };
        Ok(center)
    }

    // ── Transfer matrix ─────────────────────────────────────────────────────

    /// Consultant×consultant transfer-count matrix over the registry's known
    /// consultants. `None` when the registry is empty or nothing lands on a
    /// known consultant.
    #[pyo3(signature = (assignment="optimized"))]
    fn transfer_matrix(&self, assignment: &str) -> PyResult<Option<PyDataFrame>> {
        let contracts = self.contracts()?;
        let registry = self.registry()?;
        let policy = Policy::parse(assignment)?;
        let known = registry.consultants();
        let matrix = transfer::transfer_matrix(contracts, &known, policy)?;
        Ok(matrix.map(PyDataFrame))
    }

    // ── Distance comparison ─────────────────────────────────────────────────

    /// Aggregate distance statistics of original vs. optimized assignments,
    /// one row per metric with the percentage difference (null when the
    /// original value is zero).
    fn distance_comparison(&self) -> PyResult<PyDataFrame> {
        let contracts = self.contracts()?;
        let df = compare::distance_comparison(contracts)?;
        Ok(PyDataFrame(df))
    }

    // ── Properties ──────────────────────────────────────────────────────────

    #[getter]
    fn contracts_df(&self) -> PyResult<Option<PyDataFrame>> {
        Ok(self.contracts.clone().map(PyDataFrame))
    }

    #[getter]
    fn registry_positions(&self) -> PyResult<Option<HashMap<String, (f64, f64)>>> {
        Ok(self.registry.as_ref().map(Self::positions_map))
    }

    #[getter]
    fn consultants(&self) -> PyResult<Vec<String>> {
        Ok(self.registry()?.consultants())
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

impl AssignmentModel {
    fn contracts(&self) -> Result<&DataFrame, AssignError> {
        self.contracts
            .as_ref()
            .ok_or_else(|| AssignError::NotLoaded("contracts".into()))
    }

    fn registry(&self) -> Result<&ConsultantRegistry, AssignError> {
        self.registry
            .as_ref()
            .ok_or_else(|| AssignError::NotLoaded("registry".into()))
    }

    fn positions_map(registry: &ConsultantRegistry) -> HashMap<String, (f64, f64)> {
        registry
            .iter()
            .map(|(name, pos)| (name.clone(), (pos.lat, pos.lon)))
            .collect()
    }

    /// Read a CSV file with all columns as String dtype.
    /// Trims whitespace from column names.
    fn read_csv_as_strings(&self, filename: &str) -> Result<DataFrame, AssignError> {
        let path = self.base_path.join(filename);
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path))?
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        Ok(df)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> PyResult<()> {
        for &col_name in required {
            if df.column(col_name).is_err() {
                return Err(AssignError::MissingColumn(col_name.to_string()).into());
            }
        }
        Ok(())
    }
}
