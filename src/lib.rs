use pyo3::prelude::*;
use pyo3::types::PyModule;

pub mod aggregation;
pub mod compare;
pub mod error;
pub mod filter;
pub mod palette;
pub mod registry;
pub mod schema;
pub mod transfer;

mod model;

use model::AssignmentModel;

/// Export schema constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Contract table
    let contract = PyModule::new(m.py(), "contract")?;
    contract.add("ID", schema::contract::ID)?;
    contract.add("CONTRACT_NUMBER", schema::contract::CONTRACT_NUMBER)?;
    contract.add("ORIG_CONSULTANT", schema::contract::ORIG_CONSULTANT)?;
    contract.add("NEW_CONSULTANT", schema::contract::NEW_CONSULTANT)?;
    contract.add("LAT", schema::contract::LAT)?;
    contract.add("LON", schema::contract::LON)?;
    contract.add("ORIG_DISTANCE", schema::contract::ORIG_DISTANCE)?;
    contract.add("OPT_DISTANCE", schema::contract::OPT_DISTANCE)?;
    contract.add(
        "ESTABLISHMENT_NAME",
        schema::contract::ESTABLISHMENT_NAME,
    )?;
    contract.add("COUNTRY_CODE", schema::contract::COUNTRY_CODE)?;
    contract.add("LANGUAGE", schema::contract::LANGUAGE)?;
    contract.add("REFRESH_HOURS", schema::contract::REFRESH_HOURS)?;
    contract.add("OPEN_HOURS", schema::contract::OPEN_HOURS)?;
    contract.add("TOTAL_HOURS", schema::contract::TOTAL_HOURS)?;
    contract.add("ADDRESS", schema::contract::ADDRESS)?;
    m.add_submodule(&contract)?;

    // Summary
    let summary = PyModule::new(m.py(), "summary")?;
    summary.add("NUM_CONTRACTS", schema::summary::NUM_CONTRACTS)?;
    summary.add("SUM_REFRESH", schema::summary::SUM_REFRESH)?;
    summary.add("SUM_OPEN_HOURS", schema::summary::SUM_OPEN_HOURS)?;
    summary.add("SUM_TOTAL_HOURS", schema::summary::SUM_TOTAL_HOURS)?;
    summary.add("TOTAL_DISTANCE", schema::summary::TOTAL_DISTANCE)?;
    summary.add("AVG_DISTANCE", schema::summary::AVG_DISTANCE)?;
    summary.add("MAX_DISTANCE", schema::summary::MAX_DISTANCE)?;
    summary.add("STD_DISTANCE", schema::summary::STD_DISTANCE)?;
    m.add_submodule(&summary)?;

    // Comparison
    let compare_mod = PyModule::new(m.py(), "compare")?;
    compare_mod.add("METRIC", schema::compare::METRIC)?;
    compare_mod.add("ORIGINAL", schema::compare::ORIGINAL)?;
    compare_mod.add("OPTIMIZED", schema::compare::OPTIMIZED)?;
    compare_mod.add("PCT_DIFFERENCE", schema::compare::PCT_DIFFERENCE)?;
    compare_mod.add("METRICS", compare::METRICS.to_vec())?;
    m.add_submodule(&compare_mod)?;

    // Policy
    let policy = PyModule::new(m.py(), "policy")?;
    policy.add("ORIGINAL", schema::policy::ORIGINAL)?;
    policy.add("OPTIMIZED", schema::policy::OPTIMIZED)?;
    m.add_submodule(&policy)?;

    // Palette
    let palette_mod = PyModule::new(m.py(), "palette")?;
    palette_mod.add("COLORS", palette::COLORS.to_vec())?;
    palette_mod.add("DEFAULT", palette::DEFAULT)?;
    m.add_submodule(&palette_mod)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AssignmentModel>()?;
    add_schema_exports(m)?;
    Ok(())
}
