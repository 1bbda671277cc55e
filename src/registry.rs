use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::AssignError;

/// Home-base position of a consultant.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// Consultant-location registry, loaded once per session and read-only
/// thereafter. Doubles as the filter universe: a consultant is "known" iff
/// it has an entry here.
///
/// Keys live in a BTreeMap so [`consultants`](Self::consultants) is already
/// in the ascending order the transfer matrix axes want.
#[derive(Debug, Clone, Default)]
pub struct ConsultantRegistry {
    positions: BTreeMap<String, Position>,
}

impl ConsultantRegistry {
    pub fn from_positions(positions: BTreeMap<String, Position>) -> Self {
        Self { positions }
    }

    /// Load the registry from a JSON file shaped `{"name": {"lat": .., "lon": ..}}`.
    pub fn from_json_file(path: &Path) -> Result<Self, AssignError> {
        let file = File::open(path)?;
        let positions: BTreeMap<String, Position> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self { positions })
    }

    /// Known consultant ids, ascending.
    pub fn consultants(&self) -> Vec<String> {
        self.positions.keys().cloned().collect()
    }

    pub fn contains(&self, consultant: &str) -> bool {
        self.positions.contains_key(consultant)
    }

    pub fn position(&self, consultant: &str) -> Option<Position> {
        self.positions.get(consultant).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Position)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
