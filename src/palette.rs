use std::collections::HashMap;

use polars::prelude::*;

use crate::error::AssignError;

/// Marker palette, in assignment order. Matches the folium icon color set
/// so the mapping can be handed straight to the map layer.
pub const COLORS: [&str; 19] = [
    "blue",
    "green",
    "red",
    "purple",
    "orange",
    "darkred",
    "lightred",
    "beige",
    "darkblue",
    "darkgreen",
    "cadetblue",
    "darkpurple",
    "white",
    "pink",
    "lightblue",
    "lightgreen",
    "gray",
    "black",
    "lightgray",
];

/// Color for consultants that never received a palette slot.
pub const DEFAULT: &str = "gray";

/// Deterministic consultant → color mapping.
///
/// The i-th distinct consultant (first-seen order) receives `COLORS[i % 19]`;
/// the palette cycles once consultants outnumber it. Lookups for a consultant
/// outside the mapping fall back to [`DEFAULT`] rather than failing.
#[derive(Debug, Clone, Default)]
pub struct ColorMapping {
    slots: HashMap<String, &'static str>,
}

impl ColorMapping {
    pub fn assign<I, S>(consultants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots: HashMap<String, &'static str> = HashMap::new();
        let mut next = 0usize;
        for consultant in consultants {
            let consultant = consultant.into();
            if !slots.contains_key(&consultant) {
                slots.insert(consultant, COLORS[next % COLORS.len()]);
                next += 1;
            }
        }
        Self { slots }
    }

    pub fn color(&self, consultant: &str) -> &'static str {
        self.slots.get(consultant).copied().unwrap_or(DEFAULT)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Owned view for handing the mapping across the Python boundary.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.slots
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// Distinct values of a string column in first-seen order, nulls skipped.
pub fn distinct_consultants(df: &DataFrame, column: &str) -> Result<Vec<String>, AssignError> {
    let values = df
        .column(column)
        .map_err(|_| AssignError::MissingColumn(column.to_string()))?
        .str()?;

    let mut seen: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_is_deterministic_and_total() {
        let ids = ["anna", "bert", "chris"];
        let first = ColorMapping::assign(ids);
        let second = ColorMapping::assign(ids);
        for id in ids {
            assert_eq!(first.color(id), second.color(id));
        }
        assert_eq!(first.len(), 3);
        assert_eq!(first.color("anna"), "blue");
        assert_eq!(first.color("bert"), "green");
    }

    #[test]
    fn palette_cycles_past_its_length() {
        let ids: Vec<String> = (0..COLORS.len() + 2).map(|i| format!("c{i:02}")).collect();
        let mapping = ColorMapping::assign(ids.iter().cloned());
        assert_eq!(mapping.color("c00"), mapping.color(&format!("c{:02}", COLORS.len())));
        assert_eq!(mapping.len(), COLORS.len() + 2);
    }

    #[test]
    fn duplicates_keep_their_first_slot() {
        let mapping = ColorMapping::assign(["anna", "bert", "anna"]);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.color("anna"), "blue");
        assert_eq!(mapping.color("bert"), "green");
    }

    #[test]
    fn unknown_consultant_gets_default() {
        let mapping = ColorMapping::assign(["anna"]);
        assert_eq!(mapping.color("nobody"), DEFAULT);
        assert_eq!(ColorMapping::default().color("nobody"), DEFAULT);
    }

    #[test]
    fn distinct_consultants_preserves_first_seen_order() {
        let df = df!(
            "who" => ["bert", "anna", "bert", "chris", "anna"],
        )
        .unwrap();
        let distinct = distinct_consultants(&df, "who").unwrap();
        assert_eq!(distinct, vec!["bert", "anna", "chris"]);
    }
}
