//! Destination catalog of suggested places.
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A suggested place to visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// Any JSON number. Missing or `null` means unlisted, which is never affordable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
}

impl Place {
    /// The estimate as written in the catalog (`1500`, `99.5`), blank when unlisted.
    #[must_use]
    pub fn cost_text(&self) -> String {
        self.estimated_cost.map(|cost| cost.to_string()).unwrap_or_default()
    }
}

/// Reference data for one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CityData {
    #[serde(default)]
    pub places: Vec<Place>,
}

impl CityData {
    #[must_use]
    pub fn has_places(&self) -> bool {
        !self.places.is_empty()
    }
}

/// Destination name to city data. Loaded once per session, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Catalog {
    cities: BTreeMap<String, CityData>,
}

impl Catalog {
    /// Parse the catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an object of city records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a destination ignoring case. Ties resolve to the first key in sorted order.
    #[must_use]
    pub fn lookup(&self, destination: &str) -> Option<&CityData> {
        let needle = destination.to_lowercase();
        self.cities
            .iter()
            .find(|(name, _)| name.to_lowercase() == needle)
            .map(|(_, city)| city)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
