use crate::domain::model::Aircraft;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_COMPARE_IDS: usize = 2;
pub const MAX_COMPARE_IDS: usize = 5;

/// Placeholder shown when a record has no value for a compared field.
pub const MISSING_VALUE: &str = "–";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFormat {
    Metric,
    Imperial,
}

impl Default for UnitFormat {
    fn default() -> Self {
        Self::Metric
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub aircraft_ids: Vec<i64>,
    pub include_specifications: bool,
    pub include_images: bool,
    pub normalize_units: bool,
    pub unit_format: UnitFormat,
}

impl CompareRequest {
    pub fn new(aircraft_ids: Vec<i64>) -> Self {
        Self {
            aircraft_ids,
            include_specifications: true,
            include_images: true,
            normalize_units: true,
            unit_format: UnitFormat::Metric,
        }
    }

    pub fn options(&self) -> CompareOptions {
        CompareOptions {
            include_specifications: self.include_specifications,
            include_images: self.include_images,
            normalize_units: self.normalize_units,
            unit_format: self.unit_format,
        }
    }
}

impl Validate for CompareRequest {
    fn validate(&self) -> Result<()> {
        let count = self.aircraft_ids.len();
        if !(MIN_COMPARE_IDS..=MAX_COMPARE_IDS).contains(&count) {
            return Err(CatalogError::validation(
                "aircraftIds",
                format!(
                    "Comparison needs between {} and {} aircraft, got {}",
                    MIN_COMPARE_IDS, MAX_COMPARE_IDS, count
                ),
            ));
        }
        if let Some(bad) = self.aircraft_ids.iter().find(|id| **id <= 0) {
            return Err(CatalogError::validation(
                "aircraftIds",
                format!("IDs must be positive, got {}", bad),
            ));
        }
        let distinct: HashSet<i64> = self.aircraft_ids.iter().copied().collect();
        if distinct.len() != count {
            return Err(CatalogError::validation(
                "aircraftIds",
                "IDs must be distinct",
            ));
        }
        Ok(())
    }
}

/// The toggles actually applied to a comparison, echoed in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    pub include_specifications: bool,
    pub include_images: bool,
    pub normalize_units: bool,
    pub unit_format: UnitFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonValue {
    pub aircraft_id: i64,
    pub raw: String,
    pub display: String,
    pub numeric: Option<f64>,
    pub is_highest: bool,
    pub is_lowest: bool,
    /// Position within the row's min/max span, 0-100.
    pub relative_position: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub field: String,
    pub label: String,
    pub kind: FieldKind,
    pub unit: String,
    pub values: Vec<ComparisonValue>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub difference: Option<f64>,
    pub difference_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeRef {
    pub aircraft_id: i64,
    pub name: String,
    pub highlight: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub largest_capacity: Option<ExtremeRef>,
    pub longest_range: Option<ExtremeRef>,
    pub fastest: Option<ExtremeRef>,
    pub newest: Option<ExtremeRef>,
    pub oldest: Option<ExtremeRef>,
    pub average_passengers: Option<f64>,
    pub average_range_km: Option<f64>,
    pub average_cruise_speed: Option<f64>,
    pub passenger_spread: Option<i64>,
    pub range_spread_km: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub aircraft: Vec<Aircraft>,
    pub table: Vec<ComparisonRow>,
    pub applied: CompareOptions,
    pub summary: ComparisonSummary,
    pub total_compared: usize,
    pub generated_at: DateTime<Utc>,
}
