use crate::domain::model::{MAX_INTRODUCTION_YEAR, MIN_INTRODUCTION_YEAR};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_id_list, validate_optional_range, validate_positive_id, validate_range,
    validate_text_term, Validate,
};
use serde::{Deserialize, Serialize};

pub const MAX_MANUFACTURER_IDS: usize = 20;
pub const MAX_FAMILY_IDS: usize = 20;
pub const MAX_TYPE_IDS: usize = 10;
pub const MAX_PRODUCTION_STATE_IDS: usize = 10;
pub const MAX_SIZE_CATEGORY_IDS: usize = 5;

pub const MIN_TERM_LEN: usize = 2;
pub const MAX_TERM_LEN: usize = 100;

pub const MAX_PASSENGER_BOUND: i64 = 1000;
pub const MAX_RANGE_KM_BOUND: i64 = 20000;
pub const MAX_CRUISE_SPEED_BOUND: i64 = 1200;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// One search request. Every field is independently optional; an absent
/// field never constrains the result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub manufacturer_id: Option<i64>,
    pub family_id: Option<i64>,
    pub type_id: Option<i64>,
    pub production_state_id: Option<i64>,
    pub size_category_id: Option<i64>,

    pub manufacturer_ids: Option<Vec<i64>>,
    pub family_ids: Option<Vec<i64>>,
    pub type_ids: Option<Vec<i64>>,
    pub production_state_ids: Option<Vec<i64>>,
    pub size_category_ids: Option<Vec<i64>>,

    pub min_passengers: Option<i64>,
    pub max_passengers: Option<i64>,
    pub min_range_km: Option<i64>,
    pub max_range_km: Option<i64>,
    pub min_cruise_speed: Option<i64>,
    pub max_cruise_speed: Option<i64>,
    pub min_introduction_year: Option<i64>,
    pub max_introduction_year: Option<i64>,

    pub search_term: Option<String>,
    pub manufacturer_name: Option<String>,
    pub family_name: Option<String>,

    pub only_active: bool,
    pub only_with_specifications: Option<bool>,
    pub only_with_images: Option<bool>,
    pub only_with_primary_image: Option<bool>,

    pub page: usize,
    pub size: usize,
    pub sort_field: String,
    pub sort_direction: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            manufacturer_id: None,
            family_id: None,
            type_id: None,
            production_state_id: None,
            size_category_id: None,
            manufacturer_ids: None,
            family_ids: None,
            type_ids: None,
            production_state_ids: None,
            size_category_ids: None,
            min_passengers: None,
            max_passengers: None,
            min_range_km: None,
            max_range_km: None,
            min_cruise_speed: None,
            max_cruise_speed: None,
            min_introduction_year: None,
            max_introduction_year: None,
            search_term: None,
            manufacturer_name: None,
            family_name: None,
            only_active: true,
            only_with_specifications: None,
            only_with_images: None,
            only_with_primary_image: None,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_field: "name".to_string(),
            sort_direction: "asc".to_string(),
        }
    }
}

impl FilterCriteria {
    fn validate_bound_pair(
        field: &str,
        min: Option<i64>,
        max: Option<i64>,
        lower: i64,
        upper: i64,
    ) -> Result<()> {
        validate_optional_range(&format!("min{}", field), min, lower, upper)?;
        validate_optional_range(&format!("max{}", field), max, lower, upper)?;
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(CatalogError::validation(
                    field,
                    format!("minimum {} exceeds maximum {}", lo, hi),
                ));
            }
        }
        Ok(())
    }
}

impl Validate for FilterCriteria {
    fn validate(&self) -> Result<()> {
        for (field, id) in [
            ("manufacturerId", self.manufacturer_id),
            ("familyId", self.family_id),
            ("typeId", self.type_id),
            ("productionStateId", self.production_state_id),
            ("sizeCategoryId", self.size_category_id),
        ] {
            if let Some(id) = id {
                validate_positive_id(field, id)?;
            }
        }

        for (field, ids, max_len) in [
            ("manufacturerIds", &self.manufacturer_ids, MAX_MANUFACTURER_IDS),
            ("familyIds", &self.family_ids, MAX_FAMILY_IDS),
            ("typeIds", &self.type_ids, MAX_TYPE_IDS),
            (
                "productionStateIds",
                &self.production_state_ids,
                MAX_PRODUCTION_STATE_IDS,
            ),
            (
                "sizeCategoryIds",
                &self.size_category_ids,
                MAX_SIZE_CATEGORY_IDS,
            ),
        ] {
            if let Some(ids) = ids {
                validate_id_list(field, ids, max_len)?;
            }
        }

        Self::validate_bound_pair(
            "Passengers",
            self.min_passengers,
            self.max_passengers,
            0,
            MAX_PASSENGER_BOUND,
        )?;
        Self::validate_bound_pair(
            "RangeKm",
            self.min_range_km,
            self.max_range_km,
            0,
            MAX_RANGE_KM_BOUND,
        )?;
        Self::validate_bound_pair(
            "CruiseSpeed",
            self.min_cruise_speed,
            self.max_cruise_speed,
            0,
            MAX_CRUISE_SPEED_BOUND,
        )?;
        Self::validate_bound_pair(
            "IntroductionYear",
            self.min_introduction_year,
            self.max_introduction_year,
            MIN_INTRODUCTION_YEAR,
            MAX_INTRODUCTION_YEAR,
        )?;

        for (field, term) in [
            ("searchTerm", &self.search_term),
            ("manufacturerName", &self.manufacturer_name),
            ("familyName", &self.family_name),
        ] {
            if let Some(term) = term {
                validate_text_term(field, term, MIN_TERM_LEN, MAX_TERM_LEN)?;
            }
        }

        validate_range("size", self.size, 1, MAX_PAGE_SIZE)?;

        Ok(())
    }
}
