use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

pub const MIN_INTRODUCTION_YEAR: i64 = 1900;
pub const MAX_INTRODUCTION_YEAR: i64 = 2035;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AircraftSpecifications {
    pub fuel_capacity_kg: Option<f64>,
    pub length_m: Option<f64>,
    pub wingspan_m: Option<f64>,
    pub height_m: Option<f64>,
    pub engine_manufacturer: Option<String>,
    pub engine_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftImage {
    pub url: String,
    #[serde(default)]
    pub primary: bool,
}

/// Catalog record. Read-only for the engines: loaded once, never mutated
/// inside a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub manufacturer: ManufacturerRef,
    pub family: Option<FamilyRef>,
    pub aircraft_type_id: Option<i64>,
    pub production_state_id: Option<i64>,
    pub size_category_id: Option<i64>,
    pub typical_passengers: Option<i64>,
    pub max_passengers: Option<i64>,
    pub range_km: Option<i64>,
    pub cruise_speed_knots: Option<i64>,
    pub introduction_year: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub specifications: Option<AircraftSpecifications>,
    #[serde(default)]
    pub images: Vec<AircraftImage>,
}

fn default_active() -> bool {
    true
}

impl Aircraft {
    pub fn has_specifications(&self) -> bool {
        self.specifications.is_some()
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    pub fn has_primary_image(&self) -> bool {
        self.images.iter().any(|image| image.primary)
    }

    pub fn primary_image_url(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|image| image.primary)
            .map(|image| image.url.as_str())
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family.as_ref().map(|family| family.name.as_str())
    }
}

impl Validate for Aircraft {
    fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(CatalogError::dataset(format!(
                "Aircraft '{}' has non-positive id {}",
                self.name, self.id
            )));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::dataset(format!(
                "Aircraft {} has an empty name",
                self.id
            )));
        }
        if let (Some(typical), Some(max)) = (self.typical_passengers, self.max_passengers) {
            if max < typical {
                return Err(CatalogError::dataset(format!(
                    "Aircraft {} has max passengers {} below typical {}",
                    self.id, max, typical
                )));
            }
        }
        if let Some(year) = self.introduction_year {
            if !(MIN_INTRODUCTION_YEAR..=MAX_INTRODUCTION_YEAR).contains(&year) {
                return Err(CatalogError::dataset(format!(
                    "Aircraft {} has introduction year {} outside {}-{}",
                    self.id, year, MIN_INTRODUCTION_YEAR, MAX_INTRODUCTION_YEAR
                )));
            }
        }
        Ok(())
    }
}

/// Flat listing shape returned by searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftCard {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub manufacturer_name: String,
    pub family_name: Option<String>,
    pub max_passengers: Option<i64>,
    pub range_km: Option<i64>,
    pub cruise_speed_knots: Option<i64>,
    pub introduction_year: Option<i64>,
    pub active: bool,
    pub primary_image_url: Option<String>,
}

impl From<&Aircraft> for AircraftCard {
    fn from(aircraft: &Aircraft) -> Self {
        Self {
            id: aircraft.id,
            name: aircraft.name.clone(),
            model: aircraft.model.clone(),
            manufacturer_name: aircraft.manufacturer.name.clone(),
            family_name: aircraft.family_name().map(str::to_string),
            max_passengers: aircraft.max_passengers,
            range_km: aircraft.range_km,
            cruise_speed_knots: aircraft.cruise_speed_knots,
            introduction_year: aircraft.introduction_year,
            active: aircraft.active,
            primary_image_url: aircraft.primary_image_url().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: usize) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            total_items.div_ceil(request.size)
        };
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages,
        }
    }
}
