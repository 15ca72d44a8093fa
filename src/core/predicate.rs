use crate::domain::criteria::FilterCriteria;
use crate::domain::model::Aircraft;
use serde::{Deserialize, Serialize};

/// Cross-reference ID columns usable in equality/membership constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdField {
    Manufacturer,
    Family,
    AircraftType,
    ProductionState,
    SizeCategory,
}

/// Bounded numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeField {
    MaxPassengers,
    RangeKm,
    CruiseSpeedKnots,
    IntroductionYear,
}

/// Text columns searchable by case-insensitive substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextField {
    Name,
    Model,
    ManufacturerName,
    FamilyName,
}

/// Existence/flag constraints. Only ever asserted, never negated: an
/// absent or false toggle contributes no constraint at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagField {
    Active,
    HasSpecifications,
    HasImages,
    HasPrimaryImage,
}

/// Composable query constraint. Built once per request by
/// [`build_predicate`] and handed to the store boundary; evaluation via
/// [`Predicate::matches`] is pure and total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Matches every record.
    All,
    IdEquals(IdField, i64),
    IdIn(IdField, Vec<i64>),
    AtLeast(RangeField, i64),
    AtMost(RangeField, i64),
    ContainsText(TextField, String),
    /// OR across several text columns, one shared term.
    ContainsAny(Vec<TextField>, String),
    HasFlag(FlagField),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Aircraft {
    fn id_field(&self, field: IdField) -> Option<i64> {
        match field {
            IdField::Manufacturer => Some(self.manufacturer.id),
            IdField::Family => self.family.as_ref().map(|family| family.id),
            IdField::AircraftType => self.aircraft_type_id,
            IdField::ProductionState => self.production_state_id,
            IdField::SizeCategory => self.size_category_id,
        }
    }

    fn range_field(&self, field: RangeField) -> Option<i64> {
        match field {
            RangeField::MaxPassengers => self.max_passengers,
            RangeField::RangeKm => self.range_km,
            RangeField::CruiseSpeedKnots => self.cruise_speed_knots,
            RangeField::IntroductionYear => self.introduction_year,
        }
    }

    fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::Name => Some(self.name.as_str()),
            TextField::Model => Some(self.model.as_str()),
            TextField::ManufacturerName => Some(self.manufacturer.name.as_str()),
            TextField::FamilyName => self.family_name(),
        }
    }

    fn flag_field(&self, field: FlagField) -> bool {
        match field {
            FlagField::Active => self.active,
            FlagField::HasSpecifications => self.has_specifications(),
            FlagField::HasImages => self.has_images(),
            FlagField::HasPrimaryImage => self.has_primary_image(),
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Predicate {
    /// Records with no value on a constrained column never match that
    /// constraint.
    pub fn matches(&self, aircraft: &Aircraft) -> bool {
        match self {
            Self::All => true,
            Self::IdEquals(field, id) => aircraft.id_field(*field) == Some(*id),
            Self::IdIn(field, ids) => aircraft
                .id_field(*field)
                .is_some_and(|value| ids.contains(&value)),
            Self::AtLeast(field, bound) => aircraft
                .range_field(*field)
                .is_some_and(|value| value >= *bound),
            Self::AtMost(field, bound) => aircraft
                .range_field(*field)
                .is_some_and(|value| value <= *bound),
            Self::ContainsText(field, term) => aircraft
                .text_field(*field)
                .is_some_and(|value| contains_ci(value, term)),
            Self::ContainsAny(fields, term) => fields.iter().any(|field| {
                aircraft
                    .text_field(*field)
                    .is_some_and(|value| contains_ci(value, term))
            }),
            Self::HasFlag(field) => aircraft.flag_field(*field),
            Self::And(parts) => parts.iter().all(|part| part.matches(aircraft)),
            Self::Or(parts) => parts.iter().any(|part| part.matches(aircraft)),
        }
    }
}

/// Compose every populated criterion into one conjunction. List filters
/// are membership constraints (OR within the list, AND across filter
/// categories); zero populated filters yields the identity predicate.
pub fn build_predicate(criteria: &FilterCriteria) -> Predicate {
    let mut parts = Vec::new();

    for (field, id) in [
        (IdField::Manufacturer, criteria.manufacturer_id),
        (IdField::Family, criteria.family_id),
        (IdField::AircraftType, criteria.type_id),
        (IdField::ProductionState, criteria.production_state_id),
        (IdField::SizeCategory, criteria.size_category_id),
    ] {
        if let Some(id) = id {
            parts.push(Predicate::IdEquals(field, id));
        }
    }

    for (field, ids) in [
        (IdField::Manufacturer, &criteria.manufacturer_ids),
        (IdField::Family, &criteria.family_ids),
        (IdField::AircraftType, &criteria.type_ids),
        (IdField::ProductionState, &criteria.production_state_ids),
        (IdField::SizeCategory, &criteria.size_category_ids),
    ] {
        if let Some(ids) = ids {
            parts.push(Predicate::IdIn(field, ids.clone()));
        }
    }

    for (field, bound) in [
        (RangeField::MaxPassengers, criteria.min_passengers),
        (RangeField::RangeKm, criteria.min_range_km),
        (RangeField::CruiseSpeedKnots, criteria.min_cruise_speed),
        (RangeField::IntroductionYear, criteria.min_introduction_year),
    ] {
        if let Some(bound) = bound {
            parts.push(Predicate::AtLeast(field, bound));
        }
    }

    for (field, bound) in [
        (RangeField::MaxPassengers, criteria.max_passengers),
        (RangeField::RangeKm, criteria.max_range_km),
        (RangeField::CruiseSpeedKnots, criteria.max_cruise_speed),
        (RangeField::IntroductionYear, criteria.max_introduction_year),
    ] {
        if let Some(bound) = bound {
            parts.push(Predicate::AtMost(field, bound));
        }
    }

    if let Some(term) = &criteria.search_term {
        parts.push(Predicate::ContainsAny(
            vec![TextField::Name, TextField::Model, TextField::ManufacturerName],
            term.trim().to_string(),
        ));
    }
    if let Some(name) = &criteria.manufacturer_name {
        parts.push(Predicate::ContainsText(
            TextField::ManufacturerName,
            name.trim().to_string(),
        ));
    }
    if let Some(name) = &criteria.family_name {
        parts.push(Predicate::ContainsText(
            TextField::FamilyName,
            name.trim().to_string(),
        ));
    }

    if criteria.only_active {
        parts.push(Predicate::HasFlag(FlagField::Active));
    }
    for (field, toggle) in [
        (FlagField::HasSpecifications, criteria.only_with_specifications),
        (FlagField::HasImages, criteria.only_with_images),
        (FlagField::HasPrimaryImage, criteria.only_with_primary_image),
    ] {
        if toggle == Some(true) {
            parts.push(Predicate::HasFlag(field));
        }
    }

    match parts.len() {
        0 => Predicate::All,
        1 => parts.remove(0),
        _ => Predicate::And(parts),
    }
}
