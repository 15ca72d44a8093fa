use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Canonical, queryable sort targets. The closed allow-list: anything a
/// caller sends resolves into one of these or falls back to `Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Name,
    Model,
    MaxPassengers,
    TypicalPassengers,
    RangeKm,
    CruiseSpeedKnots,
    IntroductionYear,
    ManufacturerName,
    FamilyName,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Name,
        SortField::Model,
        SortField::MaxPassengers,
        SortField::TypicalPassengers,
        SortField::RangeKm,
        SortField::CruiseSpeedKnots,
        SortField::IntroductionYear,
        SortField::ManufacturerName,
        SortField::FamilyName,
    ];

    /// Canonical field path as exposed to callers. Cross-reference fields
    /// use a dotted relation path.
    pub fn canonical_path(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Model => "model",
            Self::MaxPassengers => "maxPassengers",
            Self::TypicalPassengers => "typicalPassengers",
            Self::RangeKm => "rangeKm",
            Self::CruiseSpeedKnots => "cruiseSpeedKnots",
            Self::IntroductionYear => "introductionYear",
            Self::ManufacturerName => "manufacturer.name",
            Self::FamilyName => "family.name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Synonym table. Many user-facing keys (English/Spanish, abbreviations)
/// map to exactly one canonical field.
const SORT_ALIASES: &[(&str, SortField)] = &[
    ("name", SortField::Name),
    ("nombre", SortField::Name),
    ("aircraft", SortField::Name),
    ("aeronave", SortField::Name),
    ("alphabetical", SortField::Name),
    ("alfabetico", SortField::Name),
    ("model", SortField::Model),
    ("modelo", SortField::Model),
    ("capacity", SortField::MaxPassengers),
    ("capacidad", SortField::MaxPassengers),
    ("passengers", SortField::MaxPassengers),
    ("pasajeros", SortField::MaxPassengers),
    ("pax", SortField::MaxPassengers),
    ("seats", SortField::MaxPassengers),
    ("asientos", SortField::MaxPassengers),
    ("typical", SortField::TypicalPassengers),
    ("tipico", SortField::TypicalPassengers),
    ("range", SortField::RangeKm),
    ("alcance", SortField::RangeKm),
    ("autonomia", SortField::RangeKm),
    ("distance", SortField::RangeKm),
    ("distancia", SortField::RangeKm),
    ("speed", SortField::CruiseSpeedKnots),
    ("velocidad", SortField::CruiseSpeedKnots),
    ("cruise", SortField::CruiseSpeedKnots),
    ("crucero", SortField::CruiseSpeedKnots),
    ("knots", SortField::CruiseSpeedKnots),
    ("nudos", SortField::CruiseSpeedKnots),
    ("year", SortField::IntroductionYear),
    ("ano", SortField::IntroductionYear),
    ("año", SortField::IntroductionYear),
    ("introduced", SortField::IntroductionYear),
    ("introduccion", SortField::IntroductionYear),
    ("age", SortField::IntroductionYear),
    ("antiguedad", SortField::IntroductionYear),
    ("manufacturer", SortField::ManufacturerName),
    ("fabricante", SortField::ManufacturerName),
    ("maker", SortField::ManufacturerName),
    ("marca", SortField::ManufacturerName),
    ("brand", SortField::ManufacturerName),
    ("family", SortField::FamilyName),
    ("familia", SortField::FamilyName),
    ("series", SortField::FamilyName),
    ("serie", SortField::FamilyName),
];

const ASCENDING_ALIASES: &[&str] = &[
    "asc",
    "ascending",
    "ascendente",
    "a-z",
    "az",
    "up",
    "arriba",
    "menor",
];

const DESCENDING_ALIASES: &[&str] = &[
    "desc",
    "descending",
    "descendente",
    "z-a",
    "za",
    "down",
    "abajo",
    "mayor",
];

/// The full synonym table, e.g. for help output.
pub fn alias_table() -> &'static [(&'static str, SortField)] {
    SORT_ALIASES
}

/// Look up a raw sort key without applying the fallback.
pub fn lookup_sort_field(raw: &str) -> Option<SortField> {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    if let Some((_, field)) = SORT_ALIASES.iter().find(|(alias, _)| *alias == key) {
        return Some(*field);
    }

    // Callers may pass a canonical path directly.
    SortField::ALL
        .iter()
        .find(|field| field.canonical_path().eq_ignore_ascii_case(&key))
        .copied()
}

/// Resolve a raw sort key. Unknown keys are a warning, never a failure:
/// the catalog always has a usable ordering.
pub fn resolve_sort_field(raw: &str) -> SortField {
    match lookup_sort_field(raw) {
        Some(field) => field,
        None => {
            tracing::warn!(
                "Unknown sort field '{}', falling back to '{}'",
                raw,
                SortField::Name.canonical_path()
            );
            SortField::Name
        }
    }
}

/// Direction synonyms resolve independently of the field; anything
/// unrecognized means ascending.
pub fn resolve_sort_direction(raw: &str) -> SortDirection {
    let key = raw.trim().to_lowercase();
    if DESCENDING_ALIASES.contains(&key.as_str()) {
        SortDirection::Descending
    } else {
        if !key.is_empty() && !ASCENDING_ALIASES.contains(&key.as_str()) {
            tracing::debug!("Unknown sort direction '{}', defaulting to ascending", raw);
        }
        SortDirection::Ascending
    }
}

pub fn resolve_sort(field: &str, direction: &str) -> SortSpec {
    SortSpec {
        field: resolve_sort_field(field),
        direction: resolve_sort_direction(direction),
    }
}

/// Startup check: every alias must target an allow-listed field and no
/// alias may appear twice. Run once when the service is wired up.
pub fn verify_alias_table() -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for (alias, field) in SORT_ALIASES {
        if !seen.insert(*alias) {
            return Err(CatalogError::dataset(format!(
                "Sort alias '{}' is defined twice",
                alias
            )));
        }
        if !SortField::ALL.contains(field) {
            return Err(CatalogError::dataset(format!(
                "Sort alias '{}' targets a field outside the allow-list",
                alias
            )));
        }
    }
    // A canonical path may double as an alias only when it targets its
    // own field, otherwise direct lookups and aliases would disagree.
    for field in &SortField::ALL {
        let path = field.canonical_path().to_lowercase();
        if let Some((_, aliased)) = SORT_ALIASES.iter().find(|(alias, _)| *alias == path) {
            if aliased != field {
                return Err(CatalogError::dataset(format!(
                    "Canonical path '{}' is aliased to a different field",
                    field.canonical_path()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_and_spanish_aliases() {
        assert_eq!(resolve_sort_field("capacity"), SortField::MaxPassengers);
        assert_eq!(resolve_sort_field("capacidad"), SortField::MaxPassengers);
        assert_eq!(resolve_sort_field("pasajeros"), SortField::MaxPassengers);
        assert_eq!(resolve_sort_field("alcance"), SortField::RangeKm);
        assert_eq!(resolve_sort_field("fabricante"), SortField::ManufacturerName);
        assert_eq!(resolve_sort_field("velocidad"), SortField::CruiseSpeedKnots);
    }

    #[test]
    fn test_canonical_paths_resolve_directly() {
        assert_eq!(resolve_sort_field("maxPassengers"), SortField::MaxPassengers);
        assert_eq!(resolve_sort_field("MAXPASSENGERS"), SortField::MaxPassengers);
        assert_eq!(
            resolve_sort_field("manufacturer.name"),
            SortField::ManufacturerName
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(resolve_sort_field("  Capacity  "), SortField::MaxPassengers);
        assert_eq!(resolve_sort_field("FABRICANTE"), SortField::ManufacturerName);
    }

    #[test]
    fn test_unknown_keys_fall_back_to_name() {
        assert_eq!(resolve_sort_field("bogus"), SortField::Name);
        assert_eq!(resolve_sort_field(""), SortField::Name);
        assert!(lookup_sort_field("bogus").is_none());
    }

    #[test]
    fn test_direction_synonyms() {
        assert_eq!(resolve_sort_direction("desc"), SortDirection::Descending);
        assert_eq!(resolve_sort_direction("Z-A"), SortDirection::Descending);
        assert_eq!(resolve_sort_direction("down"), SortDirection::Descending);
        assert_eq!(resolve_sort_direction("descendente"), SortDirection::Descending);
        assert_eq!(resolve_sort_direction("asc"), SortDirection::Ascending);
        assert_eq!(resolve_sort_direction("a-z"), SortDirection::Ascending);
        assert_eq!(resolve_sort_direction("up"), SortDirection::Ascending);
    }

    #[test]
    fn test_unknown_direction_defaults_to_ascending() {
        assert_eq!(resolve_sort_direction("sideways"), SortDirection::Ascending);
        assert_eq!(resolve_sort_direction(""), SortDirection::Ascending);
    }

    #[test]
    fn test_alias_table_is_consistent() {
        assert!(verify_alias_table().is_ok());
    }
}
