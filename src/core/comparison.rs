use crate::domain::comparison::{
    ComparisonRow, ComparisonValue, FieldKind, MISSING_VALUE,
};
use crate::domain::model::Aircraft;

/// Fields a comparison table can carry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareField {
    MaxPassengers,
    RangeKm,
    CruiseSpeed,
    IntroductionYear,
    ManufacturerName,
    FamilyName,
    FuelCapacityKg,
    LengthM,
    WingspanM,
    HeightM,
    EngineManufacturer,
    EngineModel,
}

const BASE_FIELDS: &[CompareField] = &[
    CompareField::MaxPassengers,
    CompareField::RangeKm,
    CompareField::CruiseSpeed,
    CompareField::IntroductionYear,
    CompareField::ManufacturerName,
    CompareField::FamilyName,
];

const SPECIFICATION_FIELDS: &[CompareField] = &[
    CompareField::FuelCapacityKg,
    CompareField::LengthM,
    CompareField::WingspanM,
    CompareField::HeightM,
    CompareField::EngineManufacturer,
    CompareField::EngineModel,
];

impl CompareField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::MaxPassengers => "maxPassengers",
            Self::RangeKm => "rangeKm",
            Self::CruiseSpeed => "cruiseSpeedKnots",
            Self::IntroductionYear => "introductionYear",
            Self::ManufacturerName => "manufacturerName",
            Self::FamilyName => "familyName",
            Self::FuelCapacityKg => "fuelCapacityKg",
            Self::LengthM => "lengthM",
            Self::WingspanM => "wingspanM",
            Self::HeightM => "heightM",
            Self::EngineManufacturer => "engineManufacturer",
            Self::EngineModel => "engineModel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MaxPassengers => "Max Passengers",
            Self::RangeKm => "Range",
            Self::CruiseSpeed => "Cruise Speed",
            Self::IntroductionYear => "Introduction Year",
            Self::ManufacturerName => "Manufacturer",
            Self::FamilyName => "Family",
            Self::FuelCapacityKg => "Fuel Capacity",
            Self::LengthM => "Length",
            Self::WingspanM => "Wingspan",
            Self::HeightM => "Height",
            Self::EngineManufacturer => "Engine Manufacturer",
            Self::EngineModel => "Engine Model",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::ManufacturerName
            | Self::FamilyName
            | Self::EngineManufacturer
            | Self::EngineModel => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::MaxPassengers => "seats",
            Self::RangeKm => "km",
            Self::CruiseSpeed => "knots",
            Self::FuelCapacityKg => "kg",
            Self::LengthM | Self::WingspanM | Self::HeightM => "m",
            Self::IntroductionYear
            | Self::ManufacturerName
            | Self::FamilyName
            | Self::EngineManufacturer
            | Self::EngineModel => "",
        }
    }

    fn numeric_value(&self, aircraft: &Aircraft) -> Option<f64> {
        let specs = aircraft.specifications.as_ref();
        match self {
            Self::MaxPassengers => aircraft.max_passengers.map(|v| v as f64),
            Self::RangeKm => aircraft.range_km.map(|v| v as f64),
            Self::CruiseSpeed => aircraft.cruise_speed_knots.map(|v| v as f64),
            Self::IntroductionYear => aircraft.introduction_year.map(|v| v as f64),
            Self::FuelCapacityKg => specs.and_then(|s| s.fuel_capacity_kg),
            Self::LengthM => specs.and_then(|s| s.length_m),
            Self::WingspanM => specs.and_then(|s| s.wingspan_m),
            Self::HeightM => specs.and_then(|s| s.height_m),
            _ => None,
        }
    }

    fn text_value(&self, aircraft: &Aircraft) -> Option<String> {
        let specs = aircraft.specifications.as_ref();
        match self {
            Self::ManufacturerName => Some(aircraft.manufacturer.name.clone()),
            Self::FamilyName => aircraft.family_name().map(str::to_string),
            Self::EngineManufacturer => specs.and_then(|s| s.engine_manufacturer.clone()),
            Self::EngineModel => specs.and_then(|s| s.engine_model.clone()),
            _ => None,
        }
    }
}

/// Integer-valued numbers render without a fraction, everything else with
/// one decimal.
pub fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn build_row(field: CompareField, aircraft: &[Aircraft]) -> ComparisonRow {
    let mut values: Vec<ComparisonValue> = aircraft
        .iter()
        .map(|plane| {
            let (raw, display, numeric) = match field.kind() {
                FieldKind::Numeric => match field.numeric_value(plane) {
                    Some(number) => {
                        let text = format_number(number);
                        (text.clone(), text, Some(number))
                    }
                    // Display-level placeholder only, never a false minimum.
                    None => (String::new(), MISSING_VALUE.to_string(), None),
                },
                FieldKind::Text => match field.text_value(plane) {
                    Some(text) => (text.clone(), text, None),
                    None => (String::new(), MISSING_VALUE.to_string(), None),
                },
            };
            ComparisonValue {
                aircraft_id: plane.id,
                raw,
                display,
                numeric,
                is_highest: false,
                is_lowest: false,
                relative_position: None,
            }
        })
        .collect();

    let mut min_value = None;
    let mut max_value = None;
    let mut difference = None;
    let mut difference_display = None;

    if field.kind() == FieldKind::Numeric {
        let numbers: Vec<f64> = values.iter().filter_map(|value| value.numeric).collect();
        if let (Some(min), Some(max)) = (
            numbers.iter().copied().reduce(f64::min),
            numbers.iter().copied().reduce(f64::max),
        ) {
            let spread = max - min;
            for value in &mut values {
                if let Some(number) = value.numeric {
                    // Every record tied on an extreme is flagged; a shared
                    // extreme has no sole winner.
                    value.is_lowest = number == min;
                    value.is_highest = number == max;
                    value.relative_position = Some(if spread > 0.0 {
                        (number - min) / spread * 100.0
                    } else {
                        50.0
                    });
                }
            }
            min_value = Some(min);
            max_value = Some(max);
            difference = Some(spread);
            difference_display = Some(format!("{:.1}", spread));
        }
    }

    ComparisonRow {
        field: field.key().to_string(),
        label: field.label().to_string(),
        kind: field.kind(),
        unit: field.unit().to_string(),
        values,
        min_value,
        max_value,
        difference,
        difference_display,
    }
}

/// Build one row per compared field, in fixed field order, with one value
/// per aircraft in the caller's order. Callers validate the record count
/// (2-5) before this runs.
pub fn build_comparison_table(
    aircraft: &[Aircraft],
    include_specifications: bool,
) -> Vec<ComparisonRow> {
    let mut fields: Vec<CompareField> = BASE_FIELDS.to_vec();
    if include_specifications {
        fields.extend_from_slice(SPECIFICATION_FIELDS);
    }

    fields
        .into_iter()
        .map(|field| build_row(field, aircraft))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AircraftSpecifications, FamilyRef, ManufacturerRef};

    fn plane(id: i64, name: &str, max_pax: Option<i64>, range: Option<i64>) -> Aircraft {
        Aircraft {
            id,
            name: name.to_string(),
            model: name.to_string(),
            manufacturer: ManufacturerRef {
                id: 1,
                name: "Airbus".to_string(),
            },
            family: Some(FamilyRef {
                id: 5,
                name: "A320 family".to_string(),
            }),
            aircraft_type_id: None,
            production_state_id: None,
            size_category_id: None,
            typical_passengers: None,
            max_passengers: max_pax,
            range_km: range,
            cruise_speed_knots: Some(450),
            introduction_year: Some(1988),
            active: true,
            specifications: None,
            images: Vec::new(),
        }
    }

    fn row<'a>(table: &'a [ComparisonRow], field: &str) -> &'a ComparisonRow {
        table
            .iter()
            .find(|row| row.field == field)
            .unwrap_or_else(|| panic!("row {} missing", field))
    }

    #[test]
    fn test_base_table_has_six_rows_in_order() {
        let planes = vec![plane(1, "A320", Some(180), Some(6300)), plane(2, "A321", Some(220), Some(7400))];
        let table = build_comparison_table(&planes, false);
        let keys: Vec<&str> = table.iter().map(|row| row.field.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "maxPassengers",
                "rangeKm",
                "cruiseSpeedKnots",
                "introductionYear",
                "manufacturerName",
                "familyName"
            ]
        );
    }

    #[test]
    fn test_specification_rows_appended_when_included() {
        let planes = vec![plane(1, "A320", Some(180), None), plane(2, "A321", Some(220), None)];
        let table = build_comparison_table(&planes, true);
        assert_eq!(table.len(), 12);
        assert_eq!(table[6].field, "fuelCapacityKg");
    }

    #[test]
    fn test_extremes_and_difference() {
        let planes = vec![
            plane(1, "A320", Some(162), Some(5765)),
            plane(2, "A321", Some(206), Some(7400)),
        ];
        let table = build_comparison_table(&planes, false);
        let pax = row(&table, "maxPassengers");

        assert!(pax.values[0].is_lowest);
        assert!(!pax.values[0].is_highest);
        assert!(pax.values[1].is_highest);
        assert!(!pax.values[1].is_lowest);
        assert_eq!(pax.min_value, Some(162.0));
        assert_eq!(pax.max_value, Some(206.0));
        assert_eq!(pax.difference, Some(44.0));
        assert_eq!(pax.difference_display.as_deref(), Some("44.0"));
    }

    #[test]
    fn test_all_tied_records_are_flagged() {
        let planes = vec![
            plane(1, "A", Some(180), None),
            plane(2, "B", Some(180), None),
            plane(3, "C", Some(180), None),
        ];
        let table = build_comparison_table(&planes, false);
        let pax = row(&table, "maxPassengers");

        for value in &pax.values {
            assert!(value.is_highest);
            assert!(value.is_lowest);
            assert_eq!(value.relative_position, Some(50.0));
        }
        assert_eq!(pax.difference, Some(0.0));
    }

    #[test]
    fn test_missing_value_gets_placeholder_not_minimum() {
        let planes = vec![
            plane(1, "A", Some(150), None),
            plane(2, "B", None, None),
            plane(3, "C", Some(200), None),
        ];
        let table = build_comparison_table(&planes, false);
        let pax = row(&table, "maxPassengers");

        // Row length always equals record count.
        assert_eq!(pax.values.len(), 3);
        assert_eq!(pax.values[1].display, MISSING_VALUE);
        assert_eq!(pax.values[1].numeric, None);
        assert!(!pax.values[1].is_lowest);
        assert_eq!(pax.min_value, Some(150.0));
        assert_eq!(pax.difference, Some(50.0));
    }

    #[test]
    fn test_text_rows_carry_no_extremes() {
        let planes = vec![plane(1, "A320", Some(180), None), plane(2, "A321", Some(220), None)];
        let table = build_comparison_table(&planes, false);
        let manufacturer = row(&table, "manufacturerName");

        assert_eq!(manufacturer.kind, FieldKind::Text);
        assert_eq!(manufacturer.difference, None);
        assert_eq!(manufacturer.min_value, None);
        assert!(manufacturer.values.iter().all(|v| !v.is_highest && !v.is_lowest));
    }

    #[test]
    fn test_values_follow_input_order() {
        let planes = vec![
            plane(9, "C", Some(100), None),
            plane(3, "A", Some(200), None),
            plane(7, "B", Some(150), None),
        ];
        let table = build_comparison_table(&planes, false);
        let ids: Vec<i64> = row(&table, "maxPassengers")
            .values
            .iter()
            .map(|value| value.aircraft_id)
            .collect();
        assert_eq!(ids, vec![9, 3, 7]);
    }

    #[test]
    fn test_missing_specifications_render_placeholders() {
        let mut with_specs = plane(1, "A320", Some(180), None);
        with_specs.specifications = Some(AircraftSpecifications {
            fuel_capacity_kg: Some(19600.0),
            length_m: Some(37.57),
            wingspan_m: Some(35.8),
            height_m: Some(11.76),
            engine_manufacturer: Some("CFM".to_string()),
            engine_model: Some("LEAP-1A".to_string()),
        });
        let without_specs = plane(2, "A321", Some(220), None);

        let table = build_comparison_table(&[with_specs, without_specs], true);
        let fuel = row(&table, "fuelCapacityKg");

        assert_eq!(fuel.values.len(), 2);
        assert_eq!(fuel.values[1].display, MISSING_VALUE);
        // Sole populated value is its own extreme.
        assert!(fuel.values[0].is_highest && fuel.values[0].is_lowest);
        assert_eq!(fuel.difference, Some(0.0));

        let engine = row(&table, "engineManufacturer");
        assert_eq!(engine.values[0].display, "CFM");
        assert_eq!(engine.values[1].display, MISSING_VALUE);
    }

    #[test]
    fn test_relative_position_normalized() {
        let planes = vec![
            plane(1, "A", Some(100), None),
            plane(2, "B", Some(150), None),
            plane(3, "C", Some(200), None),
        ];
        let table = build_comparison_table(&planes, false);
        let pax = row(&table, "maxPassengers");

        assert_eq!(pax.values[0].relative_position, Some(0.0));
        assert_eq!(pax.values[1].relative_position, Some(50.0));
        assert_eq!(pax.values[2].relative_position, Some(100.0));
    }
}
