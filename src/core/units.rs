use crate::core::comparison::format_number;
use crate::domain::comparison::{ComparisonRow, UnitFormat, MISSING_VALUE};

/// km -> nautical miles
const KM_TO_NM: f64 = 1.0 / 1.852;
/// m -> feet
const M_TO_FT: f64 = 3.28084;
/// kg -> pounds
const KG_TO_LB: f64 = 2.20462;

fn conversion_for(unit: &str) -> Option<(f64, &'static str)> {
    match unit {
        "km" => Some((KM_TO_NM, "nm")),
        "m" => Some((M_TO_FT, "ft")),
        "kg" => Some((KG_TO_LB, "lb")),
        _ => None,
    }
}

fn convert_row(row: &mut ComparisonRow, factor: f64, unit: &'static str) {
    for value in &mut row.values {
        if let Some(number) = value.numeric {
            let converted = number * factor;
            value.numeric = Some(converted);
            value.display = format_number(converted);
            value.raw = value.display.clone();
        } else if value.display != MISSING_VALUE {
            value.display = MISSING_VALUE.to_string();
        }
    }
    // Min/max/difference move with the same positive factor, so the
    // extreme flags computed before conversion stay correct.
    row.min_value = row.min_value.map(|v| v * factor);
    row.max_value = row.max_value.map(|v| v * factor);
    row.difference = row.difference.map(|v| v * factor);
    row.difference_display = row.difference.map(|v| format!("{:.1}", v));
    row.unit = unit.to_string();
}

/// Rewrite metric rows into the requested unit system. Metric is the
/// record set's native representation, so it passes through untouched.
/// Numeric values, extremes, and the difference are all recomputed in the
/// target unit together; a row is never left mixing unit systems.
pub fn normalize_rows(rows: &mut [ComparisonRow], target: UnitFormat) {
    if target == UnitFormat::Metric {
        return;
    }

    for row in rows.iter_mut() {
        if let Some((factor, unit)) = conversion_for(row.unit.as_str()) {
            convert_row(row, factor, unit);
        }
    }
}
