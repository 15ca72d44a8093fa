use crate::domain::comparison::{ComparisonSummary, ExtremeRef};
use crate::domain::model::Aircraft;

fn extreme_by<F>(aircraft: &[Aircraft], value_of: F, pick_max: bool) -> Option<(&Aircraft, i64)>
where
    F: Fn(&Aircraft) -> Option<i64>,
{
    let mut best: Option<(&Aircraft, i64)> = None;
    for plane in aircraft {
        let Some(value) = value_of(plane) else {
            continue;
        };
        // Strict comparison keeps the first record on ties.
        let replace = match best {
            None => true,
            Some((_, current)) => {
                if pick_max {
                    value > current
                } else {
                    value < current
                }
            }
        };
        if replace {
            best = Some((plane, value));
        }
    }
    best
}

fn extreme_ref(pick: Option<(&Aircraft, i64)>, highlight: impl Fn(i64) -> String) -> Option<ExtremeRef> {
    pick.map(|(plane, value)| ExtremeRef {
        aircraft_id: plane.id,
        name: plane.name.clone(),
        highlight: highlight(value),
    })
}

fn average<F>(aircraft: &[Aircraft], value_of: F) -> Option<f64>
where
    F: Fn(&Aircraft) -> Option<i64>,
{
    let values: Vec<i64> = aircraft.iter().filter_map(value_of).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

fn spread<F>(aircraft: &[Aircraft], value_of: F) -> Option<i64>
where
    F: Fn(&Aircraft) -> Option<i64>,
{
    let values: Vec<i64> = aircraft.iter().filter_map(value_of).collect();
    let min = values.iter().min()?;
    let max = values.iter().max()?;
    Some(max - min)
}

/// Cross-record extremes and statistics, computed from the raw record set
/// so the result is independent of which table fields were included.
/// Ties resolve to the first record in input order.
pub fn summarize(aircraft: &[Aircraft]) -> ComparisonSummary {
    ComparisonSummary {
        largest_capacity: extreme_ref(
            extreme_by(aircraft, |plane| plane.max_passengers, true),
            |value| format!("{} passengers", value),
        ),
        longest_range: extreme_ref(
            extreme_by(aircraft, |plane| plane.range_km, true),
            |value| format!("{} km", value),
        ),
        fastest: extreme_ref(
            extreme_by(aircraft, |plane| plane.cruise_speed_knots, true),
            |value| format!("{} knots", value),
        ),
        newest: extreme_ref(
            extreme_by(aircraft, |plane| plane.introduction_year, true),
            |value| format!("{}", value),
        ),
        oldest: extreme_ref(
            extreme_by(aircraft, |plane| plane.introduction_year, false),
            |value| format!("{}", value),
        ),
        average_passengers: average(aircraft, |plane| plane.max_passengers),
        average_range_km: average(aircraft, |plane| plane.range_km),
        average_cruise_speed: average(aircraft, |plane| plane.cruise_speed_knots),
        passenger_spread: spread(aircraft, |plane| plane.max_passengers),
        range_spread_km: spread(aircraft, |plane| plane.range_km),
    }
}
