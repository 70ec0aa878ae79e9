//! Per-storm intensity statistics.

use crate::types::{Hectopascals, Knots, Storm, StormType, Timestamp};

/// Winds below this do not count toward ACE
pub const ACE_MIN_WIND: Knots = Knots(34);

/// Lowest reported central pressure, ignoring unknown readings.
pub fn min_pressure(storm: &Storm) -> Option<Hectopascals> {
    storm
        .positions
        .iter()
        .map(|position| position.pressure)
        .filter(|pressure| pressure.is_reported())
        .min()
}

/// Accumulated cyclone energy, in 10⁴ kt², rounded to two decimals.
///
/// Only tropical and subtropical fixes at tropical-storm strength count.
pub fn ace(storm: &Storm) -> f64 {
    let sum: f64 = storm
        .positions
        .iter()
        .filter(|position| {
            matches!(
                position.storm_type,
                StormType::Tropical | StormType::Subtropical
            ) && position.wind >= ACE_MIN_WIND
        })
        .map(|position| {
            let wind = position.wind.raw() as f64;
            wind * wind
        })
        .sum();
    (sum * 1e-4 * 100.0).round() / 100.0
}

/// Headline numbers for one storm.
#[derive(Clone, Debug, PartialEq)]
pub struct StormSummary {
    pub id: u32,
    pub name: String,
    pub year: i32,
    pub fixes: usize,
    pub first: Option<Timestamp>,
    pub last: Option<Timestamp>,
    pub peak_wind: Knots,
    pub min_pressure: Option<Hectopascals>,
    pub ace: f64,
}

impl StormSummary {
    pub fn of(storm: &Storm) -> Self {
        StormSummary {
            id: storm.id,
            name: storm.name.clone(),
            year: storm.year,
            fixes: storm.positions.len(),
            first: storm.first().map(|position| position.time),
            last: storm.last().map(|position| position.time),
            peak_wind: storm.peak_wind(),
            min_pressure: min_pressure(storm),
            ace: ace(storm),
        }
    }
}
