//! Storm selection and track trimming.

use crate::types::{Knots, Storm, StormType};

/// Conjunctive filter over storms. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<i32>,
    /// Compared case-insensitively (Unicode), whole name only
    pub name: Option<String>,
    pub id: Option<u32>,
    /// Minimum peak wind over the whole track
    pub min_wind: Option<Knots>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn min_wind(mut self, knots: u32) -> Self {
        self.min_wind = Some(Knots(knots));
        self
    }

    pub fn matches(&self, storm: &Storm) -> bool {
        self.year.is_none_or(|year| storm.year == year)
            && self
                .name
                .as_deref()
                .is_none_or(|name| storm.name.to_uppercase() == name.trim().to_uppercase())
            && self.id.is_none_or(|id| storm.id == id)
            && self.min_wind.is_none_or(|wind| storm.peak_wind() >= wind)
    }
}

/// Keep the storms matching every filter in `selection`, in input order.
///
/// An empty result is not an error here; the caller decides.
pub fn select(storms: impl IntoIterator<Item = Storm>, selection: &Selection) -> Vec<Storm> {
    let selected: Vec<Storm> = storms
        .into_iter()
        .filter(|storm| selection.matches(storm))
        .collect();
    crate::log::debug!(?selection, matched = selected.len(), "selected storms");
    selected
}

/// Remove extratropical fixes; storms left without fixes are dropped.
pub fn trim_extratropical(storms: Vec<Storm>) -> Vec<Storm> {
    storms
        .into_iter()
        .filter_map(|mut storm| {
            storm
                .positions
                .retain(|position| position.storm_type != StormType::Extratropical);
            (!storm.positions.is_empty()).then_some(storm)
        })
        .collect()
}
