//! Pre-filled `{{WPTC track map}}` wiki template for a single storm.

use std::fmt::Write as _;

use crate::config::MapConfig;
use crate::style::Scale;
use crate::types::{Knots, Position, Storm, StormType, Timestamp};

const FILL_ME: &str = "{{{fill me}}}";

/// Article title prefix, from the strongest fix and the basin.
pub fn title_prefix(storm: &Storm) -> &'static str {
    let Some(peak) = peak_position(storm) else {
        return "Cyclone";
    };
    let wind = peak.wind;
    if !wind.is_reported() {
        return "Cyclone";
    }
    if peak.storm_type == StormType::Subtropical {
        return if wind >= Knots(34) {
            "Subtropical Storm"
        } else {
            "Subtropical Depression"
        };
    }
    if wind < Knots(34) {
        return "Tropical Depression";
    }
    if wind < Knots(64) {
        return "Tropical Storm";
    }
    match storm.basin.as_deref() {
        Some("WP") if wind >= Knots(130) => "Super Typhoon",
        Some("WP") => "Typhoon",
        Some("AL" | "EP" | "CP") => "Hurricane",
        _ => "Tropical Cyclone",
    }
}

/// First fix carrying the storm's peak wind
fn peak_position(storm: &Storm) -> Option<&Position> {
    let peak = storm.peak_wind();
    storm.positions.iter().find(|position| position.wind == peak)
}

/// Season article for the storm's basin.
pub fn season_name(storm: &Storm) -> String {
    match storm.basin.as_deref() {
        Some("AL") => format!("{} Atlantic hurricane season", storm.year),
        Some("EP") => format!("{} Pacific hurricane season", storm.year),
        Some("WP") => format!("{} Pacific typhoon season", storm.year),
        Some("SL") => "List of South Atlantic tropical cyclones".to_string(),
        _ => FILL_ME.to_string(),
    }
}

/// `KATRINA` → `Katrina`
fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn date(time: Timestamp) -> String {
    format!("{:04}-{:02}-{:02}", time.year, time.month, time.day)
}

/// Template text plus an edit-summary line, for exactly one storm with fixes.
///
/// The color key and scale lines follow `config`. Returns `None` for any
/// other input; the template describes a single track map.
pub fn upload_template(storms: &[Storm], config: &MapConfig) -> Option<String> {
    let [storm] = storms else {
        return None;
    };
    let (first, last) = (storm.first()?, storm.last()?);
    let name = display_name(&storm.name);
    let title = format!("{} {}", title_prefix(storm), name);

    let mut out = String::new();
    writeln!(out, "{{{{WPTC track map").unwrap();
    writeln!(out, " | author = {{{{subst:REVISIONUSER}}}}").unwrap();
    writeln!(out, " | name = {title}").unwrap();
    writeln!(out, " | article = {title} ({})", storm.year).unwrap();
    writeln!(out, " | season = {}", season_name(storm)).unwrap();
    writeln!(out, " | start = {}", date(first.time)).unwrap();
    writeln!(out, " | end = {}", date(last.time)).unwrap();
    writeln!(out, " | othersource={FILL_ME}").unwrap();
    writeln!(out, " | catname={FILL_ME}").unwrap();
    writeln!(out, " | code={FILL_ME}").unwrap();
    if !config.use_old_color_key() {
        writeln!(out, " | colors=new").unwrap();
    }
    if config.scale() == Scale::Jma {
        writeln!(out, " | scale=JMA").unwrap();
    }
    writeln!(out, "}}}}").unwrap();
    write!(
        out,
        "Edit summary: Refreshing information for {name} as of {}, {:02}00 UTC",
        date(last.time),
        last.time.hour
    )
    .unwrap();
    Some(out)
}
