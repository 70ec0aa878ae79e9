//! ATCF best-track ("b-deck") records.
//!
//! ```text
//! AL, 01, 2023060118,   , BEST,   0, 251N,  915W,  25, 1009, DB, ...
//! ```
//! Column 1 is the storm number; a change in it starts a new storm. Wind
//! radii rows repeat the same fix, so only the first row per time is kept.

use crate::classify;
use crate::errors::SourceContext;
use crate::parse::{
    FieldError, compact_date, coordinate_field, knots_field, pressure_field, require_fields,
    split_record,
};
use crate::types::{Hectopascals, Knots, Position, Storm};

use super::{Format, Ingested, TrackCollector, TrackFormat};

const MIN_FIELDS: usize = 9;
const BASIN: usize = 0;
const STORM_NUMBER: usize = 1;
const DATE: usize = 2;
const LAT: usize = 6;
const LON: usize = 7;
const WIND: usize = 8;
const PRESSURE: usize = 9;
const STORM_TYPE: usize = 10;
const NAME: usize = 27;

#[derive(Clone, Copy, Debug, Default)]
pub struct Atcf {
    pub skip_asynoptic: bool,
}

impl TrackFormat for Atcf {
    fn format(&self) -> Format {
        Format::Atcf
    }

    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested {
        let mut tracks = TrackCollector::new(Format::Atcf, source);
        let mut open_number: Option<String> = None;

        for line in source.lines() {
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }
            let fields = split_record(text);
            if let Err(error) = require_fields(&fields, MIN_FIELDS) {
                tracks.reject(&line, error);
                continue;
            }

            if open_number.as_deref() != Some(fields[STORM_NUMBER]) {
                tracks.open(storm_header(&fields));
                open_number = Some(fields[STORM_NUMBER].to_string());
            }

            let position = match read_fix(&fields) {
                Ok(position) => position,
                Err(error) => {
                    tracks.reject(&line, error);
                    continue;
                }
            };
            if self.skip_asynoptic && !position.time.is_synoptic() {
                continue;
            }
            if tracks
                .last_position()
                .is_some_and(|last| last.time == position.time)
            {
                continue;
            }
            tracks.push(&line, position);
        }

        tracks.finish()
    }
}

fn storm_header(fields: &[&str]) -> Storm {
    let id = fields[STORM_NUMBER].parse().unwrap_or(0);
    let year = fields[DATE]
        .get(..4)
        .and_then(|year| year.parse().ok())
        .unwrap_or(0);
    let name = fields.get(NAME).copied().unwrap_or("");
    Storm::new(id, name, year).with_basin(fields[BASIN])
}

fn read_fix(fields: &[&str]) -> Result<Position, FieldError> {
    let field = |index: usize| fields.get(index).copied().unwrap_or("");
    Ok(Position {
        time: compact_date(fields[DATE])?,
        lat: coordinate_field(fields[LAT], 10.0)?,
        lon: coordinate_field(fields[LON], 10.0)?,
        // Non-numeric wind or pressure reads as "not reported"
        wind: knots_field(field(WIND)).unwrap_or(Knots::UNKNOWN),
        pressure: pressure_field(field(PRESSURE)).unwrap_or(Hectopascals::UNKNOWN),
        storm_type: classify::ATCF.classify(field(STORM_TYPE)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StormType;

    const TWO_STORMS: &str = "\
AL, 01, 2023060118,   , BEST,   0, 251N,  915W,  25, 1009, DB
AL, 01, 2023060200,   , BEST,   0, 260N,  924W,  35, 1006, TS
AL, 02, 2023061918,   , BEST,   0, 112N,  402W,  30, 1008, TD
AL, 02, 2023062000,   , BEST,   0, 115N,  418W,  40, 1005, TS
AL, 02, 2023062006,   , BEST,   0, 118N,  433W,  45, 1002, TS
";

    fn parse(text: &str, skip_asynoptic: bool) -> Vec<Storm> {
        Atcf { skip_asynoptic }.parse(text)
    }

    #[test]
    fn storm_number_change_starts_new_storm() {
        let storms = parse(TWO_STORMS, true);
        assert_eq!(storms.len(), 2);
        assert_eq!(storms[0].id, 1);
        assert_eq!(storms[0].positions.len(), 2);
        assert_eq!(storms[1].id, 2);
        assert_eq!(storms[1].positions.len(), 3);
        assert_eq!(storms[1].basin.as_deref(), Some("AL"));
        assert_eq!(storms[1].year, 2023);
    }

    #[test]
    fn coordinates_are_tenths_with_hemisphere() {
        let storms = parse(TWO_STORMS, true);
        let first = &storms[0].positions[0];
        assert_eq!(first.lat, 25.1);
        assert_eq!(first.lon, -91.5);
        assert_eq!(first.wind, Knots(25));
        assert_eq!(first.pressure, Hectopascals(1009));
        // DB counts as extratropical in ATCF
        assert_eq!(first.storm_type, StormType::Extratropical);
    }

    #[test]
    fn hemisphere_without_magnitude_reads_as_zero() {
        let line = "AL, 01, 2023060118,   , BEST,   0, N,  915W,  25, 1009, TS\n";
        let storms = parse(line, true);
        assert_eq!(storms.len(), 1);
        assert_eq!(storms[0].positions[0].lat, 0.0);
        assert_eq!(storms[0].positions[0].lon, -91.5);
    }

    #[test]
    fn missing_name_column_is_unnamed() {
        let storms = parse(TWO_STORMS, true);
        assert_eq!(storms[0].name, "UNNAMED");
    }

    #[test]
    fn name_is_read_from_column_27() {
        let line = "WP, 05, 2023052000,   , BEST,   0,  75N, 1502E,  25, 1006, TD,  34, NEQ,    0,    0,    0,    0, 1008,  180,  40,   0,   0,   W,   0,    ,   0,   0,      MAWAR, S,\n";
        let storms = parse(line, true);
        assert_eq!(storms[0].name, "MAWAR");
        assert_eq!(storms[0].positions[0].lon, 150.2);
    }

    #[test]
    fn wind_radii_rows_are_collapsed() {
        let text = "\
AL, 03, 2023080100,   , BEST,   0, 200N,  600W,  70,  985, HU,  34, NEQ
AL, 03, 2023080100,   , BEST,   0, 200N,  600W,  70,  985, HU,  50, NEQ
AL, 03, 2023080100,   , BEST,   0, 200N,  600W,  70,  985, HU,  64, NEQ
AL, 03, 2023080106,   , BEST,   0, 205N,  610W,  75,  980, HU,  34, NEQ
";
        let storms = parse(text, true);
        assert_eq!(storms[0].positions.len(), 2);
    }

    #[test]
    fn asynoptic_fixes_follow_the_flag() {
        let text = "\
AL, 04, 2023090100,   , BEST,   0, 200N,  600W,  70,  985, HU
AL, 04, 2023090103,   , BEST,   0, 202N,  603W,  72,  984, HU
AL, 04, 2023090106,   , BEST,   0, 205N,  610W,  75,  980, HU
";
        assert_eq!(parse(text, true)[0].positions.len(), 2);
        assert_eq!(parse(text, false)[0].positions.len(), 3);
    }

    #[test]
    fn short_and_garbled_lines_are_skipped() {
        let text = "\
AL, 05, 2023090100
AL, 05, 2023090100,   , BEST,   0, 20XN,  600W,  70,  985, HU
AL, 05, 2023090106,   , BEST,   0, 205N,  610W,  75,  980, HU
";
        let ingested = Atcf { skip_asynoptic: true }
            .parse_source(&SourceContext::new("bal052023.dat", text));
        assert_eq!(ingested.storms.len(), 1);
        assert_eq!(ingested.storms[0].positions.len(), 1);
        let lines: Vec<_> = ingested.malformed.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }
}
