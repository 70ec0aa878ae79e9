//! HURDAT2 comma-delimited best track.
//!
//! ```text
//! AL092021,                IDA,     40,
//! 20210826, 1200,  , TD, 16.5N,  78.9W,  30, 1006,  ...
//! 20210829, 1655, L, HU, 29.1N,  90.2W, 130,  931,  ...
//! ```
//! Headers start with a basin prefix; the code packs basin, storm number and
//! year. Data lines start with an 8-digit date, or with `M/D/YYYY` in some
//! derived files.

use crate::classify;
use crate::errors::SourceContext;
use crate::parse::{
    FieldError, checked_timestamp, compact_date, coordinate_field, fixed, int_field, knots_field,
    pressure_field, require_fields, slash_date, split_record,
};
use crate::types::{Position, Storm, Timestamp};

use super::{Format, Ingested, TrackCollector, TrackFormat};

const BASIN_PREFIXES: [&str; 4] = ["AL", "EP", "CP", "MT"];
const HEADER_FIELDS: usize = 3;
const DATA_FIELDS: usize = 6;

#[derive(Clone, Copy, Debug, Default)]
pub struct Hurdat2 {
    pub skip_asynoptic: bool,
}

impl TrackFormat for Hurdat2 {
    fn format(&self) -> Format {
        Format::Hurdat2
    }

    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested {
        let mut tracks = TrackCollector::new(Format::Hurdat2, source);

        for line in source.lines() {
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }

            if is_header(text) {
                let fields = split_record(text);
                match require_fields(&fields, HEADER_FIELDS) {
                    Ok(()) => tracks.open(read_header(&fields)),
                    Err(error) => {
                        tracks.close();
                        tracks.reject(&line, error);
                    }
                }
                continue;
            }

            if !is_data(text) {
                crate::log::debug!(line = line.number, "ignoring line");
                continue;
            }
            if !tracks.is_open() {
                tracks.reject(&line, FieldError::Orphan);
                continue;
            }

            let fields = split_record(text);
            let fix = require_fields(&fields, DATA_FIELDS).and_then(|()| read_fix(&fields));
            match fix {
                Ok((position, minutes)) => {
                    let asynoptic = !position.time.is_synoptic() || minutes != 0;
                    if self.skip_asynoptic && asynoptic {
                        continue;
                    }
                    tracks.push(&line, position);
                }
                Err(error) => tracks.reject(&line, error),
            }
        }

        tracks.finish()
    }
}

fn is_header(text: &str) -> bool {
    BASIN_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

fn is_data(text: &str) -> bool {
    text.contains('/') || text.get(..8).is_some_and(|head| head.bytes().all(|b| b.is_ascii_digit()))
}

/// `AL092021` → basin `AL`, number 9, year 2021.
fn read_header(fields: &[&str]) -> Storm {
    let code = fields[0];
    let digits = |text: &str| -> Option<i64> {
        (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()))
            .then(|| text.parse().ok())
            .flatten()
    };
    let number = code.get(2..4).and_then(digits).unwrap_or(0);
    let year = code
        .len()
        .checked_sub(4)
        .and_then(|start| code.get(start..))
        .and_then(digits)
        .unwrap_or(0);
    Storm::new(number as u32, fields[1], year as i32).with_basin(fixed(code, 0..2))
}

/// The fix plus the minutes of its observation time.
fn read_fix(fields: &[&str]) -> Result<(Position, i64), FieldError> {
    let field = |index: usize| fields.get(index).copied().unwrap_or("");
    let (hour, minutes) = clock(fields[1])?;
    let time = fix_date(fields[0], hour)?;
    let position = Position {
        time,
        lat: coordinate_field(fields[4], 1.0)?,
        lon: coordinate_field(fields[5], 1.0)?,
        wind: knots_field(field(6))?,
        pressure: pressure_field(field(7))?,
        storm_type: classify::HURDAT2.classify(fields[3]),
    };
    Ok((position, minutes))
}

fn fix_date(text: &str, hour: i64) -> Result<Timestamp, FieldError> {
    let invalid = || FieldError::Date(text.to_string());
    let (year, month, day) = if text.contains('/') {
        slash_date(text)?
    } else {
        let date = compact_date(text)?;
        (date.year, date.month, date.day)
    };
    checked_timestamp(year, month as i32, day as i32, hour as i32).ok_or_else(invalid)
}

/// `HHMM`, `HH` or `HHZ`; blank reads as midnight.
fn clock(text: &str) -> Result<(i64, i64), FieldError> {
    let text = text.trim().trim_end_matches(['Z', 'z']);
    if text.len() >= 4 {
        Ok((int_field(fixed(text, 0..2))?, int_field(fixed(text, 2..4))?))
    } else {
        Ok((int_field(text)?, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Hectopascals, Knots, StormType};

    const ANA: &str = "\
AL012023,                ANA,      2,
20230601, 0000,  , TS, 25.3N,  86.6W,  35, 1006,
20230601, 0600,  , TS, 25.6N,  86.9W,  35, 1006,
";

    fn parse(text: &str, skip_asynoptic: bool) -> Vec<Storm> {
        Hurdat2 { skip_asynoptic }.parse(text)
    }

    #[test]
    fn header_code_is_unpacked() {
        let storms = parse(ANA, true);
        assert_eq!(storms.len(), 1);
        assert_eq!(storms[0].id, 1);
        assert_eq!(storms[0].name, "ANA");
        assert_eq!(storms[0].year, 2023);
        assert_eq!(storms[0].basin.as_deref(), Some("AL"));
        assert_eq!(storms[0].positions.len(), 2);
    }

    #[test]
    fn fix_fields() {
        let storms = parse(ANA, true);
        let fix = &storms[0].positions[1];
        assert_eq!(fix.time, Timestamp::new(2023, 6, 1, 6));
        assert_eq!(fix.lat, 25.6);
        assert_eq!(fix.lon, -86.9);
        assert_eq!(fix.wind, Knots(35));
        assert_eq!(fix.pressure, Hectopascals(1006));
        assert_eq!(fix.storm_type, StormType::Tropical);
    }

    #[test]
    fn landfall_fixes_are_asynoptic() {
        let text = "\
AL092021,                IDA,      3,
20210829, 1200,  , HU, 28.5N,  89.6W, 130,  929,
20210829, 1655, L, HU, 29.1N,  90.2W, 130,  931,
20210829, 1800,  , HU, 29.2N,  90.3W, 125,  932,
";
        assert_eq!(parse(text, true)[0].positions.len(), 2);
        assert_eq!(parse(text, false)[0].positions.len(), 3);
    }

    #[test]
    fn missing_pressure_is_unknown() {
        let text = "\
EP011949,            UNNAMED,      1,
19490611, 0000,  , TS, 20.2N, 106.3W,  45, -999,
";
        let storms = parse(text, true);
        assert_eq!(storms[0].name, "UNNAMED");
        assert_eq!(storms[0].basin.as_deref(), Some("EP"));
        assert_eq!(storms[0].positions[0].pressure, Hectopascals::UNKNOWN);
    }

    #[test]
    fn slash_dates_are_accepted() {
        let text = "\
AL011851,            UNNAMED,     1,
06/25/1851, 18Z,  , LO, 28.0N, 94.8W,  0,  0,
";
        let storms = parse(text, true);
        let fix = &storms[0].positions[0];
        assert_eq!(fix.time, Timestamp::new(1851, 6, 25, 18));
        assert_eq!(fix.storm_type, StormType::Low);
        assert_eq!(fix.wind, Knots::UNKNOWN);
    }

    #[test]
    fn storms_split_on_headers() {
        let text = "\
AL012023,                ANA,      1,
20230601, 0000,  , TS, 25.3N,  86.6W,  35, 1006,
AL022023,              ARLENE,     1,
20230602, 1800,  , TD, 26.0N,  85.0W,  30, 1008,
";
        let storms = parse(text, true);
        let names: Vec<_> = storms.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ANA", "ARLENE"]);
        assert_eq!(storms[1].id, 2);
    }

    #[test]
    fn bad_lines_are_reported_and_skipped() {
        let text = "\
20230601, 0000,  , TS, 25.3N,  86.6W,  35, 1006,
AL012023,                ANA,      2,
20230601, 0600,  , TS, 25.6N
20230601, 1200,  , TS, 25.9X,  87.1W,  35, 1006,
20230601, 1800,  , TS, 26.1N,  87.4W,  35, 1006,
";
        let ingested = Hurdat2 { skip_asynoptic: true }
            .parse_source(&SourceContext::new("hurdat2.txt", text));
        assert_eq!(ingested.storms[0].positions.len(), 1);
        let lines: Vec<_> = ingested.malformed.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }
}
