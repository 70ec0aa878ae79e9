//! JMA (RSMC Tokyo) best-track archive.
//!
//! ```text
//! 66666 9119  053 0002 9119 0 6           MIREILLE              20070417
//! 91091600 002 2 106 1466 1008
//! 91091712 002 3 135 1434 0994     035
//! ```
//! Records are whitespace tokenized. `66666` opens a storm whose code packs
//! a two-digit year and the storm number. Data records carry indicator `002`.
//! Longitude magnitudes are negated on read.

use crate::classify;
use crate::errors::SourceContext;
use crate::parse::{FieldError, checked_timestamp, int_field, knots_field, pressure_field};
use crate::types::{Position, Storm, Timestamp};

use super::{Format, Ingested, TrackCollector, TrackFormat};

const HEADER_SENTINEL: &str = "66666";
const DATA_INDICATOR: &str = "002";
const MIN_TOKENS: usize = 6;

/// Two-digit years above this are 19xx, the rest 20xx.
const CENTURY_PIVOT: i64 = 50;

#[derive(Clone, Copy, Debug, Default)]
pub struct Jma {
    pub skip_asynoptic: bool,
}

impl TrackFormat for Jma {
    fn format(&self) -> Format {
        Format::Jma
    }

    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested {
        let mut tracks = TrackCollector::new(Format::Jma, source);

        for line in source.lines() {
            let tokens: Vec<&str> = line.text.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() < MIN_TOKENS {
                tracks.reject(
                    &line,
                    FieldError::TooFewFields {
                        expected: MIN_TOKENS,
                        found: tokens.len(),
                    },
                );
                continue;
            }

            if tokens[0] == HEADER_SENTINEL {
                match read_header(&tokens) {
                    Ok(storm) => tracks.open(storm),
                    Err(error) => {
                        tracks.close();
                        tracks.reject(&line, error);
                    }
                }
            } else if tokens[1] == DATA_INDICATOR {
                if !tracks.is_open() {
                    tracks.reject(&line, FieldError::Orphan);
                    continue;
                }
                match read_fix(&tokens) {
                    Ok(position) if self.skip_asynoptic && !position.time.is_synoptic() => {}
                    Ok(position) => tracks.push(&line, position),
                    Err(error) => tracks.reject(&line, error),
                }
            } else {
                crate::log::debug!(line = line.number, indicator = tokens[1], "ignoring record");
            }
        }

        tracks.finish()
    }
}

fn full_year(two_digits: i64) -> i32 {
    if two_digits > CENTURY_PIVOT {
        1900 + two_digits as i32
    } else {
        2000 + two_digits as i32
    }
}

fn read_header(tokens: &[&str]) -> Result<Storm, FieldError> {
    let code = int_field(tokens[1])?;
    let name = tokens.get(7).copied().unwrap_or("");
    Ok(Storm::new((code % 100) as u32, name, full_year(code / 100)))
}

/// `YYMMDDHH`
fn stamp(text: &str) -> Result<Timestamp, FieldError> {
    let invalid = || FieldError::Date(text.to_string());
    if text.len() != 8 {
        return Err(invalid());
    }
    let value = int_field(text)?;
    let year = full_year(value / 1_000_000);
    let month = (value / 10_000 % 100) as i32;
    let day = (value / 100 % 100) as i32;
    let hour = (value % 100) as i32;
    checked_timestamp(year, month, day, hour).ok_or_else(invalid)
}

fn read_fix(tokens: &[&str]) -> Result<Position, FieldError> {
    let grade = tokens[2].trim_start_matches('0');
    Ok(Position {
        time: stamp(tokens[0])?,
        lat: int_field(tokens[3])? as f64 / 10.0,
        lon: -(int_field(tokens[4])? as f64 / 10.0),
        wind: knots_field(tokens.get(6).copied().unwrap_or(""))?,
        pressure: pressure_field(tokens[5])?,
        storm_type: classify::JMA.classify(grade),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Hectopascals, Knots, StormType};

    const MIREILLE: &str = "\
66666 9119  053 0002 9119 0 6           MIREILLE              20070417
91091600 002 2 106 1466 1008
91091703 002 2 128 1446 1006
91091712 002 3 135 1434 0994     035
91092800 002 6 458 1502 0984     050
";

    fn parse(text: &str, skip_asynoptic: bool) -> Vec<Storm> {
        Jma { skip_asynoptic }.parse(text)
    }

    #[test]
    fn header_code_and_pivot_year() {
        let storms = parse(MIREILLE, true);
        assert_eq!(storms.len(), 1);
        assert_eq!(storms[0].id, 19);
        assert_eq!(storms[0].year, 1991);
        assert_eq!(storms[0].name, "MIREILLE");
    }

    #[test]
    fn longitude_is_negated() {
        let storms = parse(MIREILLE, true);
        let first = &storms[0].positions[0];
        assert_eq!(first.time, Timestamp::new(1991, 9, 16, 0));
        assert_eq!(first.lat, 10.6);
        assert_eq!(first.lon, -146.6);
        assert_eq!(first.pressure, Hectopascals(1008));
        assert_eq!(first.wind, Knots::UNKNOWN);
    }

    #[test]
    fn grade_six_is_extratropical() {
        let storms = parse(MIREILLE, true);
        let last = storms[0].last().unwrap();
        assert_eq!(last.storm_type, StormType::Extratropical);
        assert_eq!(last.wind, Knots(50));
        assert_eq!(storms[0].positions[1].storm_type, StormType::Tropical);
    }

    #[test]
    fn asynoptic_records_follow_the_flag() {
        assert_eq!(parse(MIREILLE, true)[0].positions.len(), 3);
        assert_eq!(parse(MIREILLE, false)[0].positions.len(), 4);
    }

    #[test]
    fn recent_years_resolve_to_2000s() {
        let text = "\
66666 2305  064 0005 2305 0 6 MAWAR 20230612
23052000 002 2 075 1502 1006
";
        let storms = parse(text, true);
        assert_eq!(storms[0].year, 2023);
        assert_eq!(storms[0].id, 5);
        assert_eq!(storms[0].positions[0].time.year, 2023);
    }

    #[test]
    fn short_records_are_rejected() {
        let text = "\
66666 2305  064 0005 2305 0 6 MAWAR 20230612
23052000 002 2 075
23052006 002 2 080 1499 1004
";
        let ingested = Jma { skip_asynoptic: true }.parse_source(&SourceContext::new("bst", text));
        assert_eq!(ingested.storms[0].positions.len(), 1);
        assert_eq!(ingested.malformed.len(), 1);
        assert_eq!(ingested.malformed[0].line, 2);
    }
}
