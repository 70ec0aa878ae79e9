//! Legacy fixed-width HURDAT cards.
//!
//! ```text
//! 00005 06/25/1851 M= 4  1 SNBR=   1 NOT NAMED   XING=1 SSS=1
//! 00010 06/25*  0   0   0    0*280 948  80    0*280 954  80    0*280 960  80    0*
//! 00015 HRBAL3
//! ```
//! A header has `/` at column 11. A daily card has `/` at column 8 followed
//! by four 17-character fix groups for 00, 06, 12 and 18 UTC. Each group
//! starts with the stage character, then latitude and longitude in tenths
//! (longitude measured west), wind and pressure. Groups with a zero
//! position are empty slots. The trailer card is ignored.

use std::ops::Range;

use crate::classify;
use crate::errors::{SourceContext, SourceLine};
use crate::parse::{
    FieldError, checked_timestamp, column, fixed, int_field, knots_field, pressure_field,
};
use crate::types::{Position, Storm};

use super::{Format, Ingested, TrackCollector, TrackFormat};

const HEADER_MARK: usize = 11;
const DAY_MARK: usize = 8;

const HEADER_YEAR: Range<usize> = 12..16;
const HEADER_NUMBER: Range<usize> = 22..24;
const HEADER_NAME: Range<usize> = 35..47;

const CARD_MONTH: Range<usize> = 6..8;
const CARD_DAY: Range<usize> = 9..11;

const FIRST_GROUP: usize = 11;
const GROUP_WIDTH: usize = 17;
const GROUPS_PER_CARD: usize = 4;

#[derive(Clone, Copy, Debug, Default)]
pub struct Hurdat;

/// Year tracking for the open storm; cards only carry month and day.
#[derive(Default)]
struct Season {
    year: i32,
    last_month: i32,
}

impl TrackFormat for Hurdat {
    fn format(&self) -> Format {
        Format::Hurdat
    }

    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested {
        let mut tracks = TrackCollector::new(Format::Hurdat, source);
        let mut season = Season::default();

        for line in source.lines() {
            if line.text.trim().is_empty() {
                continue;
            }
            if column(line.text, HEADER_MARK) == Some(b'/') {
                match read_header(line.text) {
                    Ok(storm) => {
                        season = Season {
                            year: storm.year,
                            last_month: 0,
                        };
                        tracks.open(storm);
                    }
                    Err(error) => {
                        // Cards that follow belong to the unreadable storm
                        tracks.close();
                        tracks.reject(&line, error);
                    }
                }
            } else if column(line.text, DAY_MARK) == Some(b'/') {
                if !tracks.is_open() {
                    tracks.reject(&line, FieldError::Orphan);
                    continue;
                }
                read_card(&mut tracks, &mut season, &line);
            } else {
                crate::log::debug!(line = line.number, text = line.text, "ignoring card");
            }
        }

        tracks.finish()
    }
}

fn read_header(text: &str) -> Result<Storm, FieldError> {
    let year = int_field(fixed(text, HEADER_YEAR))?;
    if year <= 0 {
        return Err(FieldError::Date(fixed(text, HEADER_YEAR).to_string()));
    }
    let number = int_field(fixed(text, HEADER_NUMBER))?;
    let name = fixed(text, HEADER_NAME).trim();
    let name = if name.eq_ignore_ascii_case("NOT NAMED") { "" } else { name };
    Ok(Storm::new(number.max(0) as u32, name, year as i32))
}

fn read_card(tracks: &mut TrackCollector<'_>, season: &mut Season, line: &SourceLine<'_>) {
    let (month, day) = match card_date(line.text) {
        Ok(date) => date,
        Err(error) => return tracks.reject(line, error),
    };
    if month < season.last_month {
        season.year += 1;
    }
    season.last_month = month;

    for slot in 0..GROUPS_PER_CARD {
        let start = FIRST_GROUP + slot * GROUP_WIDTH;
        let group = fixed(line.text, start..start + GROUP_WIDTH);
        if group.trim().is_empty() {
            continue;
        }
        let hour = (slot * 6) as i32;
        match read_group(group, season.year, month, day, hour) {
            Ok(Some(position)) => tracks.push(line, position),
            Ok(None) => {}
            Err(error) => {
                tracks.reject(line, error);
                return;
            }
        }
    }
}

fn card_date(text: &str) -> Result<(i32, i32), FieldError> {
    let month = int_field(fixed(text, CARD_MONTH))?;
    let day = int_field(fixed(text, CARD_DAY))?;
    Ok((month as i32, day as i32))
}

/// One fix group; `None` for an empty slot.
fn read_group(
    group: &str,
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
) -> Result<Option<Position>, FieldError> {
    let lat = int_field(fixed(group, 1..4))? as f64 / 10.0;
    let west = int_field(fixed(group, 4..8))? as f64 / 10.0;
    if lat == 0.0 && west == 0.0 {
        return Ok(None);
    }
    let time = checked_timestamp(year, month, day, hour)
        .ok_or_else(|| FieldError::Date(format!("{year}-{month:02}-{day:02}")))?;
    Ok(Some(Position {
        time,
        lat,
        lon: -west,
        wind: knots_field(fixed(group, 8..12))?,
        pressure: pressure_field(fixed(group, 12..17))?,
        storm_type: classify::HURDAT.classify(fixed(group, 0..1)),
    }))
}
