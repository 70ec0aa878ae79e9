//! Best-track table pasted from a Tropical Cyclone Report.
//!
//! PDF extraction puts every table cell on its own line. The column labels
//! appear first, in order; after them each date line is followed by five
//! value lines:
//!
//! ```text
//! 2004/08/13 0000
//! 21.4
//! -82.8
//! 980
//! 90
//! hurricane
//! ```
//! A report covers one storm, so the result has at most one storm with
//! id 1 and no name. Values are paired by position only, so a cell missing
//! from the extraction shifts every value after it.

use std::ops::Range;

use crate::classify;
use crate::errors::{SourceContext, SourceLine};
use crate::parse::{
    FieldError, checked_timestamp, fixed, float_field, int_field, knots_field, pressure_field,
};
use crate::types::{Position, Storm};

use super::{Format, Ingested, TrackCollector, TrackFormat};

const COLUMN_LABELS: [&str; 6] = [
    "Date/Time",
    "Latitude",
    "Longitude",
    "Pressure",
    "Wind Speed",
    "Stage",
];

/// Value lines that follow each date line
const CELLS_PER_FIX: usize = 5;

const YEAR: Range<usize> = 0..4;
const MONTH: Range<usize> = 5..7;
const DAY: Range<usize> = 8..10;
const HOUR: Range<usize> = 11..13;

#[derive(Clone, Copy, Debug, Default)]
pub struct Tcr;

impl TrackFormat for Tcr {
    fn format(&self) -> Format {
        Format::Tcr
    }

    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested {
        let mut tracks = TrackCollector::new(Format::Tcr, source);
        let lines: Vec<SourceLine<'_>> = source.lines().collect();

        let Some(table_start) = find_table(&lines) else {
            crate::log::debug!(source = source.name, "no best-track table found");
            return tracks.finish();
        };

        let mut index = table_start;
        while index < lines.len() {
            let line = &lines[index];
            if !line.text.contains('/') {
                index += 1;
                continue;
            }
            if !tracks.is_open() {
                tracks.open(Storm::new(1, "", 0));
            }
            match read_fix(line.text, &lines[index + 1..]) {
                Ok(position) => {
                    tracks.push(line, position);
                    index += 1 + CELLS_PER_FIX;
                }
                Err(error) => {
                    tracks.reject(line, error);
                    index += 1;
                }
            }
        }

        // Reports carry no season line; take it from the earliest fix
        if let Some(storm) = tracks.current_mut() {
            if let Some(first) = storm.positions.iter().map(|position| position.time).min() {
                storm.year = first.year;
            }
        }
        tracks.finish()
    }
}

/// Index of the first line after the last column label.
fn find_table(lines: &[SourceLine<'_>]) -> Option<usize> {
    let mut wanted = COLUMN_LABELS.iter().peekable();
    for (index, line) in lines.iter().enumerate() {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }
        if wanted.next_if(|label| **label == text).is_some() && wanted.peek().is_none() {
            return Some(index + 1);
        }
    }
    None
}

fn read_fix(date: &str, cells: &[SourceLine<'_>]) -> Result<Position, FieldError> {
    if cells.len() < CELLS_PER_FIX {
        return Err(FieldError::Truncated);
    }
    let cell = |index: usize| cells[index].text.trim();

    let date = date.trim();
    let year = int_field(fixed(date, YEAR))?;
    let month = int_field(fixed(date, MONTH))?;
    let day = int_field(fixed(date, DAY))?;
    let hour = int_field(fixed(date, HOUR))?;
    let time = checked_timestamp(year as i32, month as i32, day as i32, hour as i32)
        .ok_or_else(|| FieldError::Date(date.to_string()))?;

    Ok(Position {
        time,
        lat: float_field(cell(0))?,
        lon: float_field(cell(1))?,
        pressure: pressure_field(cell(2))?,
        wind: knots_field(cell(3))?,
        storm_type: classify::TCR.classify(cell(4)),
    })
}
