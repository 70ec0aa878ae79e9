//! Fixed-width bulletin tables.
//!
//! ```text
//! CYCLONE FANI
//! #   Date/Time(UTC)       Lon     Lat  Wind   Pres
//! 1   26/0300             88.5     5.9   25     1004
//! ```
//! A line starting with a letter names a new storm; a line with a letter at
//! column 4 is the column header and is skipped. Columns are counted after
//! trimming the line. The tables carry no usable dates, so every fix gets
//! the zero timestamp and file order is kept.

use std::ops::Range;

use crate::classify;
use crate::errors::SourceContext;
use crate::parse::{FieldError, fixed, float_field, knots_field, pressure_field};
use crate::types::{Position, Storm, Timestamp};

use super::{Format, Ingested, TrackCollector, TrackFormat};

const SUBHEADER_MARK: usize = 4;

const LON: Range<usize> = 22..28;
const LAT: Range<usize> = 31..36;
const WIND: Range<usize> = 37..41;
const PRESSURE: Range<usize> = 45..50;

#[derive(Clone, Copy, Debug, Default)]
pub struct Md;

impl TrackFormat for Md {
    fn format(&self) -> Format {
        Format::Md
    }

    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested {
        let mut tracks = TrackCollector::new(Format::Md, source);
        let mut next_id = 1;

        for line in source.lines() {
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }
            if starts_alphabetic(text) {
                tracks.open(Storm::new(next_id, text, 0));
                next_id += 1;
                continue;
            }
            if text.get(SUBHEADER_MARK..).is_some_and(starts_alphabetic) {
                continue;
            }
            if !tracks.is_open() {
                tracks.reject(&line, FieldError::Orphan);
                continue;
            }
            match read_fix(text) {
                Ok(position) => tracks.push(&line, position),
                Err(error) => tracks.reject(&line, error),
            }
        }

        tracks.finish()
    }
}

fn starts_alphabetic(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_alphabetic)
}

fn read_fix(text: &str) -> Result<Position, FieldError> {
    if text.len() < LAT.end {
        return Err(FieldError::ShortLine {
            expected: LAT.end,
            found: text.len(),
        });
    }
    Ok(Position {
        time: Timestamp::default(),
        lat: float_field(fixed(text, LAT))?,
        lon: float_field(fixed(text, LON))?,
        wind: knots_field(fixed(text, WIND))?,
        pressure: pressure_field(fixed(text, PRESSURE))?,
        storm_type: classify::MD.fallback(),
    })
}
