//! Storm accumulation shared by the adapters.
//!
//! A storm is opened by its header line, collects fixes from the lines that
//! follow, and is finalized when the next header or the end of input is
//! reached. Storms that end up with no fixes are dropped.

use crate::errors::{MalformedRecord, SourceContext, SourceLine};
use crate::parse::FieldError;
use crate::types::{Position, Storm};
use crate::viewport::wrap_longitude;

use super::{Format, Ingested};

pub(crate) struct TrackCollector<'s> {
    format: Format,
    source: &'s SourceContext<'s>,
    current: Option<Storm>,
    storms: Vec<Storm>,
    malformed: Vec<MalformedRecord>,
}

impl<'s> TrackCollector<'s> {
    pub fn new(format: Format, source: &'s SourceContext<'s>) -> Self {
        Self {
            format,
            source,
            current: None,
            storms: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Finalize the open storm (if any) and start a new one.
    pub fn open(&mut self, storm: Storm) {
        self.close();
        crate::log::debug!(format = %self.format, id = storm.id, name = %storm.name, year = storm.year, "storm header");
        self.current = Some(storm);
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_mut(&mut self) -> Option<&mut Storm> {
        self.current.as_mut()
    }

    /// Most recent fix of the open storm
    pub fn last_position(&self) -> Option<&Position> {
        self.current.as_ref().and_then(|storm| storm.positions.last())
    }

    /// Add a fix to the open storm after range-checking its coordinates.
    pub fn push(&mut self, line: &SourceLine<'_>, mut position: Position) {
        if !(-90.0..=90.0).contains(&position.lat) {
            self.reject(line, FieldError::LatitudeRange(position.lat));
            return;
        }
        if !position.lon.is_finite() {
            self.reject(line, FieldError::Longitude(position.lon));
            return;
        }
        position.lon = wrap_longitude(position.lon);

        match self.current.as_mut() {
            Some(storm) => storm.positions.push(position),
            None => self.reject(line, FieldError::Orphan),
        }
    }

    /// Record a skipped line.
    pub fn reject(&mut self, line: &SourceLine<'_>, error: FieldError) {
        crate::log::warn!(format = %self.format, line = line.number, %error, "skipping malformed record");
        self.malformed.push(MalformedRecord {
            format: self.format,
            line: line.number,
            reason: error.to_string(),
            src: self.source.named_source(),
            span: line.span(),
        });
    }

    /// Finalize the open storm without starting another.
    pub fn close(&mut self) {
        let Some(mut storm) = self.current.take() else {
            return;
        };
        if storm.positions.is_empty() {
            crate::log::debug!(id = storm.id, name = %storm.name, "dropping storm without fixes");
            return;
        }
        // Stable: undated formats keep their file order
        storm.positions.sort_by_key(|position| position.time);
        self.storms.push(storm);
    }

    pub fn finish(mut self) -> Ingested {
        self.close();
        crate::log::info!(
            format = %self.format,
            source = self.source.name,
            storms = self.storms.len(),
            skipped = self.malformed.len(),
            "parsed track source"
        );
        Ingested {
            storms: self.storms,
            malformed: self.malformed,
        }
    }
}
