//! Format adapters for the supported track archives
//!
//! Every archive format is one adapter behind the [`TrackFormat`] trait:
//! - `atcf`: comma-delimited ATCF b-deck records
//! - `hurdat`: legacy fixed-width HURDAT cards
//! - `hurdat2`: comma-delimited HURDAT2
//! - `jma`: JMA best-track, whitespace tokenized
//! - `md`: fixed-width bulletin tables
//! - `tcr`: best-track table pasted from a Tropical Cyclone Report
//!
//! Adapters never fail as a whole. A line that cannot be read is recorded as
//! a [`MalformedRecord`] and parsing moves on to the next line.

mod atcf;
mod collect;
mod hurdat;
mod hurdat2;
mod jma;
mod md;
mod tcr;

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::errors::{IngestError, MalformedRecord, SourceContext};
use crate::types::Storm;

pub use atcf::Atcf;
pub use hurdat::Hurdat;
pub use hurdat2::Hurdat2;
pub use jma::Jma;
pub use md::Md;
pub use tcr::Tcr;

pub(crate) use collect::TrackCollector;

/// The supported archive encodings. Always named explicitly by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Atcf,
    Hurdat,
    Hurdat2,
    Jma,
    Md,
    Tcr,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Format::Atcf,
        Format::Hurdat,
        Format::Hurdat2,
        Format::Jma,
        Format::Md,
        Format::Tcr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Format::Atcf => "atcf",
            Format::Hurdat => "hurdat",
            Format::Hurdat2 => "hurdat2",
            Format::Jma => "jma",
            Format::Md => "md",
            Format::Tcr => "tcr",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized format name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown track format `{0}` (expected one of atcf, hurdat, hurdat2, jma, md, tcr)")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Options shared by all adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop fixes outside 00/06/12/18 UTC (ATCF, HURDAT2, JMA)
    pub skip_asynoptic: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            skip_asynoptic: true,
        }
    }
}

/// Result of reading one source: the storms plus every skipped line.
#[derive(Debug, Default)]
pub struct Ingested {
    pub storms: Vec<Storm>,
    pub malformed: Vec<MalformedRecord>,
}

impl Ingested {
    /// Treat a source that produced no storms as an error.
    pub fn require_storms(self, source_name: &str) -> Result<Vec<Storm>, IngestError> {
        if self.storms.is_empty() {
            Err(IngestError::EmptyResult {
                source_name: source_name.to_string(),
            })
        } else {
            Ok(self.storms)
        }
    }
}

/// Common behavior for all format adapters
#[enum_dispatch]
pub trait TrackFormat {
    /// The encoding this adapter reads
    fn format(&self) -> Format;

    /// Parse a whole source, collecting storms and skipped lines.
    fn parse_source(&self, source: &SourceContext<'_>) -> Ingested;

    /// Parse text and keep only the storms.
    fn parse(&self, text: &str) -> Vec<Storm> {
        self.parse_source(&SourceContext::new("<input>", text)).storms
    }
}

/// One adapter per format, dispatched statically.
#[enum_dispatch(TrackFormat)]
#[derive(Clone, Copy, Debug)]
pub enum Adapter {
    Atcf(Atcf),
    Hurdat(Hurdat),
    Hurdat2(Hurdat2),
    Jma(Jma),
    Md(Md),
    Tcr(Tcr),
}

impl Adapter {
    pub fn new(format: Format, options: ParseOptions) -> Self {
        let skip_asynoptic = options.skip_asynoptic;
        match format {
            Format::Atcf => Atcf { skip_asynoptic }.into(),
            Format::Hurdat => Hurdat.into(),
            Format::Hurdat2 => Hurdat2 { skip_asynoptic }.into(),
            Format::Jma => Jma { skip_asynoptic }.into(),
            Format::Md => Md.into(),
            Format::Tcr => Tcr.into(),
        }
    }
}

impl From<Format> for Adapter {
    fn from(format: Format) -> Self {
        Adapter::new(format, ParseOptions::default())
    }
}

/// Parse `text` in the given format.
pub fn parse(format: Format, text: &str, options: ParseOptions) -> Vec<Storm> {
    Adapter::new(format, options).parse(text)
}
