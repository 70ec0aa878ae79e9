//! Canonical track model shared by every format adapter.
//!
//! Design goals:
//! - Wind and pressure are typed integers, never raw strings
//! - Coordinates are always populated (0.0 when a field is blank)
//! - A storm's positions are kept in chronological order

use std::fmt;

use glam::{DVec2, dvec2};

/// Name given to storms whose source carries none.
pub const UNNAMED: &str = "UNNAMED";

/// Observation time of a fix, hour in UTC.
///
/// Field order gives the chronological ordering used to sort tracks.
/// Formats without dates (MD) leave every field at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
}

impl Timestamp {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8) -> Self {
        Timestamp { year, month, day, hour }
    }

    /// One of the four standard observation times (00/06/12/18 UTC)
    #[inline]
    pub fn is_synoptic(self) -> bool {
        self.hour % 6 == 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}Z",
            self.year, self.month, self.day, self.hour
        )
    }
}

/// Sustained wind speed in knots. Zero means "not reported".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Knots(pub u32);

impl Knots {
    pub const UNKNOWN: Knots = Knots(0);

    /// Clamp a signed source value; negative sentinels (-99) become unknown.
    #[inline]
    pub fn from_signed(value: i64) -> Knots {
        Knots(value.clamp(0, u32::MAX as i64) as u32)
    }

    #[inline]
    pub fn is_reported(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Knots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kt", self.0)
    }
}

/// Central pressure in hPa. Zero means "not reported".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Hectopascals(pub u32);

impl Hectopascals {
    pub const UNKNOWN: Hectopascals = Hectopascals(0);

    /// Clamp a signed source value; negative sentinels (-999) become unknown.
    #[inline]
    pub fn from_signed(value: i64) -> Hectopascals {
        Hectopascals(value.clamp(0, u32::MAX as i64) as u32)
    }

    #[inline]
    pub fn is_reported(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Hectopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hPa", self.0)
    }
}

/// Cyclone phase at a fix, shared by every format's type vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StormType {
    Tropical,
    Subtropical,
    Extratropical,
    Low,
    Unknown,
}

impl StormType {
    pub fn as_str(self) -> &'static str {
        match self {
            StormType::Tropical => "TROPICAL",
            StormType::Subtropical => "SUBTROPICAL",
            StormType::Extratropical => "EXTRATROPICAL",
            StormType::Low => "LOW",
            StormType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for StormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fix along a storm's path.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub time: Timestamp,
    /// Degrees, positive north
    pub lat: f64,
    /// Degrees, positive east, within -180..=180
    pub lon: f64,
    pub wind: Knots,
    pub pressure: Hectopascals,
    pub storm_type: StormType,
}

impl Position {
    /// Longitude/latitude as an (x, y) vector
    #[inline]
    pub fn lon_lat(&self) -> DVec2 {
        dvec2(self.lon, self.lat)
    }
}

/// One cyclone life cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Storm {
    /// Sequence number within basin/year; meaning depends on the source format
    pub id: u32,
    pub name: String,
    pub year: i32,
    /// Basin code (`AL`, `EP`, `WP`, ...) for formats that encode one
    pub basin: Option<String>,
    pub positions: Vec<Position>,
}

impl Storm {
    /// Create an empty storm. Blank names become [`UNNAMED`]; names are uppercased.
    pub fn new(id: u32, name: &str, year: i32) -> Self {
        let name = name.trim();
        Storm {
            id,
            name: if name.is_empty() {
                UNNAMED.to_string()
            } else {
                name.to_uppercase()
            },
            year,
            basin: None,
            positions: Vec::new(),
        }
    }

    pub fn with_basin(mut self, basin: &str) -> Self {
        let basin = basin.trim();
        self.basin = (!basin.is_empty()).then(|| basin.to_uppercase());
        self
    }

    /// Highest wind over the whole track, zero when there are no fixes
    pub fn peak_wind(&self) -> Knots {
        self.positions
            .iter()
            .map(|p| p.wind)
            .max()
            .unwrap_or(Knots::UNKNOWN)
    }

    pub fn first(&self) -> Option<&Position> {
        self.positions.first()
    }

    pub fn last(&self) -> Option<&Position> {
        self.positions.last()
    }
}
