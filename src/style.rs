//! Wind speed to intensity category and color.

use std::fmt;
use std::str::FromStr;

use crate::types::Knots;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Color from a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Self {
        Rgb {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// RGBA bytes with `alpha` in 0.0..=1.0
    pub fn with_alpha(self, alpha: f64) -> [u8; 4] {
        let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        [self.r, self.g, self.b, a]
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Classification scales. Each one is a fixed threshold table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scale {
    /// Saffir-Simpson
    #[default]
    Sshws,
    /// Australian Bureau of Meteorology
    Aus,
    /// India Meteorological Department
    Imd,
    /// Japan Meteorological Agency (international)
    Jma,
    /// Météo-France La Réunion
    Mfr,
    /// Japan Meteorological Agency (domestic)
    Jmadom,
}

impl Scale {
    pub const ALL: [Scale; 6] = [
        Scale::Sshws,
        Scale::Aus,
        Scale::Imd,
        Scale::Jma,
        Scale::Mfr,
        Scale::Jmadom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scale::Sshws => "SSHWS",
            Scale::Aus => "AUS",
            Scale::Imd => "IMD",
            Scale::Jma => "JMA",
            Scale::Mfr => "MFR",
            Scale::Jmadom => "JMADOM",
        }
    }

    /// Threshold table, ascending
    pub fn table(self) -> &'static [Threshold] {
        match self {
            Scale::Sshws => SSHWS,
            Scale::Aus => AUS,
            Scale::Imd => IMD,
            Scale::Jma => JMA,
            Scale::Mfr => MFR,
            Scale::Jmadom => JMADOM,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown classification scale `{0}` (expected SSHWS, AUS, IMD, JMA, MFR or JMADOM)")]
pub struct UnknownScale(pub String);

impl FromStr for Scale {
    type Err = UnknownScale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scale::ALL
            .into_iter()
            .find(|scale| scale.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownScale(s.to_string()))
    }
}

/// One bucket: winds at or above `knots` up to the next bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threshold {
    pub knots: u32,
    pub label: &'static str,
    pub color: Rgb,
}

const fn bucket(knots: u32, label: &'static str, color: u32) -> Threshold {
    Threshold {
        knots,
        label,
        color: Rgb::hex(color),
    }
}

static SSHWS: &[Threshold] = &[
    bucket(0, "TD", 0x5EBAFF),
    bucket(34, "TS", 0x00FAF4),
    bucket(64, "C1", 0xFFFFCC),
    bucket(83, "C2", 0xFFE775),
    bucket(96, "C3", 0xFFC140),
    bucket(113, "C4", 0xFF8F20),
    bucket(137, "C5", 0xFF6060),
];

static AUS: &[Threshold] = &[
    bucket(0, "TL", 0x5EBAFF),
    bucket(34, "C1", 0x00FAF4),
    bucket(48, "C2", 0xFFFFCC),
    bucket(64, "C3", 0xFFC140),
    bucket(86, "C4", 0xFF8F20),
    bucket(108, "C5", 0xFF6060),
];

static IMD: &[Threshold] = &[
    bucket(0, "D", 0x5EBAFF),
    bucket(28, "DD", 0x00FAF4),
    bucket(34, "CS", 0xCCFFFF),
    bucket(48, "SCS", 0xFFFFCC),
    bucket(64, "VSCS", 0xFFC140),
    bucket(90, "ESCS", 0xFF8F20),
    bucket(120, "SuCS", 0xFF6060),
];

static JMA: &[Threshold] = &[
    bucket(0, "TD", 0x5EBAFF),
    bucket(34, "TS", 0x00FAF4),
    bucket(48, "STS", 0xCCFFFF),
    bucket(64, "TY", 0xFFC140),
];

static MFR: &[Threshold] = &[
    bucket(0, "ZD", 0x80CCFF),
    bucket(28, "TD", 0x5EBAFF),
    bucket(34, "MTS", 0x00FAF4),
    bucket(48, "STS", 0xCCFFFF),
    bucket(64, "TC", 0xFFC140),
    bucket(90, "ITC", 0xFF8F20),
    bucket(116, "VITC", 0xFF6060),
];

static JMADOM: &[Threshold] = &[
    bucket(0, "TD", 0x5EBAFF),
    bucket(34, "TS", 0x00FAF4),
    bucket(48, "STS", 0xCCFFFF),
    bucket(64, "STY", 0xFFFFCC),
    bucket(85, "VSTY", 0xFFC140),
    bucket(105, "VITY", 0xFF6060),
];

/// Color for fixes without a wind report, on every scale.
pub const UNKNOWN_COLOR: Rgb = Rgb::hex(0xC0C0C0);
pub const UNKNOWN_LABEL: &str = "UN";

/// A resolved intensity category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub color: Rgb,
}

/// Category for `wind` on `scale`.
///
/// Zero wind means "not reported" and is always neutral gray. Otherwise the
/// last bucket whose threshold does not exceed the wind wins, so anything
/// beyond the table lands in its top bucket.
pub fn resolve_category(wind: Knots, scale: Scale) -> Category {
    if !wind.is_reported() {
        return Category {
            label: UNKNOWN_LABEL,
            color: UNKNOWN_COLOR,
        };
    }
    scale
        .table()
        .iter()
        .take_while(|threshold| threshold.knots <= wind.raw())
        .last()
        .map(|threshold| Category {
            label: threshold.label,
            color: threshold.color,
        })
        .unwrap_or(Category {
            label: UNKNOWN_LABEL,
            color: UNKNOWN_COLOR,
        })
}

/// A resolver bound to one scale, handed to the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StyleResolver {
    scale: Scale,
}

impl StyleResolver {
    pub fn new(scale: Scale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn resolve(&self, wind: Knots) -> Category {
        resolve_category(wind, self.scale)
    }
}
