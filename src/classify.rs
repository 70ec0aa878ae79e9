//! Native storm-type tokens mapped onto [`StormType`].
//!
//! Each format keeps its own vocabulary and its own fallback for tokens it
//! does not know. The fallbacks differ on purpose: ATCF and JMA read unknown
//! codes as tropical, the HURDAT family and TCR read them as unknown.

use crate::types::StormType;
use StormType::{Extratropical, Low, Subtropical, Tropical, Unknown};

/// A format's token table plus the type used for tokens not in it.
#[derive(Debug)]
pub struct Vocabulary {
    entries: &'static [(&'static str, StormType)],
    fallback: StormType,
}

impl Vocabulary {
    /// Resolve a token; comparison ignores ASCII case and surrounding blanks.
    pub fn classify(&self, token: &str) -> StormType {
        let token = token.trim();
        self.entries
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(token))
            .map(|(_, storm_type)| *storm_type)
            .unwrap_or_else(|| {
                crate::log::debug!(token, fallback = %self.fallback, "unknown storm type token");
                self.fallback
            })
    }

    pub fn fallback(&self) -> StormType {
        self.fallback
    }
}

/// ATCF `TY` column. `LO`, `WV` and `DB` count as extratropical here.
pub static ATCF: Vocabulary = Vocabulary {
    entries: &[
        ("TD", Tropical),
        ("TS", Tropical),
        ("TY", Tropical),
        ("ST", Tropical),
        ("TC", Tropical),
        ("HU", Tropical),
        ("XX", Tropical),
        ("SD", Subtropical),
        ("SS", Subtropical),
        ("EX", Extratropical),
        ("MD", Extratropical),
        ("IN", Extratropical),
        ("DS", Extratropical),
        ("LO", Extratropical),
        ("WV", Extratropical),
        ("ET", Extratropical),
        ("DB", Extratropical),
    ],
    fallback: Tropical,
};

/// Legacy HURDAT single-character stage code preceding each fix.
pub static HURDAT: Vocabulary = Vocabulary {
    entries: &[
        ("*", Tropical),
        ("S", Subtropical),
        ("E", Extratropical),
        ("W", Low),
        ("L", Low),
    ],
    fallback: Unknown,
};

/// HURDAT2 status column.
pub static HURDAT2: Vocabulary = Vocabulary {
    entries: &[
        ("HU", Tropical),
        ("TS", Tropical),
        ("TD", Tropical),
        ("EX", Extratropical),
        ("SD", Subtropical),
        ("SS", Subtropical),
        ("LO", Low),
        ("WV", Low),
        ("DB", Low),
    ],
    fallback: Unknown,
};

/// JMA grade column, leading zeros stripped. Grade 6 is extratropical.
pub static JMA: Vocabulary = Vocabulary {
    entries: &[("6", Extratropical)],
    fallback: Tropical,
};

/// MD bulletins carry no type; every fix is tropical.
pub static MD: Vocabulary = Vocabulary {
    entries: &[],
    fallback: Tropical,
};

/// TCR "Stage" column text.
pub static TCR: Vocabulary = Vocabulary {
    entries: &[
        ("hurricane", Tropical),
        ("tropical storm", Tropical),
        ("tropical depression", Tropical),
        ("extratropical", Extratropical),
        ("low", Low),
        ("remnant low", Low),
        ("tropical wave", Low),
        ("subtropical depression", Subtropical),
        ("subtropical storm", Subtropical),
    ],
    fallback: Unknown,
};
