//! Tropical cyclone track ingestion and map composition.
//!
//! Six archive formats are read into one canonical [`Storm`] model, which can
//! then be filtered, framed in an antimeridian-aware viewport and styled by
//! a wind classification scale for drawing.
//!
//! ```no_run
//! use stormtrack::{Format, MapConfig, ParseOptions, Selection};
//!
//! let ingested = stormtrack::ingest_file("hurdat2.txt", Format::Hurdat2, ParseOptions::default())?;
//! let storms = stormtrack::select(ingested.storms, &Selection::new().year(2005).name("katrina"));
//! let map = stormtrack::compose_map(storms, &MapConfig::default());
//! println!("{} tracks", map.plots.len());
//! # Ok::<(), stormtrack::IngestError>(())
//! ```

use pest_derive::Parser;

pub mod classify;
pub mod config;
pub mod errors;
pub mod formats;
pub mod ingest;
pub mod log;
pub mod metrics;
pub(crate) mod parse;
pub mod render;
pub mod select;
pub mod style;
pub mod template;
pub mod types;
pub mod viewport;

/// Token-level grammar shared by the format adapters
#[derive(Parser)]
#[grammar = "tracks.pest"]
pub struct TrackParser;

pub use config::MapConfig;
pub use errors::{ConfigError, IngestError, MalformedRecord, SourceContext};
pub use formats::{Adapter, Format, Ingested, ParseOptions, TrackFormat, parse};
pub use ingest::{ingest_batch, ingest_file};
pub use metrics::{StormSummary, ace, min_pressure};
pub use render::{
    ComposedMap, MapFrame, Renderer, Segment, ShapeKind, TrackPlot, TrackPoint, compose,
    compose_map, cone_radii,
};
pub use select::{Selection, select, trim_extratropical};
pub use style::{Category, Rgb, Scale, StyleResolver, resolve_category};
pub use template::upload_template;
pub use types::{Hectopascals, Knots, Position, Storm, StormType, Timestamp, UNNAMED};
pub use viewport::{
    Viewport, ViewportOptions, circular_distance, circular_mean, normalize_360, wrap_longitude,
};
