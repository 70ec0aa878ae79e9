//! Default map settings (sizes in degrees unless noted)

/// Horizontal resolution of the output image, in pixels
pub const RESOLUTION: u32 = 1024;
/// Radius of a fix marker
pub const DOT_SIZE: f64 = 0.3;
/// Width of connecting segments
pub const LINE_WIDTH: f64 = 0.075;
pub const ALPHA: f64 = 1.0;
/// Extra space around the data on every side of the viewport
pub const PADDING_DEGREES: f64 = 10.0;
/// Smallest viewport extent on either axis
pub const MIN_SPAN_DEGREES: f64 = 1.0;
pub const ASPECT_RATIO: f64 = 16.0 / 9.0;
pub const SKIP_ASYNOPTIC: bool = true;
pub const KEEP_EXTRATROPICAL: bool = false;

/// First forecast cone radius
pub const CONE_BASE: f64 = 0.4;
/// Radius growth per point for short forecasts
pub const CONE_STEP: f64 = 0.2;
/// Longer forecasts share this total growth
pub const CONE_SPREAD: f64 = 1.5;
pub const CONE_SHORT_LIMIT: usize = 10;
