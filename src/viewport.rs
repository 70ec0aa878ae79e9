//! Geographic window fitting with antimeridian handling
//!
//! Longitudes are treated as angles: the window is centered on the circular
//! mean of all fixes, sized by the largest circular distance from that
//! center, and kept in an unwrapped domain until the very end. Only the
//! reported bounds are wrapped back to [-180, 180]; the unwrapped "view"
//! bounds are what per-point re-projection and pixel mapping use.

use glam::{DVec2, dvec2};

use crate::render::defaults;
use crate::types::Storm;

/// Map a longitude into [-180, 180]. Values already in range are returned as-is,
/// so both -180 and 180 survive.
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Map a longitude into [0, 360).
pub fn normalize_360(lon: f64) -> f64 {
    let lon = lon.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360
    if lon >= 360.0 { 0.0 } else { lon }
}

/// Mean direction of a set of longitudes, in [0, 360).
///
/// Averages the unit vectors of the angles, so `[350, 10]` gives 0 rather
/// than 180. Returns `None` for an empty slice.
pub fn circular_mean(lons: &[f64]) -> Option<f64> {
    if lons.is_empty() {
        return None;
    }
    let sum = lons
        .iter()
        .map(|lon| {
            let (sin, cos) = lon.to_radians().sin_cos();
            dvec2(cos, sin)
        })
        .fold(DVec2::ZERO, |acc, v| acc + v);
    let mean = sum / lons.len() as f64;
    Some(normalize_360(mean.y.atan2(mean.x).to_degrees()))
}

/// Angular separation of two longitudes, in [0, 180].
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let delta = normalize_360(a - b);
    delta.min(360.0 - delta)
}

/// Fitting parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportOptions {
    /// Degrees added around the data on every side
    pub padding: f64,
    /// Target width / height
    pub aspect: f64,
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            padding: defaults::PADDING_DEGREES,
            aspect: defaults::ASPECT_RATIO,
        }
    }
}

/// A longitude/latitude window sized to a set of storms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Western edge in [-180, 180]; greater than `lon_max` when the window
    /// straddles the antimeridian
    pub lon_min: f64,
    /// Eastern edge in [-180, 180]
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    /// Unwrapped western edge, may be below -180
    pub view_lon_min: f64,
    /// Unwrapped eastern edge, may be above 180
    pub view_lon_max: f64,
    /// Window center, in (-180, 180]
    pub center_lon: f64,
}

impl Viewport {
    /// The whole globe, 360 by 180 degrees.
    pub fn globe() -> Self {
        Viewport {
            lon_min: -180.0,
            lon_max: 180.0,
            lat_min: -90.0,
            lat_max: 90.0,
            view_lon_min: -180.0,
            view_lon_max: 180.0,
            center_lon: 0.0,
        }
    }

    /// Fit a window around every fix of `storms`.
    ///
    /// Latitude gets `padding` on both sides. Longitude is centered on the
    /// circular mean and extends `padding` past the farthest fix, capped at
    /// the full globe. Each axis spans at least
    /// [`MIN_SPAN_DEGREES`](defaults::MIN_SPAN_DEGREES), so a lone fix still
    /// gets an area. The narrower axis is then widened to the target aspect
    /// ratio; nothing is ever shrunk. Without fixes the whole globe is
    /// framed at that aspect ratio.
    pub fn fit(storms: &[Storm], options: ViewportOptions) -> Self {
        let positions = storms.iter().flat_map(|storm| &storm.positions);
        let (lons, lats): (Vec<f64>, Vec<f64>) = positions
            .map(|position| (normalize_360(position.lon), position.lat))
            .unzip();

        let Some(mean) = circular_mean(&lons) else {
            crate::log::debug!("no fixes to fit, using the whole globe");
            return Viewport::framed(0.0, DVec2::ZERO, dvec2(360.0, 180.0), options.aspect);
        };

        let lat_min = lats.iter().copied().fold(f64::INFINITY, f64::min) - options.padding;
        let lat_max = lats.iter().copied().fold(f64::NEG_INFINITY, f64::max) + options.padding;

        let center_lon = if mean > 180.0 { mean - 360.0 } else { mean };
        let farthest = lons
            .iter()
            .map(|&lon| circular_distance(mean, lon))
            .fold(0.0, f64::max);
        let lon_span = (2.0 * (farthest + options.padding)).min(360.0);

        let center = dvec2(center_lon, (lat_min + lat_max) / 2.0);
        let size =
            dvec2(lon_span, lat_max - lat_min).max(DVec2::splat(defaults::MIN_SPAN_DEGREES));
        let viewport = Viewport::framed(center_lon, center, size, options.aspect);
        crate::log::debug!(?viewport, "fitted viewport");
        viewport
    }

    /// Window of `size` around `center`, widened to `aspect`.
    fn framed(center_lon: f64, center: DVec2, size: DVec2, aspect: f64) -> Self {
        let size = widen_to_aspect(size, aspect);
        let min = center - size / 2.0;
        let max = center + size / 2.0;

        let (lon_min, lon_max) = if size.x >= 360.0 {
            (-180.0, 180.0)
        } else {
            (wrap_longitude(min.x), wrap_longitude(max.x))
        };

        Viewport {
            lon_min,
            lon_max,
            lat_min: min.y,
            lat_max: max.y,
            view_lon_min: min.x,
            view_lon_max: max.x,
            center_lon,
        }
    }

    /// Move a longitude by whole turns so it lies within 180° of the center.
    ///
    /// Consecutive fixes of a track that crosses the antimeridian stay
    /// adjacent after re-projection, so a polyline through them is drawn
    /// across the seam instead of around the globe.
    pub fn reproject(&self, lon: f64) -> f64 {
        self.center_lon + (lon - self.center_lon + 180.0).rem_euclid(360.0) - 180.0
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.lon_min > self.lon_max
    }

    /// Unwrapped width and height in degrees
    pub fn size(&self) -> DVec2 {
        dvec2(
            self.view_lon_max - self.view_lon_min,
            self.lat_max - self.lat_min,
        )
    }
}

/// Expand the narrower axis of `size` so that width / height == aspect.
fn widen_to_aspect(size: DVec2, aspect: f64) -> DVec2 {
    if size.x < size.y * aspect {
        dvec2(size.y * aspect, size.y)
    } else {
        dvec2(size.x, size.x / aspect)
    }
}
