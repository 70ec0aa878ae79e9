//! Track composition for the map renderer
//!
//! Drawing itself happens elsewhere. This module turns canonical storms into
//! what a renderer needs:
//! - `TrackPlot`: styled points and connecting segments per storm
//! - `MapFrame`: the viewport bound to an output size, with pixel mapping
//! - `Renderer`: the interface a drawing backend implements
//!
//! Submodules:
//! - `defaults`: Default sizes and settings

pub mod defaults;

use glam::{DVec2, dvec2};

use crate::config::MapConfig;
use crate::select::trim_extratropical;
use crate::style::{Rgb, StyleResolver};
use crate::types::{Storm, StormType, Timestamp};
use crate::viewport::Viewport;

/// Marker drawn at each fix, chosen by storm type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub fn for_type(storm_type: StormType) -> Self {
        match storm_type {
            StormType::Subtropical => ShapeKind::Square,
            StormType::Extratropical => ShapeKind::Triangle,
            StormType::Tropical | StormType::Low | StormType::Unknown => ShapeKind::Circle,
        }
    }
}

/// One styled fix, longitude already re-projected for the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    pub lon: f64,
    pub lat: f64,
    pub time: Timestamp,
    pub category: &'static str,
    pub color: Rgb,
    pub shape: ShapeKind,
}

impl TrackPoint {
    #[inline]
    pub fn lon_lat(&self) -> DVec2 {
        dvec2(self.lon, self.lat)
    }
}

/// Line between two consecutive points, colored like the first one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: DVec2,
    pub to: DVec2,
    pub color: Rgb,
}

/// Everything needed to draw one storm.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPlot {
    pub storm_id: u32,
    pub name: String,
    pub year: i32,
    pub points: Vec<TrackPoint>,
    pub segments: Vec<Segment>,
}

/// Build one plot per storm, in input order.
pub fn compose(storms: &[Storm], viewport: &Viewport, style: &StyleResolver) -> Vec<TrackPlot> {
    storms
        .iter()
        .map(|storm| compose_track(storm, viewport, style))
        .collect()
}

fn compose_track(storm: &Storm, viewport: &Viewport, style: &StyleResolver) -> TrackPlot {
    let points: Vec<TrackPoint> = storm
        .positions
        .iter()
        .map(|position| {
            let category = style.resolve(position.wind);
            TrackPoint {
                lon: viewport.reproject(position.lon),
                lat: position.lat,
                time: position.time,
                category: category.label,
                color: category.color,
                shape: ShapeKind::for_type(position.storm_type),
            }
        })
        .collect();

    let segments = points
        .windows(2)
        .map(|pair| Segment {
            from: pair[0].lon_lat(),
            to: pair[1].lon_lat(),
            color: pair[0].color,
        })
        .collect();

    TrackPlot {
        storm_id: storm.id,
        name: storm.name.clone(),
        year: storm.year,
        points,
        segments,
    }
}

/// A viewport bound to an output image size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapFrame {
    viewport: Viewport,
    width: u32,
    height: u32,
    dot_size: f64,
    line_width: f64,
    alpha: f64,
}

impl MapFrame {
    /// Width comes from the configured resolution, height from the aspect ratio.
    pub fn new(viewport: Viewport, config: &MapConfig) -> Self {
        let width = config.resolution();
        let height = ((width as f64 / config.aspect()).round() as u32).max(1);
        MapFrame {
            viewport,
            width,
            height,
            dot_size: config.dot_size(),
            line_width: config.line_width(),
            alpha: config.alpha(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Pixel position of a (lon, lat) point. The origin is the top-left
    /// corner and y grows downward.
    pub fn to_pixel(&self, lon_lat: DVec2) -> DVec2 {
        let v = &self.viewport;
        let x = (lon_lat.x - v.view_lon_min) / (v.view_lon_max - v.view_lon_min);
        let y = (v.lat_max - lon_lat.y) / (v.lat_max - v.lat_min);
        dvec2(x * self.width as f64, y * self.height as f64)
    }

    /// Length in pixels of a horizontal distance in degrees
    pub fn degrees_to_pixels(&self, degrees: f64) -> f64 {
        degrees * self.width as f64 / self.viewport.size().x
    }

    pub fn dot_radius(&self) -> f64 {
        self.degrees_to_pixels(self.dot_size)
    }

    pub fn line_width(&self) -> f64 {
        self.degrees_to_pixels(self.line_width)
    }
}

/// A drawing backend.
pub trait Renderer {
    /// Draw one storm. Called once per plot, in order.
    fn draw_track(&mut self, plot: &TrackPlot, frame: &MapFrame);
}

/// Composed storms ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedMap {
    pub frame: MapFrame,
    pub plots: Vec<TrackPlot>,
}

impl ComposedMap {
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for plot in &self.plots {
            renderer.draw_track(plot, &self.frame);
        }
    }
}

/// Trim, fit and style `storms` according to `config`.
///
/// Extratropical fixes are removed first unless the config keeps them, so
/// the viewport only covers what is drawn.
pub fn compose_map(storms: Vec<Storm>, config: &MapConfig) -> ComposedMap {
    let storms = if config.keep_extratropical() {
        storms
    } else {
        trim_extratropical(storms)
    };
    let viewport = Viewport::fit(&storms, config.viewport_options());
    let style = StyleResolver::new(config.scale());
    ComposedMap {
        frame: MapFrame::new(viewport, config),
        plots: compose(&storms, &viewport, &style),
    }
}

/// Radii in degrees for `count` forecast cone points, growing along the track.
pub fn cone_radii(count: usize) -> Vec<f64> {
    let step = if count <= defaults::CONE_SHORT_LIMIT {
        defaults::CONE_STEP
    } else {
        defaults::CONE_SPREAD / (count - 1) as f64
    };
    (0..count)
        .map(|index| defaults::CONE_BASE + index as f64 * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Scale;
    use crate::types::{Hectopascals, Knots, Position};
    use crate::viewport::ViewportOptions;

    fn fix(hour: u8, lon: f64, wind: u32, storm_type: StormType) -> Position {
        Position {
            time: Timestamp::new(2021, 8, 28, hour),
            lat: 20.0,
            lon,
            wind: Knots(wind),
            pressure: Hectopascals::UNKNOWN,
            storm_type,
        }
    }

    fn storm(positions: Vec<Position>) -> Storm {
        let mut storm = Storm::new(9, "IDA", 2021);
        storm.positions = positions;
        storm
    }

    #[test]
    fn shapes_follow_storm_type() {
        assert_eq!(ShapeKind::for_type(StormType::Tropical), ShapeKind::Circle);
        assert_eq!(ShapeKind::for_type(StormType::Subtropical), ShapeKind::Square);
        assert_eq!(ShapeKind::for_type(StormType::Extratropical), ShapeKind::Triangle);
        assert_eq!(ShapeKind::for_type(StormType::Low), ShapeKind::Circle);
        assert_eq!(ShapeKind::for_type(StormType::Unknown), ShapeKind::Circle);
    }

    #[test]
    fn segments_take_the_color_of_their_start() {
        let storms = [storm(vec![
            fix(0, -80.0, 30, StormType::Tropical),
            fix(6, -81.0, 70, StormType::Tropical),
            fix(12, -82.0, 140, StormType::Tropical),
        ])];
        let viewport = Viewport::fit(&storms, ViewportOptions::default());
        let plots = compose(&storms, &viewport, &StyleResolver::new(Scale::Sshws));

        let plot = &plots[0];
        assert_eq!(plot.name, "IDA");
        let labels: Vec<_> = plot.points.iter().map(|p| p.category).collect();
        assert_eq!(labels, vec!["TD", "C1", "C5"]);
        assert_eq!(plot.segments.len(), 2);
        assert_eq!(plot.segments[0].color, plot.points[0].color);
        assert_eq!(plot.segments[1].color, plot.points[1].color);
    }

    #[test]
    fn antimeridian_track_stays_continuous() {
        let storms = [storm(vec![
            fix(0, 175.0, 50, StormType::Tropical),
            fix(6, -178.0, 50, StormType::Tropical),
        ])];
        let viewport = Viewport::fit(&storms, ViewportOptions::default());
        let plots = compose(&storms, &viewport, &StyleResolver::default());
        let segment = plots[0].segments[0];
        assert!((segment.to.x - segment.from.x - 7.0).abs() < 1e-9);
    }

    #[test]
    fn frame_maps_corners_to_pixels() {
        let viewport = Viewport::globe();
        let frame = MapFrame::new(viewport, &MapConfig::default());
        assert_eq!(frame.width(), 1024);
        assert_eq!(frame.height(), 576);
        assert_eq!(frame.to_pixel(dvec2(-180.0, 90.0)), dvec2(0.0, 0.0));
        assert_eq!(frame.to_pixel(dvec2(180.0, -90.0)), dvec2(1024.0, 576.0));
        assert_eq!(frame.to_pixel(dvec2(0.0, 0.0)), dvec2(512.0, 288.0));
    }

    #[test]
    fn lone_fix_without_padding_maps_inside_the_frame() {
        let storms = vec![storm(vec![fix(0, -60.0, 80, StormType::Tropical)])];
        let config = MapConfig::default().with_padding(0.0).unwrap();
        let map = compose_map(storms, &config);

        let pixel = map.frame.to_pixel(map.plots[0].points[0].lon_lat());
        assert!((pixel.x - 512.0).abs() < 1e-6, "pixel was {pixel}");
        assert!((pixel.y - 288.0).abs() < 1e-6, "pixel was {pixel}");
        assert!(map.frame.dot_radius().is_finite());
        assert!(map.frame.line_width().is_finite());
    }

    #[test]
    fn extratropical_fixes_are_trimmed_unless_kept() {
        let storms = vec![storm(vec![
            fix(0, -60.0, 80, StormType::Tropical),
            fix(6, -55.0, 60, StormType::Extratropical),
        ])];

        let trimmed = compose_map(storms.clone(), &MapConfig::default());
        assert_eq!(trimmed.plots[0].points.len(), 1);

        let kept = compose_map(storms, &MapConfig::default().with_keep_extratropical(true));
        assert_eq!(kept.plots[0].points.len(), 2);
        assert_eq!(kept.plots[0].points[1].shape, ShapeKind::Triangle);
    }

    #[test]
    fn renderer_sees_every_plot() {
        struct Counter(Vec<usize>);
        impl Renderer for Counter {
            fn draw_track(&mut self, plot: &TrackPlot, _frame: &MapFrame) {
                self.0.push(plot.points.len());
            }
        }

        let storms = vec![
            storm(vec![fix(0, -60.0, 80, StormType::Tropical)]),
            storm(vec![
                fix(0, -70.0, 40, StormType::Tropical),
                fix(6, -71.0, 45, StormType::Subtropical),
            ]),
        ];
        let map = compose_map(storms, &MapConfig::default());
        let mut counter = Counter(Vec::new());
        map.draw(&mut counter);
        assert_eq!(counter.0, vec![1, 2]);
    }

    #[test]
    fn cone_radii_growth() {
        assert_eq!(cone_radii(0), Vec::<f64>::new());
        let short = cone_radii(3);
        assert!((short[2] - 0.8).abs() < 1e-12);
        let long = cone_radii(16);
        assert_eq!(long.len(), 16);
        assert!((long[15] - 1.9).abs() < 1e-12);
    }
}
