//! End-to-end behavior across ingestion, selection, framing and styling.

use stormtrack::{
    Format, Knots, MapConfig, MapFrame, ParseOptions, Renderer, Scale, Selection, StormType,
    TrackPlot, Viewport, ViewportOptions, circular_mean, resolve_category, wrap_longitude,
};

const ATCF_TWO_STORMS: &str = "\
AL, 01, 2023060118,   , BEST,   0, 251N,  915W,  25, 1009, TD
AL, 01, 2023060200,   , BEST,   0, 260N,  924W,  35, 1006, TS
AL, 02, 2023061918,   , BEST,   0, 112N,  402W,  30, 1008, TD
AL, 02, 2023062000,   , BEST,   0, 115N,  418W,  40, 1005, TS
AL, 02, 2023062006,   , BEST,   0, 118N,  433W,  45, 1002, TS
";

const ANA: &str = "\
AL012023,                ANA,      2,
20230601, 0000,  , TS, 25.3N,  86.6W,  35, 1006,
20230601, 0600,  , TS, 25.6N,  86.9W,  35, 1006,
";

#[test]
fn atcf_storm_number_splits_tracks() {
    let storms = stormtrack::parse(Format::Atcf, ATCF_TWO_STORMS, ParseOptions::default());
    let ids: Vec<u32> = storms.iter().map(|storm| storm.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(storms[0].positions.len(), 2);
    assert_eq!(storms[1].positions.len(), 3);
}

#[test]
fn hurdat2_header_and_fixes() {
    let storms = stormtrack::parse(Format::Hurdat2, ANA, ParseOptions::default());
    assert_eq!(storms.len(), 1);
    let ana = &storms[0];
    assert_eq!((ana.id, ana.name.as_str(), ana.year), (1, "ANA", 2023));
    assert_eq!(ana.positions.len(), 2);
    assert_eq!(ana.positions[0].lat, 25.3);
    assert_eq!(ana.positions[0].lon, -86.6);
    assert_eq!(ana.positions[0].storm_type, StormType::Tropical);
}

#[test]
fn min_wind_filter_uses_peak() {
    let mut storms = stormtrack::parse(Format::Atcf, ATCF_TWO_STORMS, ParseOptions::default());
    storms[0].positions[0].wind = Knots(20);
    storms[0].positions[1].wind = Knots(80);
    storms[1].positions.iter_mut().for_each(|p| p.wind = Knots(40));

    let selected = stormtrack::select(storms, &Selection::new().min_wind(50));
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, 1);
}

#[test]
fn longitude_wrapping() {
    assert_eq!(wrap_longitude(190.0), -170.0);
    assert_eq!(wrap_longitude(-190.0), 170.0);
    assert_eq!(wrap_longitude(180.0), 180.0);
    assert_eq!(wrap_longitude(-180.0), -180.0);
    assert_eq!(wrap_longitude(45.0), 45.0);
}

#[test]
fn circular_mean_across_the_dateline() {
    let mean = circular_mean(&[170.0, -170.0]).unwrap();
    assert!((mean.abs() - 180.0).abs() < 1e-9, "mean was {mean}");
    assert_eq!(circular_mean(&[]), None);
}

#[test]
fn sshws_categories() {
    assert_eq!(resolve_category(Knots(0), Scale::Sshws).label, "UN");
    assert_eq!(resolve_category(Knots(30), Scale::Sshws).label, "TD");
    assert_eq!(resolve_category(Knots(70), Scale::Sshws).label, "C1");
    assert_eq!(resolve_category(Knots(200), Scale::Sshws).label, "C5");
}

#[test]
fn dateline_track_stays_compact() {
    let text = "\
WP, 07, 2023080100,   , BEST,   0, 200N, 1750E,  50,  990, TS
WP, 07, 2023080106,   , BEST,   0, 205N, 1790E,  55,  985, TS
WP, 07, 2023080112,   , BEST,   0, 210N, 1770W,  60,  980, TS
";
    let storms = stormtrack::parse(Format::Atcf, text, ParseOptions::default());
    let viewport = Viewport::fit(&storms, ViewportOptions::default());
    assert!(viewport.crosses_antimeridian());
    assert!(viewport.size().x < 180.0);
}

struct Counter {
    tracks: usize,
    points: usize,
}

impl Renderer for Counter {
    fn draw_track(&mut self, plot: &TrackPlot, frame: &MapFrame) {
        self.tracks += 1;
        self.points += plot.points.len();
        for point in &plot.points {
            let pixel = frame.to_pixel(point.lon_lat());
            assert!(pixel.x.is_finite() && pixel.y.is_finite());
        }
    }
}

#[test]
fn composed_map_draws_every_fix() {
    let storms = stormtrack::parse(Format::Atcf, ATCF_TWO_STORMS, ParseOptions::default());
    let config = MapConfig::default().with_keep_extratropical(true);
    let map = stormtrack::compose_map(storms, &config);

    let mut counter = Counter { tracks: 0, points: 0 };
    map.draw(&mut counter);
    assert_eq!(counter.tracks, 2);
    assert_eq!(counter.points, 5);
}
