use datatest_stable::Utf8Path;
use stormtrack::{Format, ParseOptions, Storm, TrackFormat};

/// Properties every adapter must hold on a well-formed archive
fn check_storms(path: &Utf8Path, format: Format, storms: &[Storm]) {
    assert!(!storms.is_empty(), "{path}: no storms parsed");

    for storm in storms {
        assert!(
            !storm.positions.is_empty(),
            "{path}: storm {} has no fixes",
            storm.name
        );
        assert!(!storm.name.is_empty(), "{path}: storm {} has no name", storm.id);

        for position in &storm.positions {
            assert!(
                (-90.0..=90.0).contains(&position.lat),
                "{path}: latitude {} out of range in {}",
                position.lat,
                storm.name
            );
            assert!(
                (-180.0..=180.0).contains(&position.lon),
                "{path}: longitude {} out of range in {}",
                position.lon,
                storm.name
            );
        }

        let sorted = storm
            .positions
            .windows(2)
            .all(|pair| pair[0].time <= pair[1].time);
        assert!(sorted, "{path}: fixes of {} out of order", storm.name);

        // Adapters that honor the synoptic filter default to applying it
        if matches!(format, Format::Atcf | Format::Hurdat2 | Format::Jma) {
            for position in &storm.positions {
                assert!(
                    position.time.is_synoptic(),
                    "{path}: asynoptic fix {} kept in {}",
                    position.time,
                    storm.name
                );
            }
        }
    }
}

fn test_fixture(path: &Utf8Path) -> datatest_stable::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let format: Format = path.extension().unwrap_or_default().parse()?;

    let adapter = stormtrack::Adapter::new(format, ParseOptions::default());
    let storms = adapter.parse(&text);
    check_storms(path, format, &storms);

    // Parsing is a pure function of the text
    assert_eq!(storms, adapter.parse(&text), "{path}: parse is not deterministic");

    let ingested = stormtrack::ingest_file(path, format, ParseOptions::default())?;
    assert_eq!(ingested.storms, storms, "{path}: file and text parses differ");

    Ok(())
}

datatest_stable::harness! {
    { test = test_fixture, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.(atcf|hurdat|hurdat2|jma|md|tcr)$" },
}
