#![allow(dead_code)]

use amir_dev_studio::cv::{Color, Point};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Coordinates in a range typical for image space, including negatives.
pub fn arb_coord() -> impl Strategy<Value = f64> {
    -2_000.0f64..2_000.0
}

pub fn arb_point() -> impl Strategy<Value = Point> {
    (arb_coord(), arb_coord()).prop_map(|(x, y)| Point::new(x, y))
}

/// Two corners that differ on both axes, in any arrangement.
pub fn arb_corners() -> impl Strategy<Value = (Point, Point)> {
    (arb_point(), arb_point()).prop_filter("corners must span an area", |(a, b)| {
        a.x != b.x && a.y != b.y
    })
}

pub fn arb_color() -> impl Strategy<Value = Color> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| Color::new(r, g, b))
}

/// Positive side lengths, bounded away from zero.
pub fn arb_side() -> impl Strategy<Value = f64> {
    0.5f64..1_000.0
}
