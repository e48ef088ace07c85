// Browser-side smoke test for the simulation core: the field has to step and
// emit finite geometry with the wasm randomness source, not just under the
// native test runner.

#![cfg(target_arch = "wasm32")]

use rust_webgl_warpspeed_backend::{StarField, StarFieldConfig};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn star_field_steps_in_the_browser() {
    let config = StarFieldConfig {
        stars_per_second: 600,
        distance_per_second: 400.0,
        framerate: 60,
        min_distance: 100.0,
        max_distance: 200.0,
    };
    let mut field = StarField::new(config).unwrap();

    for _ in 0..120 {
        field.update();
    }

    let segments = field.line_segments(800, 600);
    assert!(!segments.is_empty());
    for segment in &segments {
        assert!(segment.from[0].is_finite() && segment.from[1].is_finite());
        assert!(segment.to[0].is_finite() && segment.to[1].is_finite());
    }
}
