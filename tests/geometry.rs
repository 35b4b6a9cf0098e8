//! Rendered geometry checked against the model, read back out of the SVG.

use fbdraw::render::RenderConfig;
use fbdraw::types::MagnitudeUnits;
use fbdraw::{DiagramBuilder, ForceKind, MomentDirection, PointKind};
use regex_lite::Regex;

const TOLERANCE: f64 = 2e-3;

/// `(x1, y1, x2, y2)` of every force line, in document order
fn force_lines(svg: &str) -> Vec<(f64, f64, f64, f64)> {
    let re = Regex::new(r#"class="fbd-force-line" x1="([-\d.]+)" y1="([-\d.]+)" x2="([-\d.]+)" y2="([-\d.]+)""#)
        .unwrap();
    re.captures_iter(svg)
        .map(|c| {
            let n = |i: usize| c[i].parse::<f64>().unwrap();
            (n(1), n(2), n(3), n(4))
        })
        .collect()
}

fn displacement(svg: &str) -> (f64, f64) {
    let lines = force_lines(svg);
    assert_eq!(lines.len(), 1, "expected one force line in:\n{svg}");
    let (x1, y1, x2, y2) = lines[0];
    (x2 - x1, y2 - y1)
}

fn single_force(magnitude: f64, angle: f64) -> String {
    DiagramBuilder::new("g")
        .add_point("P", 300.0, 200.0, None)
        .add_force("F", "P", magnitude, angle, "F", None)
        .build()
        .markup()
}

fn assert_close(actual: (f64, f64), expected: (f64, f64), context: &str) {
    assert!(
        (actual.0 - expected.0).abs() < TOLERANCE && (actual.1 - expected.1).abs() < TOLERANCE,
        "{context}: got {actual:?}, expected {expected:?}"
    );
}

#[test]
fn large_magnitudes_are_pixel_lengths() {
    for (m, a) in [(20.0, 0.0), (80.0, 30.0), (45.0, 135.0), (100.0, 270.0), (60.0, -45.0)] {
        let rad = f64::to_radians(a);
        let expected = (m * rad.cos(), -m * rad.sin());
        assert_close(displacement(&single_force(m, a)), expected, &format!("m={m} a={a}"));
    }
}

#[test]
fn small_magnitudes_are_scaled_by_ten() {
    for (m, a) in [(5.0, 0.0), (19.9, 90.0), (3.0, 210.0)] {
        let rad = f64::to_radians(a);
        let expected = (10.0 * m * rad.cos(), -10.0 * m * rad.sin());
        assert_close(displacement(&single_force(m, a)), expected, &format!("m={m} a={a}"));
    }
}

#[test]
fn pixel_units_skip_the_scaling() {
    let d = DiagramBuilder::new("px")
        .add_point("P", 0.0, 0.0, None)
        .add_force("F", "P", 5.0, 0.0, "F", None)
        .diagram()
        .clone();
    let config = RenderConfig {
        magnitude_units: MagnitudeUnits::Pixels,
        ..RenderConfig::default()
    };
    assert_close(displacement(&fbdraw::render_with(&d, &config)), (5.0, 0.0), "pixels");
}

#[test]
fn arrows_start_at_their_point() {
    let svg = DiagramBuilder::new("two")
        .add_support("A", 100.0, 50.0, None, PointKind::Fixed)
        .add_point("B", 400.0, 300.0, Some("B"))
        .add_force("FA", "A", 40.0, 90.0, "N", Some(ForceKind::Normal))
        .add_force("FB", "B", 40.0, 180.0, "f", Some(ForceKind::Friction))
        .build()
        .markup();
    let lines = force_lines(&svg);
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].0, lines[0].1), (100.0, 50.0));
    assert_eq!((lines[1].0, lines[1].1), (400.0, 300.0));
    // kind colors
    assert!(svg.contains(r##"stroke="#10B981""##));
    assert!(svg.contains(r##"stroke="#EF4444""##));
}

#[test]
fn moment_arc_is_centered_on_its_point() {
    let svg = DiagramBuilder::new("m")
        .add_point("O", 200.0, 200.0, None)
        .add_moment("M", "O", 15.0, MomentDirection::Ccw, "M")
        .build()
        .markup();
    let re = Regex::new(r#"d="M ([-\d.]+) ([-\d.]+) A 30 30 0 1 0 ([-\d.]+) ([-\d.]+)""#).unwrap();
    let c = re.captures(&svg).expect("ccw arc path");
    let n = |i: usize| c[i].parse::<f64>().unwrap();
    for (x, y) in [(n(1), n(2)), (n(3), n(4))] {
        let r = ((x - 200.0).powi(2) + (y - 200.0).powi(2)).sqrt();
        assert!((r - 30.0).abs() < TOLERANCE, "arc endpoint off the circle: r={r}");
    }
    // starts at +30 degrees: right of and above the center
    assert!(n(1) > 200.0 && n(2) < 200.0);
}
