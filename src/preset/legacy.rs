//! Fixed fallback presets used by the parser when the registry has no match
//!
//! Arguments are read leniently: anything that is not a non-zero number
//! falls back to the default.

use super::PresetArg;
use crate::builder::DiagramBuilder;
use crate::model::{Body, Diagram, ForceKind};

/// Names answered by [`generate`]
pub const NAMES: &[&str] = &["incline", "block", "hanging", "mass", "pulley", "beam"];

fn lenient(args: &[PresetArg], index: usize, default: f64) -> f64 {
    args.get(index)
        .and_then(PresetArg::as_f64)
        .filter(|n| *n != 0.0)
        .unwrap_or(default)
}

/// Build the legacy preset `name` (already lowercased), if there is one
pub fn generate(name: &str, id: &str, args: &[PresetArg]) -> Option<Diagram> {
    let diagram = match name {
        "incline" | "block" => {
            let friction = args.get(2).and_then(PresetArg::as_bool).unwrap_or(false);
            DiagramBuilder::with_size(id, 600.0, 400.0)
                .add_point("block", 300.0, 200.0, Some("Block"))
                .add_force("weight", "block", 80.0, 270.0, "mg", Some(ForceKind::Weight))
                .add_force("normal", "block", 70.0, 90.0, "N", Some(ForceKind::Normal))
                .add_force(
                    "friction",
                    "block",
                    if friction { 30.0 } else { 0.0 },
                    180.0,
                    "f",
                    Some(ForceKind::Friction),
                )
                .set_body(Body::rectangle(300.0, 200.0, 60.0, 40.0))
                .build()
        }
        "hanging" | "mass" => DiagramBuilder::with_size(id, 400.0, 500.0)
            .add_point("mass", 200.0, 250.0, Some("M"))
            .add_force("tension", "mass", 100.0, 90.0, "T", Some(ForceKind::Tension))
            .add_force("weight", "mass", 100.0, 270.0, "mg", Some(ForceKind::Weight))
            .set_body(Body::circle(200.0, 250.0, 30.0))
            .build(),
        "pulley" => DiagramBuilder::with_size(id, 700.0, 400.0)
            .add_point("m1", 200.0, 200.0, Some("m₁"))
            .add_point("m2", 500.0, 200.0, Some("m₂"))
            .add_force("t1", "m1", 80.0, 90.0, "T", Some(ForceKind::Tension))
            .add_force("w1", "m1", 80.0, 270.0, "m₁g", Some(ForceKind::Weight))
            .add_force("t2", "m2", 60.0, 90.0, "T", Some(ForceKind::Tension))
            .add_force("w2", "m2", 60.0, 270.0, "m₂g", Some(ForceKind::Weight))
            .build(),
        "beam" => {
            let length = lenient(args, 0, 400.0);
            DiagramBuilder::with_size(id, 700.0, 400.0)
                .add_point("left", 150.0, 200.0, Some("A"))
                .add_point("right", 550.0, 200.0, Some("B"))
                .add_force("ra", "left", 60.0, 90.0, "R_A", Some(ForceKind::Normal))
                .add_force("rb", "right", 60.0, 90.0, "R_B", Some(ForceKind::Normal))
                .add_force("load", "left", 80.0, 270.0, "W", Some(ForceKind::Applied))
                .set_body(Body::rectangle(350.0, 200.0, length, 20.0))
                .show_grid(true)
                .build()
        }
        _ => return None,
    };
    Some(diagram)
}
