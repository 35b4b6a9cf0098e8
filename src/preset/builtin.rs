//! Generators registered by [`PresetRegistry::with_builtin`](super::PresetRegistry::with_builtin)
//!
//! Arrow lengths are fixed display lengths; the physical arguments are
//! checked but only the geometric ones (incline angle, beam length) change
//! the drawing.

use super::{PresetArg, bool_arg, number_arg};
use crate::builder::DiagramBuilder;
use crate::errors::GeneratorError;
use crate::model::{Body, Diagram, ForceKind};

/// Block on an incline: `incline(angle = 30, mass = 10, friction = true)`
pub fn incline(id: &str, args: &[PresetArg]) -> Result<Diagram, GeneratorError> {
    let angle = number_arg(args, 0, 30.0)?;
    let _mass = number_arg(args, 1, 10.0)?;
    let friction = bool_arg(args, 2, true)?;

    let mut builder = DiagramBuilder::with_size(id, 600.0, 400.0)
        .add_point("block", 300.0, 200.0, Some("Block"))
        .add_force("weight", "block", 80.0, 270.0, "mg", Some(ForceKind::Weight))
        .add_force("normal", "block", 70.0, 90.0 + angle, "N", Some(ForceKind::Normal))
        .set_body(Body::rectangle(300.0, 200.0, 60.0, 40.0));
    if friction {
        builder = builder.add_force("friction", "block", 30.0, 180.0, "f", Some(ForceKind::Friction));
    }
    Ok(builder.build())
}

/// Mass on a string: `hanging(mass = 5, tension?)`
pub fn hanging(id: &str, args: &[PresetArg]) -> Result<Diagram, GeneratorError> {
    let _mass = number_arg(args, 0, 5.0)?;
    if args.len() > 1 {
        number_arg(args, 1, 0.0)?;
    }

    Ok(DiagramBuilder::with_size(id, 400.0, 500.0)
        .add_point("mass", 200.0, 250.0, Some("M"))
        .add_force("tension", "mass", 100.0, 90.0, "T", Some(ForceKind::Tension))
        .add_force("weight", "mass", 100.0, 270.0, "mg", Some(ForceKind::Weight))
        .set_body(Body::circle(200.0, 250.0, 30.0))
        .build())
}

/// Two masses over a pulley: `pulley(m1 = 5, m2 = 3)`
pub fn pulley(id: &str, args: &[PresetArg]) -> Result<Diagram, GeneratorError> {
    let _m1 = number_arg(args, 0, 5.0)?;
    let _m2 = number_arg(args, 1, 3.0)?;

    Ok(DiagramBuilder::with_size(id, 700.0, 400.0)
        .add_point("m1", 200.0, 200.0, Some("m₁"))
        .add_point("m2", 500.0, 200.0, Some("m₂"))
        .add_force("t1", "m1", 80.0, 90.0, "T", Some(ForceKind::Tension))
        .add_force("w1", "m1", 80.0, 270.0, "m₁g", Some(ForceKind::Weight))
        .add_force("t2", "m2", 60.0, 90.0, "T", Some(ForceKind::Tension))
        .add_force("w2", "m2", 60.0, 270.0, "m₂g", Some(ForceKind::Weight))
        .set_body(Body::circle(200.0, 200.0, 25.0))
        .build())
}

/// Simply supported beam: `beam(length = 400, load = 100)`
pub fn beam(id: &str, args: &[PresetArg]) -> Result<Diagram, GeneratorError> {
    let length = number_arg(args, 0, 400.0)?;
    let _load = number_arg(args, 1, 100.0)?;
    if length <= 0.0 {
        return Err(GeneratorError::Failed(format!("beam length must be positive, got {length}")));
    }

    let (cx, cy) = (350.0, 200.0);
    Ok(DiagramBuilder::with_size(id, 700.0, 400.0)
        .add_point("left", cx - length / 2.0, cy, Some("A"))
        .add_point("right", cx + length / 2.0, cy, Some("B"))
        .add_force("ra", "left", 60.0, 90.0, "R_A", Some(ForceKind::Normal))
        .add_force("rb", "right", 60.0, 90.0, "R_B", Some(ForceKind::Normal))
        .add_force("load", "left", 80.0, 270.0, "W", Some(ForceKind::Applied))
        .set_body(Body::rectangle(cx, cy, length, 20.0))
        .show_grid(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate;

    #[test]
    fn incline_tilts_the_normal_force() {
        let d = incline("i", &[PresetArg::Number(25.0)]).unwrap();
        let normal = d.forces.iter().find(|f| f.id == "normal").unwrap();
        assert_eq!(normal.angle, 115.0);
        assert_eq!(d.forces.len(), 3);
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn incline_without_friction() {
        let args = [PresetArg::Number(30.0), PresetArg::Number(10.0), PresetArg::Bool(false)];
        let d = incline("i", &args).unwrap();
        assert!(d.forces.iter().all(|f| f.id != "friction"));
    }

    #[test]
    fn hanging_forces_share_the_mass_point() {
        let d = hanging("h", &[PresetArg::Number(5.0)]).unwrap();
        assert_eq!(d.forces.len(), 2);
        assert!(d.forces.iter().all(|f| f.point_id == "mass"));
    }

    #[test]
    fn beam_supports_follow_length() {
        let d = beam("b", &[PresetArg::Number(300.0)]).unwrap();
        let xs: Vec<f64> = d.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [200.0, 500.0]);
        assert_eq!(d.show_grid, Some(true));
    }

    #[test]
    fn bad_arguments_are_errors() {
        assert_eq!(
            pulley("p", &[PresetArg::Str("heavy".into())]),
            Err(GeneratorError::InvalidArgument { index: 0, expected: "a number" })
        );
        assert!(beam("b", &[PresetArg::Number(-1.0)]).is_err());
    }
}
